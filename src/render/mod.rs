//! 输出渲染模块：list / yaml / README 三种规则集文档与总 README
//! 所有渲染器都是纯函数，互不依赖，可以任意顺序或并行执行
pub mod index;
pub mod list;
pub mod payload;
pub mod summary;

pub use self::index::IndexRenderer;
pub use self::list::ListRenderer;
pub use self::payload::PayloadRenderer;
pub use self::summary::SummaryRenderer;

use url::Url;

use crate::error::{RsResult, RuleSyncError};
use crate::rule::{OutputFormat, RuleSet};
use crate::utils::format_timestamp;

/// 头部更新时间行的前缀
pub const TIMESTAMP_PREFIX: &str = "# 更新时间: ";

/// 规则集文档渲染器
pub trait Renderer: Send + Sync {
    /// 对应的输出格式
    fn format(&self) -> OutputFormat;

    /// 规则集目录内的文件名
    fn file_name(&self, rule_set: &RuleSet) -> String {
        self.format().file_name(&rule_set.name)
    }

    /// 渲染完整文件内容
    fn render(&self, rule_set: &RuleSet) -> RsResult<String>;
}

/// list 与 yaml 共用的注释头部
pub fn header_lines(rule_set: &RuleSet) -> Vec<String> {
    let mut lines = vec![
        format!("# 规则名称: {}", rule_set.name),
        format!("# 规则总数量: {}", rule_set.total()),
    ];
    if let Some(time) = &rule_set.generated_at {
        lines.push(format!("{}{}", TIMESTAMP_PREFIX, format_timestamp(time)));
    }
    lines.extend(
        rule_set
            .counts
            .iter()
            .map(|(category, count)| format!("# {}: {}", category, count)),
    );
    lines
}

/// 去掉更新时间行，用于判断内容是否实际变化
/// 其余行原样保留（包括换行符），换行风格或结尾换行不同也算内容变化
pub fn strip_timestamp(content: &str) -> String {
    content
        .split_inclusive('\n')
        .filter(|line| !line.starts_with(TIMESTAMP_PREFIX))
        .collect()
}

/// 在基础地址后追加路径段，每段单独做百分号编码
pub fn join_url(base: &str, segments: &[&str]) -> RsResult<String> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| RuleSyncError::InvalidInput(format!("地址 {} 不能追加路径", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.to_string())
}

/// 按格式创建渲染器
pub fn renderer_for(format: OutputFormat, subscription_base: &str) -> Box<dyn Renderer> {
    match format {
        OutputFormat::List => Box::new(ListRenderer),
        OutputFormat::Yaml => Box::new(PayloadRenderer),
        OutputFormat::Readme => Box::new(SummaryRenderer::new(subscription_base)),
    }
}
