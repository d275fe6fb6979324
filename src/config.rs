//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;
use std::time::Duration;

use crate::rule::Taxonomy;

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 规则输出根目录
    pub output_dir: PathBuf,
    // 超时配置（单位：秒）
    pub http_timeout: u64,
    // 请求头 User-Agent
    pub user_agent: String,
    // 同时处理的规则集数量上限
    pub max_concurrency: usize,
    // 订阅链接前缀（raw 文件地址，README 中使用）
    pub subscription_base: String,
    // 仓库目录链接前缀（总 README 中使用）
    pub repository_base: String,
    // 总 README 表格每行的列数
    pub index_columns: usize,
    // 更新时间所用时区（相对 UTC 的小时数）
    pub utc_offset_hours: i32,
    // 是否在输出文件头部写入更新时间
    pub with_timestamp: bool,
    // 规则分类（决定排序优先级与统计项）
    pub taxonomy: Taxonomy,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("rules/Clash"),
            http_timeout: 30,
            user_agent: format!("rulesync/{}", env!("CARGO_PKG_VERSION")),
            max_concurrency: 4,
            subscription_base: "https://raw.githubusercontent.com/Ctory-Nily/rule-script/main/rules/Clash".to_string(),
            repository_base: "https://github.com/Ctory-Nily/rule-script/tree/main/rules/Clash".to_string(),
            index_columns: 5,
            utc_offset_hours: 8,
            with_timestamp: true,
            taxonomy: Taxonomy::default(),
        }
    }
}

impl GlobalConfig {
    /// 单个请求的超时时间
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout.max(1))
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn http_timeout(mut self, timeout: u64) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn max_concurrency(mut self, max: usize) -> Self {
        // 至少保留一个并发槽位
        self.config.max_concurrency = max.max(1);
        self
    }

    pub fn subscription_base(mut self, base: impl Into<String>) -> Self {
        self.config.subscription_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn repository_base(mut self, base: impl Into<String>) -> Self {
        self.config.repository_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn index_columns(mut self, columns: usize) -> Self {
        self.config.index_columns = columns.max(1);
        self
    }

    pub fn utc_offset_hours(mut self, hours: i32) -> Self {
        self.config.utc_offset_hours = hours;
        self
    }

    pub fn with_timestamp(mut self, enabled: bool) -> Self {
        self.config.with_timestamp = enabled;
        self
    }

    pub fn taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.config.taxonomy = taxonomy;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}
