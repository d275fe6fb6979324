//! 规则数据模型定义
//! 规则集描述、单条规则解析结果与聚合后的规则集

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::taxonomy::FIELD_SEPARATOR;
use crate::cleaner::{CleanStats, NormalizeOptions, Normalizer, RuleCounts, RuleSorter};
use crate::config::GlobalConfig;
use crate::utils::timestamp::now_with_offset;

/// 单条规则的字段视图：`<分类>,<匹配值>[,<策略>]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedRule<'a> {
    pub category: &'a str,
    pub value: &'a str,
    pub option: Option<&'a str>,
}

impl<'a> ParsedRule<'a> {
    /// 解析规则行，不足两个字段（无逗号）时返回 None
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut parts = line.splitn(3, FIELD_SEPARATOR);
        let category = parts.next()?;
        let value = parts.next()?;
        Some(Self {
            category,
            value,
            option: parts.next(),
        })
    }
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<name>.list`
    List,
    /// `<name>.yaml`（payload 格式）
    #[serde(alias = "yml", alias = "payload")]
    Yaml,
    /// 规则集目录下的 README.md
    #[serde(alias = "md", alias = "markdown")]
    Readme,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::List, OutputFormat::Yaml, OutputFormat::Readme];

    /// 规则集目录内的文件名
    pub fn file_name(&self, rule_name: &str) -> String {
        match self {
            OutputFormat::List => format!("{}.list", rule_name),
            OutputFormat::Yaml => format!("{}.yaml", rule_name),
            OutputFormat::Readme => "README.md".to_string(),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::List => write!(f, "list"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Readme => write!(f, "readme"),
        }
    }
}

fn default_formats() -> Vec<OutputFormat> {
    OutputFormat::ALL.to_vec()
}

/// 规则集描述（rule_file_list.json 中的一项）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetDescriptor {
    /// 规则集名称，同时决定输出子目录与文件名
    #[serde(alias = "folder_name")]
    pub name: String,
    /// 规则源（URL 或本地路径），顺序即合并优先级
    #[serde(alias = "file_urls")]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default = "default_formats")]
    pub formats: Vec<OutputFormat>,
    /// 旧版配置字段，false 时不输出 yaml
    #[serde(default, skip_serializing)]
    pub write_yaml: Option<bool>,
}

impl RuleSetDescriptor {
    pub fn new(name: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            name: name.into(),
            sources,
            display_name: None,
            formats: default_formats(),
            write_yaml: None,
        }
    }

    /// 展示名，未配置时使用规则集名称
    pub fn display_name(&self) -> &str {
        display_or_name(self.display_name.as_deref(), &self.name)
    }

    pub fn wants(&self, format: OutputFormat) -> bool {
        self.formats.contains(&format)
    }
}

fn display_or_name<'a>(display_name: Option<&'a str>, name: &'a str) -> &'a str {
    match display_name.map(str::trim) {
        Some(display) if !display.is_empty() => display,
        _ => name,
    }
}

/// 单个规则源拉取到的原始文本，仅在合并阶段存在
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub source: String,
    pub text: String,
}

impl SourceDocument {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }
}

/// 聚合后的规则集（去重、排序、统计完成，序列化前不再变更）
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub name: String,
    pub display_name: Option<String>,
    pub sources: Vec<String>,
    pub formats: Vec<OutputFormat>,
    pub lines: Vec<String>,
    pub counts: RuleCounts,
    pub generated_at: Option<DateTime<FixedOffset>>,
}

impl RuleSet {
    /// 由规则集描述与已拉取的源文本构建
    pub fn build(descriptor: &RuleSetDescriptor, docs: &[SourceDocument], config: &GlobalConfig) -> Self {
        let (merged, _) = Self::merge(docs, config, NormalizeOptions::default(), &descriptor.name);
        Self::assemble(
            descriptor.name.clone(),
            descriptor.display_name.clone(),
            descriptor.sources.clone(),
            descriptor.formats.clone(),
            merged,
            config,
        )
    }

    /// 合并源文本并输出清理统计
    pub fn merge(
        docs: &[SourceDocument],
        config: &GlobalConfig,
        options: NormalizeOptions,
        name: &str,
    ) -> (Vec<String>, CleanStats) {
        let start = std::time::Instant::now();
        let (merged, stats) = Normalizer::new(&config.taxonomy, options).merge_with_stats(docs);
        stats.print_stats(name, start.elapsed());
        (merged, stats)
    }

    /// 对已去重的规则行排序、统计并补全元信息
    pub fn assemble(
        name: String,
        display_name: Option<String>,
        sources: Vec<String>,
        formats: Vec<OutputFormat>,
        merged: Vec<String>,
        config: &GlobalConfig,
    ) -> Self {
        let lines = RuleSorter::new(&config.taxonomy).sort(merged);
        let counts = RuleCounts::count(&config.taxonomy, &lines);
        let generated_at = config
            .with_timestamp
            .then(|| now_with_offset(config.utc_offset_hours));

        Self {
            name,
            display_name,
            sources,
            formats,
            lines,
            counts,
            generated_at,
        }
    }

    pub fn display_name(&self) -> &str {
        display_or_name(self.display_name.as_deref(), &self.name)
    }

    pub fn total(&self) -> usize {
        self.lines.len()
    }

    pub fn wants(&self, format: OutputFormat) -> bool {
        self.formats.contains(&format)
    }
}
