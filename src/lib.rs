//! rulesync - Clash 分流规则聚合工具
//! 多源拉取规则列表，去重、按分类排序后输出 list / yaml / README

// 导出全局错误类型
pub use self::error::{RuleSyncError, RsResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder};

// 导出规则模块核心接口
pub use self::rule::{
    Taxonomy, ParsedRule, RuleSet, RuleSetDescriptor, SourceDocument, OutputFormat,
    RuleListLoader, RemoteRuleFetcher, SourceLocation,
};

// 导出清洗模块核心接口
pub use self::cleaner::{Normalizer, NormalizeOptions, RuleSorter, RuleCounts, CleanStats};

// 导出渲染模块核心接口
pub use self::render::{Renderer, ListRenderer, PayloadRenderer, SummaryRenderer, IndexRenderer};

// 导出流水线与本地整理
pub use self::pipeline::{RulePipeline, PipelineReport, RuleSetReport};
pub use self::tidy::{RuleTidier, TidyOutcome, TidyReport, is_list_file};
pub use self::writer::OutputWriter;

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod cleaner;
pub mod render;
pub mod writer;
pub mod pipeline;
pub mod tidy;
pub mod utils;
pub mod cli;
