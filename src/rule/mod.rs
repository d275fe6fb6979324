//! 规则模块：负责规则分类、数据模型、规则列表加载与规则源拉取
pub mod taxonomy;
pub mod model;
pub mod loader;
pub mod fetcher;

// 导出核心接口
pub use self::taxonomy::{Taxonomy, DEFAULT_CATEGORIES, FIELD_SEPARATOR};
pub use self::model::{OutputFormat, ParsedRule, RuleSet, RuleSetDescriptor, SourceDocument};
pub use self::loader::RuleListLoader;
pub use self::fetcher::{RemoteRuleFetcher, SourceLocation};
