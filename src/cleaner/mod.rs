//! 规则清洗模块：合并去重、分类排序、数量统计
pub mod clean_stats;
pub mod counter;
pub mod normalizer;
pub mod sorter;

pub use self::clean_stats::CleanStats;
pub use self::counter::RuleCounts;
pub use self::normalizer::{COMMENT_MARKER, NormalizeOptions, Normalizer};
pub use self::sorter::RuleSorter;
