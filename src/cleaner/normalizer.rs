//! 规则合并去重
//! 按源顺序、行顺序遍历，保留每条规则第一次出现的位置

use std::collections::HashSet;

use tracing::warn;

use super::clean_stats::CleanStats;
use crate::rule::{ParsedRule, SourceDocument, Taxonomy};
use crate::utils::log_format::preview_line;

/// 注释标记
pub const COMMENT_MARKER: char = '#';

/// 合并选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// 丢弃不足两个字段的行（默认保留，排序时放到最后）
    pub drop_malformed: bool,
    /// 丢弃分类不在分类表中的行
    pub drop_unknown: bool,
}

impl NormalizeOptions {
    /// 严格模式：只保留已知分类的规则
    pub fn strict() -> Self {
        Self {
            drop_malformed: true,
            drop_unknown: true,
        }
    }
}

/// 规则合并器
pub struct Normalizer<'a> {
    taxonomy: &'a Taxonomy,
    options: NormalizeOptions,
}

impl<'a> Normalizer<'a> {
    pub fn new(taxonomy: &'a Taxonomy, options: NormalizeOptions) -> Self {
        Self { taxonomy, options }
    }

    /// 合并多个源文本，返回去重后的规则行（首次出现顺序）
    pub fn merge(&self, docs: &[SourceDocument]) -> Vec<String> {
        self.merge_with_stats(docs).0
    }

    pub fn merge_with_stats(&self, docs: &[SourceDocument]) -> (Vec<String>, CleanStats) {
        let mut stats = CleanStats {
            source_documents: docs.len(),
            ..CleanStats::default()
        };
        let mut seen: HashSet<&str> = HashSet::new();
        let mut merged = Vec::new();

        for doc in docs {
            let text = doc.text.strip_prefix('\u{feff}').unwrap_or(&doc.text);

            for raw in text.lines() {
                stats.lines_read += 1;
                let line = raw.trim();

                if line.is_empty() {
                    stats.blank_lines += 1;
                    continue;
                }
                if line.starts_with(COMMENT_MARKER) {
                    stats.comment_lines += 1;
                    continue;
                }
                if !seen.insert(line) {
                    stats.duplicate_lines += 1;
                    continue;
                }

                match ParsedRule::parse(line) {
                    None => {
                        warn!("来自 {} 的规则格式错误（缺少逗号）：{}", doc.source, preview_line(line, 80));
                        if self.options.drop_malformed {
                            stats.malformed_dropped += 1;
                            continue;
                        }
                        stats.malformed_kept += 1;
                    }
                    Some(rule) if self.options.drop_unknown && self.taxonomy.index_of(rule.category).is_none() => {
                        warn!("来自 {} 的规则分类未知，已忽略：{}", doc.source, preview_line(line, 80));
                        stats.unknown_dropped += 1;
                        continue;
                    }
                    Some(_) => {}
                }

                merged.push(line.to_string());
            }
        }

        stats.kept_lines = merged.len();
        (merged, stats)
    }
}
