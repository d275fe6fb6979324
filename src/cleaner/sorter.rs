//! 规则排序
//! 排序键：已知分类为 (分类优先级, 匹配值, 整行)，未知分类为 (分类数, "", 整行)

use std::cmp::Ordering;

use crate::rule::{ParsedRule, Taxonomy};

/// 规则排序器
pub struct RuleSorter<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> RuleSorter<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// 排序键，整行作为最后一级比较，保证不同的行不会相等
    pub fn sort_key<'l>(&self, line: &'l str) -> (usize, &'l str, &'l str) {
        match ParsedRule::parse(line) {
            Some(rule) => match self.taxonomy.index_of(rule.category) {
                Some(idx) => (idx, rule.value, line),
                None => (self.taxonomy.len(), "", line),
            },
            None => (self.taxonomy.len(), "", line),
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }

    pub fn sort(&self, mut lines: Vec<String>) -> Vec<String> {
        lines.sort_by(|a, b| self.compare(a, b));
        lines
    }
}
