//! 规则分类定义
//! 分类顺序即排序优先级，构造后不可变

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::error::{RsResult, RuleSyncError};

/// 规则字段分隔符
pub const FIELD_SEPARATOR: char = ',';

/// 默认规则分类（按排序优先级）
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "DOMAIN",
    "DOMAIN-SUFFIX",
    "DOMAIN-KEYWORD",
    "IP-CIDR",
    "IP-CIDR6",
    "IP-SUFFIX",
];

static DEFAULT_TAXONOMY: Lazy<Taxonomy> = Lazy::new(|| Taxonomy {
    labels: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
});

/// 有序规则分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    labels: Vec<String>,
}

impl Taxonomy {
    /// 创建并校验分类
    /// 分类名不含逗号且互不相同，因此任一 `<分类>,` 都不会是另一个 `<分类>,` 的前缀
    pub fn new<I, S>(labels: I) -> RsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(RuleSyncError::TaxonomyError("分类列表为空".to_string()));
        }

        let mut seen = HashSet::new();
        for label in &labels {
            if label.is_empty() {
                return Err(RuleSyncError::TaxonomyError("存在空分类名".to_string()));
            }
            if label.contains(FIELD_SEPARATOR) || label.chars().any(char::is_whitespace) {
                return Err(RuleSyncError::TaxonomyError(format!(
                    "分类名 [{}] 不能包含逗号或空白字符",
                    label
                )));
            }
            if !seen.insert(label.as_str()) {
                return Err(RuleSyncError::TaxonomyError(format!("分类名 [{}] 重复", label)));
            }
        }

        Ok(Self { labels })
    }

    /// 分类名列表（按优先级）
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// 分类在优先级中的位置，未知分类返回 None
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == category)
    }

    /// 统计用的字面前缀：`<分类>,`
    pub fn prefix_of(label: &str) -> String {
        format!("{}{}", label, FIELD_SEPARATOR)
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        DEFAULT_TAXONOMY.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy_passes_validation() {
        let taxonomy = Taxonomy::new(DEFAULT_CATEGORIES).unwrap();
        assert_eq!(taxonomy, Taxonomy::default());
        assert_eq!(taxonomy.index_of("DOMAIN"), Some(0));
        assert_eq!(taxonomy.index_of("IP-SUFFIX"), Some(5));
        assert_eq!(taxonomy.index_of("PROCESS-NAME"), None);
    }

    #[test]
    fn test_rejects_duplicate_and_malformed_labels() {
        assert!(Taxonomy::new(Vec::<String>::new()).is_err());
        assert!(Taxonomy::new(["DOMAIN", "DOMAIN"]).is_err());
        assert!(Taxonomy::new(["DOMAIN,SUFFIX"]).is_err());
        assert!(Taxonomy::new(["IP CIDR"]).is_err());
        assert!(Taxonomy::new([""]).is_err());
    }

    #[test]
    fn test_label_prefix_is_not_ambiguous_with_separator() {
        // 测试场景：DOMAIN 是 DOMAIN-SUFFIX 的字面前缀，但 "DOMAIN," 不是 "DOMAIN-SUFFIX," 的前缀
        let taxonomy = Taxonomy::new(["DOMAIN", "DOMAIN-SUFFIX", "IP-CIDR", "IP-CIDR6"]).unwrap();
        assert_eq!(taxonomy.len(), 4);
        assert!(!"DOMAIN-SUFFIX,a.com".starts_with(&Taxonomy::prefix_of("DOMAIN")));
        assert!(!"IP-CIDR6,2001:db8::/32".starts_with(&Taxonomy::prefix_of("IP-CIDR")));
    }
}
