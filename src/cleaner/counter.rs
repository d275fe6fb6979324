//! 规则数量统计
//! 按 `<分类>,` 字面前缀统计各分类数量

use crate::rule::Taxonomy;

/// 各分类规则数量（顺序与分类表一致）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCounts {
    per_category: Vec<(String, usize)>,
    total: usize,
}

impl RuleCounts {
    pub fn count<S: AsRef<str>>(taxonomy: &Taxonomy, lines: &[S]) -> Self {
        let prefixes: Vec<String> = taxonomy.labels().iter().map(|l| Taxonomy::prefix_of(l)).collect();
        let mut counts = vec![0usize; prefixes.len()];

        for line in lines {
            let line = line.as_ref();
            // 分类表保证前缀互不包含，最多命中一个
            if let Some(idx) = prefixes.iter().position(|p| line.starts_with(p.as_str())) {
                counts[idx] += 1;
            }
        }

        Self {
            per_category: taxonomy.labels().iter().cloned().zip(counts).collect(),
            total: lines.len(),
        }
    }

    /// 指定分类的数量，未知分类返回 0
    pub fn get(&self, category: &str) -> usize {
        self.per_category
            .iter()
            .find(|(label, _)| label == category)
            .map_or(0, |(_, count)| *count)
    }

    /// 按分类表顺序遍历 (分类, 数量)
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.per_category.iter().map(|(label, count)| (label.as_str(), *count))
    }

    /// 规则总数（去重排序后的行数）
    pub fn total(&self) -> usize {
        self.total
    }

    /// 已知分类的数量之和
    pub fn recognized(&self) -> usize {
        self.per_category.iter().map(|(_, count)| count).sum()
    }

    /// 未知分类（含格式错误）的数量
    pub fn unrecognized(&self) -> usize {
        self.total - self.recognized()
    }
}
