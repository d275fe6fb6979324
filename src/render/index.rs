//! 输出根目录下的总 README.md：按网格排列所有规则集的目录链接

use std::fmt::Write;

use super::join_url;
use crate::error::RsResult;
use crate::rule::RuleSetDescriptor;

pub struct IndexRenderer {
    repository_base: String,
    columns: usize,
}

impl IndexRenderer {
    pub fn new(repository_base: impl Into<String>, columns: usize) -> Self {
        Self {
            repository_base: repository_base.into().trim_end_matches('/').to_string(),
            columns: columns.max(1),
        }
    }

    fn cell(&self, descriptor: &RuleSetDescriptor) -> RsResult<String> {
        let link = join_url(&self.repository_base, &[descriptor.name.as_str()])?;
        Ok(format!("[{}]({})", descriptor.display_name(), link))
    }

    pub fn render(&self, descriptors: &[RuleSetDescriptor]) -> RsResult<String> {
        let mut md = String::from("## 前言\n本文件由脚本自动生成\n\n## 规则列表\n");

        writeln!(md, "| 规则名称 |{}", " |".repeat(self.columns - 1))?;
        writeln!(md, "|{}", "---|".repeat(self.columns))?;

        for row in descriptors.chunks(self.columns) {
            let mut cells = row.iter().map(|d| self.cell(d)).collect::<RsResult<Vec<_>>>()?;
            // 不足一行时用空单元格补齐
            cells.resize(self.columns, String::new());
            writeln!(md, "| {} |", cells.join(" | "))?;
        }

        Ok(md)
    }
}
