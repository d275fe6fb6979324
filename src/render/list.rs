//! `<name>.list`：注释头部 + 空行 + 逐行规则

use super::{Renderer, header_lines};
use crate::error::RsResult;
use crate::rule::{OutputFormat, RuleSet};

pub struct ListRenderer;

impl Renderer for ListRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::List
    }

    fn render(&self, rule_set: &RuleSet) -> RsResult<String> {
        let mut lines = header_lines(rule_set);
        lines.push(String::new());
        lines.extend(rule_set.lines.iter().cloned());

        let mut content = lines.join("\n");
        content.push('\n');
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::test_support::rule_set;

    #[test]
    fn test_render_list() {
        let content = ListRenderer.render(&rule_set(&["DOMAIN,a.com", "IP-CIDR,10.0.0.0/8,no-resolve"], false)).unwrap();
        assert_eq!(
            content,
            "# 规则名称: Demo\n\
             # 规则总数量: 2\n\
             # DOMAIN: 1\n\
             # DOMAIN-SUFFIX: 0\n\
             # DOMAIN-KEYWORD: 0\n\
             # IP-CIDR: 1\n\
             # IP-CIDR6: 0\n\
             # IP-SUFFIX: 0\n\
             \n\
             DOMAIN,a.com\n\
             IP-CIDR,10.0.0.0/8,no-resolve\n"
        );
    }

    #[test]
    fn test_render_empty_list_keeps_header() {
        let content = ListRenderer.render(&rule_set(&[], false)).unwrap();
        assert!(content.starts_with("# 规则名称: Demo\n# 规则总数量: 0\n"));
        assert!(content.ends_with("# IP-SUFFIX: 0\n\n"));
    }
}
