//! `<name>.yaml`：注释头部 + `payload:` 序列（Clash rule-provider 格式）

use super::{Renderer, header_lines};
use crate::error::RsResult;
use crate::rule::{OutputFormat, RuleSet};

pub const PAYLOAD_KEY: &str = "payload:";

pub struct PayloadRenderer;

impl Renderer for PayloadRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Yaml
    }

    fn render(&self, rule_set: &RuleSet) -> RsResult<String> {
        let mut lines = header_lines(rule_set);
        lines.push(String::new());

        if rule_set.lines.is_empty() {
            // 空序列需要显式写成 []，否则 payload 会被解析为 null
            lines.push(format!("{} []", PAYLOAD_KEY));
        } else {
            lines.push(PAYLOAD_KEY.to_string());
            for line in &rule_set.lines {
                lines.push(format!("  - {}", yaml_scalar(line)?));
            }
        }

        let mut content = lines.join("\n");
        content.push('\n');
        Ok(content)
    }
}

/// 单条规则行序列化为 YAML 标量，引号由 serde_yaml 决定
fn yaml_scalar(value: &str) -> RsResult<String> {
    let scalar = serde_yaml::to_string(value)?;
    Ok(scalar.trim_end_matches('\n').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::test_support::rule_set;

    fn parse_payload(content: &str) -> Vec<serde_yaml::Value> {
        let doc: serde_yaml::Value = serde_yaml::from_str(content).unwrap();
        doc.get("payload").unwrap().as_sequence().unwrap().clone()
    }

    #[test]
    fn test_render_payload() {
        let content = PayloadRenderer
            .render(&rule_set(&["DOMAIN,a.com", "IP-CIDR,10.0.0.0/8,no-resolve"], false))
            .unwrap();
        let expected_tail = "# IP-SUFFIX: 0\n\npayload:\n  - DOMAIN,a.com\n  - IP-CIDR,10.0.0.0/8,no-resolve\n";
        assert!(content.starts_with("# 规则名称: Demo\n# 规则总数量: 2\n"));
        assert!(content.ends_with(expected_tail), "{}", content);
    }

    #[test]
    fn test_render_empty_payload() {
        let content = PayloadRenderer.render(&rule_set(&[], false)).unwrap();
        assert!(content.ends_with("\npayload: []\n"));
        assert!(parse_payload(&content).is_empty());
    }

    #[test]
    fn test_payload_values_are_exact_rule_lines() {
        // 测试场景：会被 YAML 解析成 null/bool/数字，或被当作注释截断的规则行
        let set = rule_set(
            &[
                "DOMAIN,a.com\t#tail",
                "DOMAIN,b.com #tail",
                "IP-CIDR6,2001:db8::/32",
                "*weird",
                "'quoted",
                "null",
                "true",
                "12345",
                "~",
            ],
            true,
        );
        let content = PayloadRenderer.render(&set).unwrap();

        let values = parse_payload(&content);
        let payload: Vec<&str> = values.iter().map(|v| v.as_str().unwrap()).collect();
        assert_eq!(payload, set.lines);
    }
}
