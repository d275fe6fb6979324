//! 规则集目录下的 README.md：统计表、订阅链接、使用方法、规则来源

use std::fmt::Write;

use super::{Renderer, join_url};
use crate::error::RsResult;
use crate::rule::{OutputFormat, RuleSet};
use crate::utils::format_timestamp;

/// rule-provider 默认更新间隔（秒）
const PROVIDER_INTERVAL: u32 = 86400;

pub struct SummaryRenderer {
    subscription_base: String,
}

impl SummaryRenderer {
    pub fn new(subscription_base: impl Into<String>) -> Self {
        Self {
            subscription_base: subscription_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// 规则文件的订阅地址
    pub fn subscription_url(&self, rule_set: &RuleSet, format: OutputFormat) -> RsResult<String> {
        let file_name = format.file_name(&rule_set.name);
        join_url(&self.subscription_base, &[rule_set.name.as_str(), file_name.as_str()])
    }
}

impl Renderer for SummaryRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Readme
    }

    fn render(&self, rule_set: &RuleSet) -> RsResult<String> {
        let mut md = String::new();

        writeln!(md, "# {}\n", rule_set.display_name())?;
        md.push_str("## 前言\n本文件由脚本自动生成\n\n");

        md.push_str("## 规则统计\n");
        md.push_str("| 类型 | 数量(条) |\n");
        md.push_str("| ---- | ---- |\n");
        for (category, count) in rule_set.counts.iter() {
            writeln!(md, "| {} | {} |", category, count)?;
        }
        writeln!(md, "| TOTAL | {} |\n", rule_set.total())?;

        // 订阅链接只列出实际生成的规则文件
        let rule_files: Vec<OutputFormat> = [OutputFormat::List, OutputFormat::Yaml]
            .into_iter()
            .filter(|f| rule_set.wants(*f))
            .collect();

        if !rule_files.is_empty() {
            md.push_str("## 订阅链接\n");
            for format in &rule_files {
                writeln!(md, "- {}: {}", format, self.subscription_url(rule_set, *format)?)?;
            }
            md.push('\n');

            // yaml 优先，使用 Clash 原生的 payload 格式
            let (format, provider_format) = if rule_set.wants(OutputFormat::Yaml) {
                (OutputFormat::Yaml, "yaml")
            } else {
                (OutputFormat::List, "text")
            };
            md.push_str("## 使用方法\n");
            md.push_str("在 Clash 配置中添加 rule-provider 并在 rules 中引用：\n\n");
            md.push_str("```yaml\nrule-providers:\n");
            writeln!(md, "  {}:", rule_set.name)?;
            md.push_str("    type: http\n");
            md.push_str("    behavior: classical\n");
            writeln!(md, "    format: {}", provider_format)?;
            writeln!(md, "    url: \"{}\"", self.subscription_url(rule_set, format)?)?;
            writeln!(md, "    path: ./ruleset/{}", format.file_name(&rule_set.name))?;
            writeln!(md, "    interval: {}", PROVIDER_INTERVAL)?;
            md.push_str("\nrules:\n");
            writeln!(md, "  - RULE-SET,{},Proxy", rule_set.name)?;
            md.push_str("```\n\n");
        }

        md.push_str("## 规则来源\n");
        for source in &rule_set.sources {
            writeln!(md, "- {}", source)?;
        }

        if let Some(time) = &rule_set.generated_at {
            write!(md, "\n## 更新时间\n{}\n", format_timestamp(time))?;
        }

        Ok(md)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::test_support::rule_set;

    #[test]
    fn test_render_summary_statistics_and_sources() {
        let renderer = SummaryRenderer::new("https://raw.example/rules/");
        let md = renderer
            .render(&rule_set(&["DOMAIN,a.com", "DOMAIN-SUFFIX,b.com", "GEOIP,CN"], false))
            .unwrap();

        assert!(md.starts_with("# Demo\n\n## 前言\n"));
        assert!(md.contains("| DOMAIN | 1 |\n| DOMAIN-SUFFIX | 1 |\n"));
        assert!(md.contains("| TOTAL | 3 |\n"));
        assert!(md.contains("- list: https://raw.example/rules/Demo/Demo.list\n"));
        assert!(md.contains("- yaml: https://raw.example/rules/Demo/Demo.yaml\n"));
        assert!(md.contains("    format: yaml\n"));
        assert!(md.contains("## 规则来源\n- https://a.example/Demo.list\n- https://b.example/demo.list\n"));
        assert!(!md.contains("## 更新时间"));
    }

    #[test]
    fn test_summary_uses_display_name_and_list_only_subscription() {
        let renderer = SummaryRenderer::new("https://raw.example/rules");
        let mut set = rule_set(&["DOMAIN,a.com"], true);
        set.display_name = Some("演示规则".to_string());
        set.formats = vec![OutputFormat::List, OutputFormat::Readme];

        let md = renderer.render(&set).unwrap();
        assert!(md.starts_with("# 演示规则\n"));
        assert!(!md.contains("Demo.yaml"));
        assert!(md.contains("    format: text\n"));
        assert!(md.ends_with("## 更新时间\n2024年05月01日 08:30\n"));
    }

    #[test]
    fn test_summary_without_rule_files_has_no_subscription() {
        let renderer = SummaryRenderer::new("https://raw.example/rules");
        let mut set = rule_set(&["DOMAIN,a.com"], false);
        set.formats = vec![OutputFormat::Readme];

        let md = renderer.render(&set).unwrap();
        assert!(!md.contains("## 订阅链接"));
        assert!(!md.contains("rule-providers"));
    }

    #[test]
    fn test_subscription_url_encodes_rule_set_name() {
        let renderer = SummaryRenderer::new("https://raw.example/rules");
        let mut set = rule_set(&["DOMAIN,a.com"], false);
        set.name = "Emby #1".to_string();

        let md = renderer.render(&set).unwrap();
        assert!(md.contains("- list: https://raw.example/rules/Emby%20%231/Emby%20%231.list\n"));
        assert!(md.contains("    url: \"https://raw.example/rules/Emby%20%231/Emby%20%231.yaml\"\n"));
    }
}
