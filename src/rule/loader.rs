//! 规则列表加载
//! 读取 rule_file_list.json 并校验，任何错误都会终止本次运行

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use super::model::{OutputFormat, RuleSetDescriptor};
use crate::error::{RsResult, RuleSyncError};

/// 规则列表加载器
pub struct RuleListLoader;

impl RuleListLoader {
    /// 从文件加载规则列表
    pub async fn load_from_path(path: impl AsRef<Path>) -> RsResult<Vec<RuleSetDescriptor>> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            RuleSyncError::ConfigLoadError(format!("读取 {} 失败：{}", path.display(), e))
        })?;

        let descriptors = Self::load_from_str(&text)?;
        info!("规则列表加载完成：{}，共 {} 个规则集", path.display(), descriptors.len());
        Ok(descriptors)
    }

    /// 从 JSON 文本加载规则列表
    pub fn load_from_str(text: &str) -> RsResult<Vec<RuleSetDescriptor>> {
        let mut descriptors: Vec<RuleSetDescriptor> = serde_json::from_str(text)
            .map_err(|e| RuleSyncError::ConfigLoadError(format!("JSON 格式错误：{}", e)))?;

        for descriptor in &mut descriptors {
            Self::apply_legacy_fields(descriptor);
        }
        Self::validate(&descriptors)?;

        Ok(descriptors)
    }

    /// 兼容旧版 write_yaml 字段并去除重复格式
    fn apply_legacy_fields(descriptor: &mut RuleSetDescriptor) {
        if descriptor.write_yaml == Some(false) {
            descriptor.formats.retain(|f| *f != OutputFormat::Yaml);
            debug!("规则集 [{}] 关闭 yaml 输出", descriptor.name);
        }
        let mut seen = HashSet::new();
        descriptor.formats.retain(|f| seen.insert(*f));
    }

    fn validate(descriptors: &[RuleSetDescriptor]) -> RsResult<()> {
        let mut names = HashSet::new();

        for descriptor in descriptors {
            let name = descriptor.name.trim();
            if name.is_empty() {
                return Err(RuleSyncError::ConfigInvalid("规则集名称不能为空".to_string()));
            }
            if name != descriptor.name
                || name.contains(['/', '\\'])
                || name == "."
                || name == ".."
            {
                return Err(RuleSyncError::ConfigInvalid(format!(
                    "规则集名称 [{}] 不能包含路径分隔符或首尾空白",
                    descriptor.name
                )));
            }
            if !names.insert(name) {
                return Err(RuleSyncError::ConfigInvalid(format!("规则集名称 [{}] 重复", name)));
            }
            if descriptor.sources.is_empty() {
                return Err(RuleSyncError::ConfigInvalid(format!("规则集 [{}] 没有配置规则源", name)));
            }
            if descriptor.sources.iter().any(|s| s.trim().is_empty()) {
                return Err(RuleSyncError::ConfigInvalid(format!("规则集 [{}] 存在空的规则源", name)));
            }
            if descriptor.formats.is_empty() {
                return Err(RuleSyncError::ConfigInvalid(format!("规则集 [{}] 没有任何输出格式", name)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_descriptor_list() {
        let json = r#"[
            {
                "name": "Google",
                "sources": ["https://a/Google.list", "https://b/Google.list"],
                "display_name": "谷歌",
                "formats": ["list", "readme"]
            },
            {
                "file_name": "Emby.list",
                "file_urls": ["https://a/emby.list"],
                "folder_name": "Emby",
                "write_yaml": false
            }
        ]"#;

        let descriptors = RuleListLoader::load_from_str(json).unwrap();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].display_name(), "谷歌");
        assert_eq!(descriptors[0].formats, vec![OutputFormat::List, OutputFormat::Readme]);
        assert_eq!(descriptors[1].name, "Emby");
        assert_eq!(descriptors[1].formats, vec![OutputFormat::List, OutputFormat::Readme]);
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let err = RuleListLoader::load_from_str("[{\"name\": ").unwrap_err();
        assert!(matches!(err, RuleSyncError::ConfigLoadError(_)));

        let err = RuleListLoader::load_from_str(r#"[{"name": "A"}]"#).unwrap_err();
        assert!(matches!(err, RuleSyncError::ConfigLoadError(_)));
    }

    #[test]
    fn test_invalid_descriptors_are_rejected() {
        let cases = [
            r#"[{"name": "", "sources": ["a"]}]"#,
            r#"[{"name": "../etc", "sources": ["a"]}]"#,
            r#"[{"name": "A", "sources": []}]"#,
            r#"[{"name": "A", "sources": ["a"], "formats": []}]"#,
            r#"[{"name": "A", "sources": ["a"]}, {"name": "A", "sources": ["b"]}]"#,
        ];
        for case in cases {
            let err = RuleListLoader::load_from_str(case).unwrap_err();
            assert!(matches!(err, RuleSyncError::ConfigInvalid(_)), "case: {}", case);
        }
    }

    #[test]
    fn test_duplicate_formats_are_collapsed() {
        let json = r#"[{"name": "A", "sources": ["a"], "formats": ["list", "list", "yml"]}]"#;
        let descriptors = RuleListLoader::load_from_str(json).unwrap();
        assert_eq!(descriptors[0].formats, vec![OutputFormat::List, OutputFormat::Yaml]);
    }

    #[tokio::test]
    async fn test_missing_file_is_fatal() {
        let err = RuleListLoader::load_from_path("/nonexistent/rule_file_list.json")
            .await
            .unwrap_err();
        assert!(matches!(err, RuleSyncError::ConfigLoadError(_)));
    }
}
