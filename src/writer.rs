//! 输出文件写入
//! 内容先完整写入同目录临时文件，再重命名覆盖目标，避免留下新旧混合的半成品

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{RsResult, RuleSyncError};

#[derive(Debug, Clone, Default)]
pub struct OutputWriter;

impl OutputWriter {
    pub fn new() -> Self {
        Self
    }

    /// 整体写入文件（自动创建父目录）
    pub async fn write(&self, path: &Path, content: &str) -> RsResult<()> {
        let write_err = |source| RuleSyncError::WriteError {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let tmp_path = Self::temp_path(path);
        if let Err(e) = tokio::fs::write(&tmp_path, content.as_bytes()).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(write_err(e));
        }
        if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(write_err(e));
        }

        debug!("文件已写入：{}（{} 字节）", path.display(), content.len());
        Ok(())
    }

    fn temp_path(path: &Path) -> PathBuf {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        path.with_file_name(format!(".{}.tmp", file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_dirs_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Google").join("Google.list");
        let writer = OutputWriter::new();

        writer.write(&target, "old content that is longer").await.unwrap();
        writer.write(&target, "new").await.unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
        // 临时文件不应残留
        let leftovers: Vec<_> = std::fs::read_dir(target.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        // 父路径是普通文件，无法创建目录
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let err = OutputWriter::new()
            .write(&blocker.join("a.list"), "content")
            .await
            .unwrap_err();
        match err {
            RuleSyncError::WriteError { path, .. } => assert!(path.ends_with("a.list")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
