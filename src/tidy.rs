//! 本地规则整理
//! 对文件夹中的 `.list` 文件原地去重、排序并重写头部统计，只保留已知分类的规则

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::cleaner::{COMMENT_MARKER, NormalizeOptions};
use crate::config::GlobalConfig;
use crate::error::{RsResult, RuleSyncError};
use crate::render::{ListRenderer, Renderer, strip_timestamp};
use crate::rule::{OutputFormat, RuleSet, SourceDocument};
use crate::writer::OutputWriter;

/// 单个文件的整理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TidyOutcome {
    /// 内容有变化，已重写
    Rewritten,
    /// 除更新时间外内容一致，未写入
    Unchanged,
    /// 没有任何有效规则，未写入
    Empty,
    /// 不是 list 格式，跳过
    NotListFile,
}

/// 文件夹整理汇总
#[derive(Debug, Clone, Default)]
pub struct TidyReport {
    pub rewritten: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

/// 判断文本是否为 list 格式：非空，且每个非注释行都是一个不含空白的条目
pub fn is_list_file(text: &str) -> bool {
    let mut has_lines = false;
    for line in text.lines() {
        has_lines = true;
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }
        if line.split_whitespace().count() != 1 {
            return false;
        }
    }
    has_lines
}

/// 本地规则整理器
pub struct RuleTidier {
    config: GlobalConfig,
    writer: OutputWriter,
}

impl RuleTidier {
    pub fn new(config: GlobalConfig) -> Self {
        Self {
            config,
            writer: OutputWriter::new(),
        }
    }

    /// 整理文件夹下（不递归）所有 `.list` 文件，单个文件失败不影响其他文件
    pub async fn tidy_folder(&self, dir: &Path) -> RsResult<TidyReport> {
        let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
            RuleSyncError::InvalidInput(format!("读取文件夹 {} 失败：{}", dir.display(), e))
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_list = path.extension().is_some_and(|ext| ext == "list");
            if is_list && entry.file_type().await.is_ok_and(|t| t.is_file()) {
                files.push(path);
            }
        }
        files.sort();

        let mut report = TidyReport::default();
        for path in files {
            match self.tidy_file(&path).await {
                Ok(TidyOutcome::Rewritten) => {
                    info!("文件内容已更改：{}", path.display());
                    report.rewritten.push(path);
                }
                Ok(TidyOutcome::Unchanged) => {
                    info!("文件内容未更改：{}", path.display());
                    report.unchanged.push(path);
                }
                Ok(outcome) => {
                    warn!("已跳过文件 {}：{:?}", path.display(), outcome);
                    report.skipped.push(path);
                }
                Err(e) => {
                    error!("处理规则文件失败：{}：{}", path.display(), e);
                    report.failed.push(path);
                }
            }
        }

        info!(
            "文件夹 {} 整理完成 | 重写 {} | 未更改 {} | 跳过 {} | 失败 {}",
            dir.display(),
            report.rewritten.len(),
            report.unchanged.len(),
            report.skipped.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// 整理单个 `.list` 文件，规则名称取文件名（去后缀）
    pub async fn tidy_file(&self, path: &Path) -> RsResult<TidyOutcome> {
        let bytes = tokio::fs::read(path).await?;
        let original = String::from_utf8_lossy(&bytes).into_owned();

        if !is_list_file(&original) {
            return Ok(TidyOutcome::NotListFile);
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| RuleSyncError::InvalidInput(format!("无效的文件名：{}", path.display())))?;
        let source = path.display().to_string();
        info!("正在处理文件：{} - 规则名称：{}", source, name);

        let docs = [SourceDocument::new(source.clone(), original.clone())];
        let (merged, _) = RuleSet::merge(&docs, &self.config, NormalizeOptions::strict(), &name);
        if merged.is_empty() {
            info!("文件 {} 中没有有效内容", source);
            return Ok(TidyOutcome::Empty);
        }

        let rule_set = RuleSet::assemble(name, None, vec![source], vec![OutputFormat::List], merged, &self.config);
        let content = ListRenderer.render(&rule_set)?;

        // 只忽略更新时间行，换行风格不同也要重写
        if strip_timestamp(&content) == strip_timestamp(&original) {
            return Ok(TidyOutcome::Unchanged);
        }

        self.writer.write(path, &content).await?;
        Ok(TidyOutcome::Rewritten)
    }
}
