//! 规则聚合流水线
//! 拉取 → 合并去重 → 排序 → 统计 → 渲染 → 写入，规则集之间互不影响

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use crate::config::GlobalConfig;
use crate::error::RsResult;
use crate::render::{IndexRenderer, Renderer, renderer_for};
use crate::rule::{OutputFormat, RemoteRuleFetcher, RuleSet, RuleSetDescriptor};
use crate::writer::OutputWriter;

/// 单个规则集的处理结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSetReport {
    pub name: String,
    pub sources_ok: usize,
    pub sources_failed: usize,
    /// 全部规则源失败时为 true，此时不写入任何文件
    pub skipped: bool,
    pub total_rules: usize,
    pub written: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

/// 一次运行的汇总结果
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub rule_sets: Vec<RuleSetReport>,
    /// 总 README 是否写入成功
    pub index_written: bool,
}

impl PipelineReport {
    pub fn failed_sources(&self) -> usize {
        self.rule_sets.iter().map(|r| r.sources_failed).sum()
    }

    pub fn failed_files(&self) -> usize {
        self.rule_sets.iter().map(|r| r.failed.len()).sum()
    }

    pub fn skipped(&self) -> usize {
        self.rule_sets.iter().filter(|r| r.skipped).count()
    }

    pub fn get(&self, name: &str) -> Option<&RuleSetReport> {
        self.rule_sets.iter().find(|r| r.name == name)
    }
}

/// 规则聚合流水线
#[derive(Clone)]
pub struct RulePipeline {
    config: Arc<GlobalConfig>,
    fetcher: RemoteRuleFetcher,
    writer: OutputWriter,
    renderers: Arc<Vec<Box<dyn Renderer>>>,
}

impl RulePipeline {
    pub fn new(config: GlobalConfig) -> RsResult<Self> {
        let fetcher = RemoteRuleFetcher::new(&config)?;
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// 使用外部构建的拉取器
    pub fn with_fetcher(config: GlobalConfig, fetcher: RemoteRuleFetcher) -> Self {
        let renderers = OutputFormat::ALL
            .iter()
            .map(|format| renderer_for(*format, &config.subscription_base))
            .collect();

        Self {
            config: Arc::new(config),
            fetcher,
            writer: OutputWriter::new(),
            renderers: Arc::new(renderers),
        }
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// 处理全部规则集并生成总 README
    pub async fn run(&self, descriptors: &[RuleSetDescriptor]) -> PipelineReport {
        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        info!(
            "开始处理 {} 个规则集，输出目录：{}，并发数：{}",
            descriptors.len(),
            self.config.output_dir.display(),
            self.config.max_concurrency
        );

        let handles: Vec<_> = descriptors
            .iter()
            .cloned()
            .map(|descriptor| {
                let pipeline = self.clone();
                let semaphore = semaphore.clone();
                tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.ok();
                    pipeline.process(&descriptor).await
                })
            })
            .collect();

        let mut report = PipelineReport::default();
        for (descriptor, handle) in descriptors.iter().zip(handles) {
            match handle.await {
                Ok(rule_set_report) => report.rule_sets.push(rule_set_report),
                Err(e) => {
                    error!("[{}] 处理任务异常：{}", descriptor.name, e);
                    report.rule_sets.push(RuleSetReport {
                        name: descriptor.name.clone(),
                        skipped: true,
                        ..RuleSetReport::default()
                    });
                }
            }
        }

        report.index_written = self.write_index(descriptors).await;

        info!(
            "全部处理完成，耗时 {:?} | 规则集：{} | 跳过：{} | 失败规则源：{} | 写入失败文件：{}",
            start.elapsed(),
            report.rule_sets.len(),
            report.skipped(),
            report.failed_sources(),
            report.failed_files()
        );
        report
    }

    /// 处理单个规则集
    pub async fn process(&self, descriptor: &RuleSetDescriptor) -> RuleSetReport {
        let mut report = RuleSetReport {
            name: descriptor.name.clone(),
            ..RuleSetReport::default()
        };

        let docs = self.fetcher.fetch_all(&descriptor.name, &descriptor.sources).await;
        report.sources_ok = docs.len();
        report.sources_failed = descriptor.sources.len() - docs.len();

        if docs.is_empty() {
            error!("[{}] 所有规则源均拉取失败，保留已有输出文件", descriptor.name);
            report.skipped = true;
            return report;
        }

        let rule_set = RuleSet::build(descriptor, &docs, &self.config);
        report.total_rules = rule_set.total();
        debug!(
            "[{}] 规则总数：{}，未知分类：{}",
            rule_set.name,
            rule_set.total(),
            rule_set.counts.unrecognized()
        );

        let folder = self.config.output_dir.join(&rule_set.name);
        for renderer in self.renderers.iter().filter(|r| rule_set.wants(r.format())) {
            let path = folder.join(renderer.file_name(&rule_set));
            let written = match renderer.render(&rule_set) {
                Ok(content) => self.writer.write(&path, &content).await,
                Err(e) => Err(e),
            };

            match written {
                Ok(()) => {
                    info!("[{}] {} 文件已保存：{}", rule_set.name, renderer.format(), path.display());
                    report.written.push(path);
                }
                Err(e) => {
                    error!("[{}] {} 文件生成失败：{}", rule_set.name, renderer.format(), e);
                    report.failed.push(path);
                }
            }
        }

        report
    }

    async fn write_index(&self, descriptors: &[RuleSetDescriptor]) -> bool {
        if descriptors.is_empty() {
            warn!("规则列表为空，跳过总 README 生成");
            return false;
        }

        let renderer = IndexRenderer::new(&self.config.repository_base, self.config.index_columns);
        let path = self.config.output_dir.join("README.md");
        let written = match renderer.render(descriptors) {
            Ok(content) => self.writer.write(&path, &content).await,
            Err(e) => Err(e),
        };
        match written {
            Ok(()) => {
                info!("总 README 已保存：{}", path.display());
                true
            }
            Err(e) => {
                error!("总 README 生成失败：{}", e);
                false
            }
        }
    }
}
