//! 命令行入口
//! sync：按规则列表拉取并生成规则文件；tidy：整理本地规则文件夹

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;

use crate::config::{ConfigManager, CustomConfigBuilder};
use crate::pipeline::RulePipeline;
use crate::rule::RuleListLoader;
use crate::tidy::RuleTidier;

/// rulesync 命令行参数
#[derive(Parser, Debug, Clone)]
#[command(name = "rulesync", version, about = "Clash 分流规则聚合工具")]
pub struct Cli {
    /// 日志详细程度（-v 为 debug，-vv 为 trace）
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// 拉取规则源并生成 list / yaml / README
    Sync(SyncArgs),
    /// 原地整理本地 .list 规则文件
    Tidy(TidyArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    /// 规则列表文件（JSON）
    #[arg(short, long, default_value = "rule_file_list.json")]
    pub config: PathBuf,

    /// 输出根目录
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 单个请求超时（秒）
    #[arg(long)]
    pub timeout: Option<u64>,

    /// 同时处理的规则集数量
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// README 中订阅链接的前缀
    #[arg(long)]
    pub subscription_base: Option<String>,

    /// 总 README 中目录链接的前缀
    #[arg(long)]
    pub repository_base: Option<String>,

    /// 不在文件头部写入更新时间
    #[arg(long)]
    pub no_timestamp: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TidyArgs {
    /// 规则文件夹
    #[arg(default_value = "user_rule")]
    pub dir: PathBuf,

    /// 不在文件头部写入更新时间
    #[arg(long)]
    pub no_timestamp: bool,
}

impl SyncArgs {
    fn apply(&self, mut builder: CustomConfigBuilder) -> CustomConfigBuilder {
        if let Some(output) = &self.output {
            builder = builder.output_dir(output.clone());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.http_timeout(timeout);
        }
        if let Some(concurrency) = self.concurrency {
            builder = builder.max_concurrency(concurrency);
        }
        if let Some(base) = &self.subscription_base {
            builder = builder.subscription_base(base.clone());
        }
        if let Some(base) = &self.repository_base {
            builder = builder.repository_base(base.clone());
        }
        builder.with_timestamp(!self.no_timestamp)
    }
}

/// 初始化日志（RUST_LOG 优先）
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .try_init();
}

/// 执行命令；只有规则列表加载失败等致命错误才返回 Err
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing(cli.verbose);

    match cli.command {
        Command::Sync(args) => {
            // 规则列表无效时直接终止，不产生任何输出
            let descriptors = RuleListLoader::load_from_path(&args.config).await?;
            let config = args.apply(ConfigManager::custom()).build();
            let pipeline = RulePipeline::new(config)?;

            let report = pipeline.run(&descriptors).await;
            if report.failed_sources() > 0 || report.failed_files() > 0 {
                info!(
                    "部分规则源或文件处理失败（规则源 {}，文件 {}），详见上方日志",
                    report.failed_sources(),
                    report.failed_files()
                );
            }
        }
        Command::Tidy(args) => {
            let config = ConfigManager::custom().with_timestamp(!args.no_timestamp).build();
            RuleTidier::new(config).tidy_folder(&args.dir).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sync_arguments() {
        let cli = Cli::parse_from([
            "rulesync", "-v", "sync", "--config", "list.json", "-o", "out", "--timeout", "10", "--no-timestamp",
        ]);
        assert_eq!(cli.verbose, 1);
        let Command::Sync(args) = cli.command else {
            panic!("expected sync command");
        };
        let config = args.apply(ConfigManager::custom()).build();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.http_timeout, 10);
        assert!(!config.with_timestamp);
        assert_eq!(args.config, PathBuf::from("list.json"));
    }

    #[test]
    fn test_parse_tidy_defaults() {
        let cli = Cli::parse_from(["rulesync", "tidy"]);
        let Command::Tidy(args) = cli.command else {
            panic!("expected tidy command");
        };
        assert_eq!(args.dir, PathBuf::from("user_rule"));
        assert!(!args.no_timestamp);
    }

    #[tokio::test]
    async fn test_invalid_rule_list_aborts_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("rule_file_list.json");
        std::fs::write(&config, "{ not json").unwrap();
        let output = dir.path().join("out");

        let cli = Cli::parse_from([
            "rulesync",
            "sync",
            "--config",
            config.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]);
        assert!(run(cli).await.is_err());
        assert!(!output.exists());
    }
}
