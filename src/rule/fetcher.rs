//! 规则源拉取
//! 核心特性：
//! 1. 每个规则源独立拉取，单个失败只记录日志并跳过
//! 2. 同一规则集内的规则源并发拉取，结果按请求顺序返回
//! 3. 每个请求都有超时上限，避免单个源阻塞整批任务
//! 4. 支持 http/https 远程地址与本地文件（file:// 或普通路径）

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::USER_AGENT;
use tracing::{debug, info, warn};
use url::Url;

use super::model::SourceDocument;
use crate::config::GlobalConfig;
use crate::error::{RsResult, RuleSyncError};

/// 连接超时上限
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// 规则源位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Remote(Url),
    Local(PathBuf),
}

impl SourceLocation {
    /// 解析规则源标识：http/https 为远程地址，file:// 与非 URL 字符串视为本地路径
    pub fn parse(source: &str) -> RsResult<Self> {
        let source = source.trim();
        match Url::parse(source) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Self::Remote(url)),
                "file" => url.to_file_path().map(Self::Local).map_err(|_| {
                    RuleSyncError::InvalidInput(format!("无法识别的本地文件地址：{}", source))
                }),
                // Windows 盘符路径（C:\rules\a.list）会被解析成单字母 scheme
                scheme if scheme.len() == 1 => Ok(Self::Local(PathBuf::from(source))),
                scheme => Err(RuleSyncError::InvalidInput(format!(
                    "不支持的规则源协议 [{}]：{}",
                    scheme, source
                ))),
            },
            Err(_) => Ok(Self::Local(PathBuf::from(source))),
        }
    }
}

/// 远程规则拉取器
/// 无状态工具类，内部 Client 可廉价克隆
#[derive(Debug, Clone)]
pub struct RemoteRuleFetcher {
    client: Client,
    user_agent: String,
}

impl RemoteRuleFetcher {
    /// 按全局配置构建（超时、User-Agent）
    pub fn new(config: &GlobalConfig) -> RsResult<Self> {
        let timeout = config.request_timeout();
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
            .build()?;

        Ok(Self::with_client(client, config.user_agent.clone()))
    }

    /// 使用外部构建的 Client
    pub fn with_client(client: Client, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }

    /// 拉取单个规则源的原始文本
    pub async fn fetch_one(&self, source: &str) -> RsResult<String> {
        match SourceLocation::parse(source)? {
            SourceLocation::Remote(url) => self.fetch_remote(url).await,
            SourceLocation::Local(path) => {
                let bytes = tokio::fs::read(&path).await.map_err(|e| {
                    RuleSyncError::FetchError(format!("读取本地文件 {} 失败：{}", path.display(), e))
                })?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }

    async fn fetch_remote(&self, url: Url) -> RsResult<String> {
        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RuleSyncError::FetchError(format!(
                "URL {} 返回状态码 {}",
                url,
                response.status()
            )));
        }

        Ok(response.text().await?)
    }

    /// 拉取规则集的全部规则源
    /// 失败的源被跳过，返回结果保持请求顺序（与完成顺序无关）
    pub async fn fetch_all(&self, name: &str, sources: &[String]) -> Vec<SourceDocument> {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| {
                let fetcher = self.clone();
                let source = source.clone();
                tokio::spawn(async move {
                    let result = fetcher.fetch_one(&source).await;
                    (source, result)
                })
            })
            .collect();

        let mut docs = Vec::with_capacity(handles.len());
        for (idx, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok((source, Ok(text))) => {
                    debug!("[{}] 规则源拉取成功：{}（{} 字节）", name, source, text.len());
                    docs.push(SourceDocument::new(source, text));
                }
                Ok((source, Err(e))) => {
                    warn!("[{}] 规则源拉取失败，已跳过：{}：{}", name, source, e);
                }
                Err(e) => {
                    warn!("[{}] 规则源 {} 的拉取任务异常：{}", name, sources[idx], e);
                }
            }
        }

        info!("[{}] 规则源拉取完成：成功 {} / 共 {}", name, docs.len(), sources.len());
        docs
    }
}
