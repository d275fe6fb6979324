//! 全局错误类型定义

use thiserror::Error;
use serde_yaml::Error as SerdeYamlError;
use std::fmt::Error as FmtError;
use std::io::Error as IoError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum RuleSyncError {
    // 配置相关错误
    #[error("规则列表加载失败：{0}")]
    ConfigLoadError(String),
    #[error("规则列表配置无效：{0}")]
    ConfigInvalid(String),
    #[error("规则分类配置无效：{0}")]
    TaxonomyError(String),

    // 拉取相关错误
    #[error("规则源拉取失败：{0}")]
    FetchError(String),

    // 网络相关错误
    #[error("网络请求失败：{0}")]
    HttpError(#[from] reqwest::Error),

    // 渲染相关错误
    #[error("YAML序列化失败：{0}")]
    YamlError(#[from] SerdeYamlError),
    #[error("文档格式化失败：{0}")]
    FormatError(#[from] FmtError),

    // 输出相关错误
    #[error("文件写入失败：{path}：{source}")]
    WriteError {
        path: String,
        #[source]
        source: IoError,
    },

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type RsResult<T> = Result<T, RuleSyncError>;
