use std::time::Duration;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入校验错误（在派发任何请求之前抛出）
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 单个站点抓取错误
    #[error("抓取错误: {0}")]
    Fetch(#[from] FetchError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 批量分析的输入错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// 目标列表为空
    #[error("目标站点列表不能为空")]
    EmptyTargets,
    /// 并发数必须大于 0
    #[error("最大并发数必须大于 0 (当前: {0})")]
    InvalidConcurrency(usize),
}

/// 站点抓取错误
///
/// 所有变体都会在任务边界被转换为失败的 `SiteReport`，不会中断整个批次。
#[derive(Debug, Error)]
pub enum FetchError {
    /// 请求超时
    #[error("请求超时 ({url}): 超过 {:.2} 秒", .timeout.as_secs_f64())]
    Timeout { url: String, timeout: Duration },
    /// 连接失败（拒绝连接、DNS 解析失败、读取响应体失败等）
    #[error("网络请求失败 ({url}): {source}")]
    Connection {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 非 2xx 状态码
    #[error("HTTP 状态异常 ({url}): {status}")]
    HttpStatus { url: String, status: u16 },
    /// 无法构造请求的 URL
    #[error("无效的 URL ({url}): {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Other(format!("JSON序列化失败: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl FetchError {
    /// 创建连接失败错误
    pub fn connection(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        FetchError::Connection {
            url: url.into(),
            source: source.into(),
        }
    }

    /// 出错的 URL
    pub fn url(&self) -> &str {
        match self {
            FetchError::Timeout { url, .. }
            | FetchError::Connection { url, .. }
            | FetchError::HttpStatus { url, .. }
            | FetchError::InvalidUrl { url, .. } => url,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_mentions_url_and_seconds() {
        let err = FetchError::Timeout {
            url: "https://slow.example".to_string(),
            timeout: Duration::from_millis(1500),
        };
        let message = err.to_string();
        assert!(message.contains("https://slow.example"));
        assert!(message.contains("1.50"));
    }

    #[test]
    fn connection_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = FetchError::connection("https://down.example", io);
        assert_eq!(err.url(), "https://down.example");
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn input_error_wraps_into_app_error() {
        let err: AppError = InputError::EmptyTargets.into();
        assert!(matches!(err, AppError::Input(InputError::EmptyTargets)));
        assert_eq!(err.to_string(), "输入错误: 目标站点列表不能为空");
    }
}
