use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// 默认请求头中的 User-Agent
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时分析的站点数量
    pub max_concurrency: usize,
    /// 单个请求的超时时间（秒）
    pub request_timeout_secs: u64,
    /// 请求使用的 User-Agent
    pub user_agent: String,
    /// 目标站点列表文件（每行一个 URL，或 TOML 的 `urls = [...]`）
    pub targets_file: String,
    /// 输出的 JSON 报告文件
    pub output_report_file: String,
    /// 是否显示详细日志（逐项指标）
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrency: 5,
            request_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            targets_file: "urls.txt".to_string(),
            output_report_file: "report.json".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，无法解析的值回退到默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrency: std::env::var("MAX_CONCURRENCY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrency),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            user_agent: std::env::var("USER_AGENT").unwrap_or(default.user_agent),
            targets_file: std::env::var("TARGETS_FILE").unwrap_or(default.targets_file),
            output_report_file: std::env::var("OUTPUT_REPORT_FILE").unwrap_or(default.output_report_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 从环境变量读取配置，遇到无法解析的值时返回错误
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::try_from_lookup(|name| std::env::var(name).ok())
    }

    /// 使用自定义的变量查找函数构建配置
    pub fn try_from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        Ok(Self {
            max_concurrency: parse_var(&lookup, "MAX_CONCURRENCY", "usize")?
                .unwrap_or(default.max_concurrency),
            request_timeout_secs: parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "u64")?
                .unwrap_or(default.request_timeout_secs),
            user_agent: lookup("USER_AGENT").unwrap_or(default.user_agent),
            targets_file: lookup("TARGETS_FILE").unwrap_or(default.targets_file),
            output_report_file: lookup("OUTPUT_REPORT_FILE")
                .unwrap_or(default.output_report_file),
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING", "bool")?
                .unwrap_or(default.verbose_logging),
        })
    }

    /// 单个请求的超时时间
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<F, T>(lookup: &F, var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
    }
}
