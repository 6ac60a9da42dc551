//! HTTP 抓取能力
//!
//! 只负责发出一次 GET 并记录耗时，不判断状态码是否可接受，也不重试。

use std::io::Read;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use flate2::read::GzDecoder;
use reqwest::header::{ACCEPT_ENCODING, CONTENT_ENCODING};
use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult, FetchError};
use crate::models::FetchResult;

/// HTTP GET 能力
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// 抓取 `url`，整个请求（含响应体）不超过 `timeout`
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchResult, FetchError>;
}

/// 基于 reqwest 的抓取实现
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// 使用指定的 User-Agent 创建抓取器
    pub fn new(user_agent: &str) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::Other(format!("无法创建 HTTP 客户端: {}", e)))?;
        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(&config.user_agent)
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchResult, FetchError> {
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .header(ACCEPT_ENCODING, "gzip")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, timeout, e))?;
        let ttfb = start.elapsed();

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let gzipped = response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("gzip"));

        let bytes = response
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(url, timeout, e))?;
        let elapsed = start.elapsed();

        let decoded = if gzipped {
            decode_gzip(&bytes).unwrap_or_else(|| bytes.to_vec())
        } else {
            bytes.to_vec()
        };

        debug!(
            "抓取完成 {}: 状态 {}, {} 字节, 耗时 {:.3}s, TTFB {:.3}s",
            url,
            status,
            decoded.len(),
            elapsed.as_secs_f64(),
            ttfb.as_secs_f64()
        );

        let body = String::from_utf8_lossy(&decoded).into_owned();
        Ok(FetchResult::new(url, status, elapsed, ttfb, headers, body).with_body_size(decoded.len()))
    }
}

/// 解压 gzip 响应体；数据并非有效 gzip 时返回 `None`
fn decode_gzip(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut decoded = Vec::new();
    match GzDecoder::new(bytes).read_to_end(&mut decoded) {
        Ok(_) => Some(decoded),
        Err(e) => {
            debug!("gzip 解码失败，按原始字节处理: {}", e);
            None
        }
    }
}

fn map_reqwest_error(url: &str, timeout: Duration, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else if err.is_builder() {
        FetchError::InvalidUrl {
            url: url.to_string(),
            reason: err.to_string(),
        }
    } else {
        FetchError::connection(url, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use httpmock::prelude::*;
    use std::io::Write;

    fn fetcher() -> ReqwestFetcher {
        ReqwestFetcher::new(crate::config::DEFAULT_USER_AGENT).unwrap()
    }

    fn gzip(text: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[tokio::test]
    async fn fetches_status_headers_and_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/")
                    .header("accept-encoding", "gzip");
                then.status(200)
                    .header("Content-Type", "text/html")
                    .body("<html><title>ok</title></html>");
            })
            .await;

        let result = fetcher()
            .fetch(&server.url("/"), Duration::from_secs(5))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.status, 200);
        assert!(result.is_success());
        assert_eq!(result.header("content-type"), Some("text/html"));
        assert_eq!(result.body, "<html><title>ok</title></html>");
        assert_eq!(result.body_size, result.body.len());
        assert!(result.ttfb <= result.elapsed);
    }

    #[tokio::test]
    async fn decodes_gzip_bodies() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/gz");
                then.status(200)
                    .header("Content-Encoding", "gzip")
                    .body(gzip("<html><p>compressed</p></html>"));
            })
            .await;

        let result = fetcher()
            .fetch(&server.url("/gz"), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(result.header("Content-Encoding"), Some("gzip"));
        assert_eq!(result.body, "<html><p>compressed</p></html>");
    }

    #[tokio::test]
    async fn non_success_status_is_returned_not_raised() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404).body("nope");
            })
            .await;

        let result = fetcher()
            .fetch(&server.url("/missing"), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(result.status, 404);
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200).delay(Duration::from_secs(2)).body("late");
            })
            .await;

        let err = fetcher()
            .fetch(&server.url("/slow"), Duration::from_millis(200))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Timeout { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_host_is_connection_error() {
        let err = fetcher()
            .fetch("http://127.0.0.1:1/", Duration::from_secs(2))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Connection { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn malformed_url_is_invalid() {
        let err = fetcher()
            .fetch("https://", Duration::from_secs(2))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::InvalidUrl { .. }), "got {err:?}");
    }
}
