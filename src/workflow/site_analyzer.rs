//! 单站点分析流程 - 流程层
//!
//! 流程顺序：
//! 1. 规范化 URL
//! 2. 抓取（唯一的等待点，受超时约束）
//! 3. 检查状态码
//! 4. 解析 + 评分（同步纯计算）
//!
//! 任何一步失败都会变成失败的 `SiteReport`，不会向上抛出错误。

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::FetchError;
use crate::infrastructure::{HtmlDocument, HttpFetcher};
use crate::models::{normalize_target, FetchResult, SiteMetrics, SiteReport};
use crate::services::evaluators;

/// 单站点分析器
///
/// - 不持有任何可变状态，可在多个任务间共享
/// - 只依赖抓取能力（`HttpFetcher`）
pub struct SiteAnalyzer {
    fetcher: Arc<dyn HttpFetcher>,
}

impl SiteAnalyzer {
    pub fn new(fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self { fetcher }
    }

    /// 分析单个目标站点，总是返回一份报告
    pub async fn analyze(&self, target: &str, timeout: Duration) -> SiteReport {
        let url = normalize_target(target);

        match self.fetch_checked(&url, timeout).await {
            Ok(fetch) => {
                let metrics = score_fetch(&fetch);
                debug!("✓ {} 评分完成", url);
                SiteReport::success(url, metrics)
            }
            Err(e) => {
                warn!("⚠️ {} 分析失败: {}", url, e);
                SiteReport::failure(url, e.to_string())
            }
        }
    }

    /// 抓取并校验状态码
    ///
    /// 超时同时由 HTTP 客户端和这里的 `tokio::time::timeout` 约束，
    /// 保证任意 `HttpFetcher` 实现都不会超过时限。
    async fn fetch_checked(&self, url: &str, timeout: Duration) -> Result<FetchResult, FetchError> {
        let fetch = tokio::time::timeout(timeout, self.fetcher.fetch(url, timeout))
            .await
            .map_err(|_| FetchError::Timeout {
                url: url.to_string(),
                timeout,
            })??;

        if !fetch.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: fetch.status,
            });
        }
        Ok(fetch)
    }
}

/// 解析并评分；解析出的文档只存在于这个同步函数内
fn score_fetch(fetch: &FetchResult) -> SiteMetrics {
    let doc = HtmlDocument::parse(&fetch.body);
    evaluators::evaluate_site(fetch, &doc)
}
