//! 批量站点调度器 - 编排层
//!
//! ## 职责
//!
//! 1. **输入校验**：空目标列表或并发数为 0 时直接拒绝，不发出任何请求
//! 2. **并发控制**：每个目标一个 tokio 任务，用 Semaphore 限制同时运行的数量
//! 3. **故障隔离**：任务内的错误（包括 panic）都转换为失败的 `SiteReport`
//! 4. **结果收集**：按完成顺序收集，交给 `ResultCollector` 汇总
//!
//! 输出的报告顺序是输入目标的一个排列，调用方不能依赖提交顺序。

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tracing::error;

use crate::error::{AppResult, InputError};
use crate::infrastructure::{HttpFetcher, ReqwestFetcher};
use crate::models::{normalize_target, BatchReport, SiteReport};
use crate::orchestrator::collector::ResultCollector;
use crate::orchestrator::observer::{BatchObserver, TracingObserver};
use crate::workflow::SiteAnalyzer;

/// 批量站点调度器
pub struct RequestDispatcher {
    analyzer: Arc<SiteAnalyzer>,
    observer: Arc<dyn BatchObserver>,
}

impl RequestDispatcher {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, observer: Arc<dyn BatchObserver>) -> Self {
        Self {
            analyzer: Arc::new(SiteAnalyzer::new(fetcher)),
            observer,
        }
    }

    /// 分析一批站点
    ///
    /// 只有输入校验会返回错误；单个站点的失败体现在报告里。
    pub async fn run(
        &self,
        targets: &[String],
        max_concurrency: usize,
        per_request_timeout: Duration,
    ) -> AppResult<BatchReport> {
        if targets.is_empty() {
            return Err(InputError::EmptyTargets.into());
        }
        if max_concurrency == 0 {
            return Err(InputError::InvalidConcurrency(max_concurrency).into());
        }

        let total = targets.len();
        self.observer.on_batch_start(total, max_concurrency);

        let started = Instant::now();
        let semaphore = Arc::new(Semaphore::new(max_concurrency));
        let mut pending = FuturesUnordered::new();

        for (idx, target) in targets.iter().enumerate() {
            let site_index = idx + 1;
            let target = target.clone();
            let analyzer = Arc::clone(&self.analyzer);
            let semaphore = Arc::clone(&semaphore);

            let handle = tokio::spawn({
                let target = target.clone();
                async move {
                    // 信号量只在调度器内部使用且从不关闭
                    let _permit = semaphore.acquire_owned().await.ok();
                    analyzer.analyze(&target, per_request_timeout).await
                }
            });

            pending.push(async move {
                match handle.await {
                    Ok(report) => report,
                    Err(e) => {
                        error!("[站点 {}] 任务执行失败: {}", site_index, e);
                        SiteReport::failure(
                            normalize_target(&target),
                            format!("分析任务异常终止: {}", e),
                        )
                    }
                }
            });
        }

        let mut collector = ResultCollector::new(total);
        while let Some(report) = pending.next().await {
            self.observer
                .on_site_complete(collector.collected() + 1, total, &report);
            collector.push(report);
        }

        let batch = collector.finish(started.elapsed());
        self.observer.on_batch_complete(&batch);
        Ok(batch)
    }
}

/// 使用 reqwest 抓取器和 tracing 观察者分析一批站点
pub async fn analyze_batch(
    targets: &[String],
    max_concurrency: usize,
    per_request_timeout: Duration,
) -> AppResult<BatchReport> {
    let fetcher = ReqwestFetcher::new(crate::config::DEFAULT_USER_AGENT)?;
    let dispatcher = RequestDispatcher::new(Arc::new(fetcher), Arc::new(TracingObserver::default()));
    dispatcher.run(targets, max_concurrency, per_request_timeout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, FetchError};
    use crate::models::FetchResult;
    use crate::orchestrator::observer::NoopObserver;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// 按 URL 决定延迟/失败/panic 的抓取器，并统计调用次数与最大并发
    #[derive(Default)]
    struct PlannedFetcher {
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl HttpFetcher for PlannedFetcher {
        async fn fetch(&self, url: &str, _timeout: Duration) -> Result<FetchResult, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            let delay = if url.contains("slow") { 200 } else { 30 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if url.contains("boom") {
                panic!("fetcher exploded for {url}");
            }
            if url.contains("refused") {
                return Err(FetchError::connection(
                    url,
                    std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
                ));
            }
            Ok(FetchResult::new(
                url,
                200,
                Duration::from_millis(delay),
                Duration::from_millis(10),
                Vec::<(&str, &str)>::new(),
                "<html lang=\"en\"><title>t</title></html>",
            ))
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        started: Mutex<Option<(usize, usize)>>,
        completed: Mutex<Vec<(usize, String)>>,
        finished: AtomicUsize,
    }

    impl BatchObserver for RecordingObserver {
        fn on_batch_start(&self, total: usize, max_concurrency: usize) {
            *self.started.lock().unwrap() = Some((total, max_concurrency));
        }
        fn on_site_complete(&self, completed: usize, _total: usize, report: &SiteReport) {
            self.completed
                .lock()
                .unwrap()
                .push((completed, report.url.clone()));
        }
        fn on_batch_complete(&self, _report: &BatchReport) {
            self.finished.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn targets(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn dispatcher(fetcher: Arc<PlannedFetcher>) -> RequestDispatcher {
        RequestDispatcher::new(fetcher, Arc::new(NoopObserver))
    }


    #[tokio::test]
    async fn empty_targets_rejected_before_any_fetch() {
        let fetcher = Arc::new(PlannedFetcher::default());
        let err = dispatcher(fetcher.clone())
            .run(&[], 3, Duration::from_secs(1))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Input(InputError::EmptyTargets)));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn zero_concurrency_rejected() {
        let fetcher = Arc::new(PlannedFetcher::default());
        let err = dispatcher(fetcher.clone())
            .run(&targets(&["a.com"]), 0, Duration::from_secs(1))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Input(InputError::InvalidConcurrency(0))
        ));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn results_arrive_in_completion_order() {
        let fetcher = Arc::new(PlannedFetcher::default());
        let batch = dispatcher(fetcher)
            .run(&targets(&["slow.example", "fast.example"]), 2, Duration::from_secs(2))
            .await
            .unwrap();

        let urls: Vec<_> = batch.reports.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, ["https://fast.example", "https://slow.example"]);
    }

    #[tokio::test]
    async fn concurrency_is_bounded() {
        let fetcher = Arc::new(PlannedFetcher::default());
        let input = targets(&["a.com", "b.com", "c.com", "d.com", "e.com", "f.com"]);
        let batch = dispatcher(fetcher.clone())
            .run(&input, 2, Duration::from_secs(2))
            .await
            .unwrap();

        assert_eq!(batch.reports.len(), 6);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 6);
        let peak = fetcher.peak.load(Ordering::SeqCst);
        assert!(peak <= 2, "peak concurrency was {peak}");
    }

    #[tokio::test]
    async fn panic_and_errors_are_isolated() {
        let fetcher = Arc::new(PlannedFetcher::default());
        let input = targets(&["ok.com", "boom.com", "refused.com", "https://fine.com"]);
        let batch = dispatcher(fetcher)
            .run(&input, 4, Duration::from_secs(2))
            .await
            .unwrap();

        assert_eq!(batch.total_targets, 4);
        assert_eq!(batch.success_count, 2);

        let mut urls: Vec<_> = batch.reports.iter().map(|r| r.url.clone()).collect();
        urls.sort();
        assert_eq!(
            urls,
            [
                "https://boom.com",
                "https://fine.com",
                "https://ok.com",
                "https://refused.com"
            ]
        );

        for failure in batch.failures() {
            let message = failure.error_message().unwrap();
            assert!(!message.is_empty());
        }
        let boom = batch.reports.iter().find(|r| r.url.contains("boom")).unwrap();
        assert!(boom.error_message().unwrap().contains("异常终止"));
        let refused = batch.reports.iter().find(|r| r.url.contains("refused")).unwrap();
        assert!(refused.error_message().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn observer_sees_every_site() {
        let fetcher = Arc::new(PlannedFetcher::default());
        let observer = Arc::new(RecordingObserver::default());
        let dispatcher = RequestDispatcher::new(fetcher, observer.clone());

        dispatcher
            .run(&targets(&["a.com", "b.com", "c.com"]), 1, Duration::from_secs(2))
            .await
            .unwrap();

        assert_eq!(*observer.started.lock().unwrap(), Some((3, 1)));
        let completed = observer.completed.lock().unwrap();
        let counters: Vec<_> = completed.iter().map(|(n, _)| *n).collect();
        assert_eq!(counters, [1, 2, 3]);
        assert_eq!(observer.finished.load(Ordering::SeqCst), 1);
    }
}
