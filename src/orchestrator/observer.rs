//! 批次观察者
//!
//! 调度器通过注入的 `BatchObserver` 输出进度，而不是直接依赖全局日志。

use crate::models::{BatchReport, Category, SiteReport};
use crate::utils::logging;
use tracing::{error, info};

/// 批次进度回调，默认实现全部为空
pub trait BatchObserver: Send + Sync {
    /// 批次开始派发
    fn on_batch_start(&self, _total: usize, _max_concurrency: usize) {}

    /// 某个站点完成（成功或失败）；`completed` 为已完成数量
    fn on_site_complete(&self, _completed: usize, _total: usize, _report: &SiteReport) {}

    /// 批次全部完成
    fn on_batch_complete(&self, _report: &BatchReport) {}
}

/// 不输出任何内容的观察者
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

/// 基于 `tracing` 的观察者
#[derive(Debug, Default, Clone)]
pub struct TracingObserver {
    /// 是否逐项输出指标明细
    pub verbose: bool,
}

impl TracingObserver {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl BatchObserver for TracingObserver {
    fn on_batch_start(&self, total: usize, max_concurrency: usize) {
        logging::log_startup(max_concurrency);
        logging::log_targets_loaded(total, max_concurrency);
    }

    fn on_site_complete(&self, completed: usize, total: usize, report: &SiteReport) {
        match report.scores() {
            Some(scores) => {
                info!(
                    "[站点 {}/{}] ✅ {} 总分 {:.2}",
                    completed, total, report.url, scores.overall_score
                );
                if self.verbose {
                    for category in Category::ALL {
                        let facets = scores.metrics.get(category);
                        let detail = facets
                            .iter()
                            .map(|(name, score)| format!("{}={:.2}", name, score))
                            .collect::<Vec<_>>()
                            .join(", ");
                        info!(
                            "[站点 {}/{}]   {}: {:.2} ({})",
                            completed,
                            total,
                            category,
                            scores.category_scores.get(category),
                            detail
                        );
                    }
                }
            }
            None => {
                error!(
                    "[站点 {}/{}] ❌ {} 分析失败: {}",
                    completed,
                    total,
                    report.url,
                    report.error_message().unwrap_or_default()
                );
            }
        }
    }

    fn on_batch_complete(&self, report: &BatchReport) {
        logging::print_final_stats(report);
    }
}
