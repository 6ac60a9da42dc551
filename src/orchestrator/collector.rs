//! 结果汇总
//!
//! 调度循环是唯一的写入方：任务结果通过 join handle 交回后依次 `push`，
//! 全部任务结束后再 `finish`，不需要锁。

use std::collections::BTreeMap;
use std::time::Duration;

use crate::models::report::elapsed_seconds;
use crate::models::score::mean2;
use crate::models::{BatchReport, Category, SiteReport};

/// 批量结果收集器
#[derive(Debug)]
pub struct ResultCollector {
    total_targets: usize,
    reports: Vec<SiteReport>,
}

impl ResultCollector {
    pub fn new(total_targets: usize) -> Self {
        Self {
            total_targets,
            reports: Vec::with_capacity(total_targets),
        }
    }

    /// 按完成顺序追加一份站点报告
    pub fn push(&mut self, report: SiteReport) {
        self.reports.push(report);
    }

    pub fn collected(&self) -> usize {
        self.reports.len()
    }

    /// 生成批量报告，时间戳取调用时刻
    pub fn finish(self, elapsed: Duration) -> BatchReport {
        let success_count = self.reports.iter().filter(|r| r.is_success()).count();
        BatchReport {
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_targets: self.total_targets,
            success_count,
            elapsed_seconds: elapsed_seconds(elapsed),
            average_scores: average_scores(&self.reports),
            reports: self.reports,
        }
    }
}

/// 只在成功的报告上计算各类别平均分；没有成功报告时返回空表
pub fn average_scores(reports: &[SiteReport]) -> BTreeMap<Category, f64> {
    let successes: Vec<_> = reports.iter().filter_map(SiteReport::scores).collect();
    if successes.is_empty() {
        return BTreeMap::new();
    }
    Category::ALL
        .into_iter()
        .map(|category| {
            let mean = mean2(successes.iter().map(|s| s.category_scores.get(category)));
            (category, mean)
        })
        .collect()
}
