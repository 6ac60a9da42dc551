//! 站点报告与批量报告
//!
//! `SiteReport` 在内存中是一个带标签的联合体：成功时携带分数，失败时携带错误信息，
//! 二者只会存在其一。序列化时展开为 `{url, success, ...}` 的扁平结构，
//! 反序列化时会重新校验这一约束。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::score::{round2, Category, CategoryScores, SiteMetrics};

/// 单个站点的分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "SiteReportWire", try_from = "SiteReportWire")]
pub struct SiteReport {
    /// 规范化后的 URL
    pub url: String,
    pub outcome: SiteOutcome,
}

/// 站点分析的成功或失败载荷
#[derive(Debug, Clone, PartialEq)]
pub enum SiteOutcome {
    Success(SiteScores),
    Failure { error_message: String },
}

/// 成功站点的分数
#[derive(Debug, Clone, PartialEq)]
pub struct SiteScores {
    pub category_scores: CategoryScores,
    pub overall_score: f64,
    pub metrics: SiteMetrics,
}

impl SiteReport {
    /// 由指标明细构建成功报告，类别分与总分在此计算
    pub fn success(url: impl Into<String>, metrics: SiteMetrics) -> Self {
        let category_scores = metrics.category_scores();
        Self {
            url: url.into(),
            outcome: SiteOutcome::Success(SiteScores {
                overall_score: category_scores.overall(),
                category_scores,
                metrics,
            }),
        }
    }

    /// 创建失败报告
    pub fn failure(url: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outcome: SiteOutcome::Failure {
                error_message: error_message.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, SiteOutcome::Success(_))
    }

    pub fn scores(&self) -> Option<&SiteScores> {
        match &self.outcome {
            SiteOutcome::Success(scores) => Some(scores),
            SiteOutcome::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            SiteOutcome::Success(_) => None,
            SiteOutcome::Failure { error_message } => Some(error_message),
        }
    }
}

/// `SiteReport` 的序列化形态
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SiteReportWire {
    url: String,
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category_scores: Option<CategoryScores>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    overall_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metrics: Option<SiteMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl From<SiteReport> for SiteReportWire {
    fn from(report: SiteReport) -> Self {
        match report.outcome {
            SiteOutcome::Success(scores) => Self {
                url: report.url,
                success: true,
                category_scores: Some(scores.category_scores),
                overall_score: Some(scores.overall_score),
                metrics: Some(scores.metrics),
                error_message: None,
            },
            SiteOutcome::Failure { error_message } => Self {
                url: report.url,
                success: false,
                category_scores: None,
                overall_score: None,
                metrics: None,
                error_message: Some(error_message),
            },
        }
    }
}

impl TryFrom<SiteReportWire> for SiteReport {
    type Error = String;

    fn try_from(wire: SiteReportWire) -> Result<Self, Self::Error> {
        match wire {
            SiteReportWire {
                url,
                success: true,
                category_scores: Some(category_scores),
                overall_score: Some(overall_score),
                metrics,
                error_message: None,
            } => Ok(SiteReport {
                url,
                outcome: SiteOutcome::Success(SiteScores {
                    category_scores,
                    overall_score,
                    metrics: metrics.unwrap_or_default(),
                }),
            }),
            SiteReportWire {
                url,
                success: false,
                category_scores: None,
                overall_score: None,
                metrics: None,
                error_message: Some(error_message),
            } => Ok(SiteReport::failure(url, error_message)),
            other => Err(format!(
                "站点报告 {} 的成功/失败字段不一致 (success={})",
                other.url, other.success
            )),
        }
    }
}

/// 一次批量分析的完整报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// 批次完成时间（本地时间，`%Y-%m-%d %H:%M:%S`）
    pub timestamp: String,
    pub total_targets: usize,
    pub success_count: usize,
    /// 批次总耗时（秒，两位小数）
    pub elapsed_seconds: f64,
    /// 仅在成功站点上计算的各类别平均分；没有成功站点时为空
    pub average_scores: BTreeMap<Category, f64>,
    /// 按完成顺序排列的站点报告
    pub reports: Vec<SiteReport>,
}

impl BatchReport {
    pub fn failure_count(&self) -> usize {
        self.total_targets.saturating_sub(self.success_count)
    }

    pub fn successes(&self) -> impl Iterator<Item = &SiteReport> {
        self.reports.iter().filter(|r| r.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &SiteReport> {
        self.reports.iter().filter(|r| !r.is_success())
    }
}

/// 将秒数转换为报告中使用的两位小数形式
pub fn elapsed_seconds(elapsed: std::time::Duration) -> f64 {
    round2(elapsed.as_secs_f64())
}

/// 将任意可序列化的报告渲染为格式化的 JSON
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}
