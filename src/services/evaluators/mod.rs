//! 评分函数
//!
//! 每个指标都是对 `FetchResult` 或 `MarkupQuery` 的纯函数，返回 [0, 10] 内的分数，
//! 不做 I/O，也不会因为标记残缺而失败。

pub mod accessibility;
pub mod design;
pub mod ladder;
pub mod performance;
pub mod seo;

pub use ladder::{rate, Ladder};

use crate::infrastructure::MarkupQuery;
use crate::models::{FetchResult, SiteMetrics};

/// 计算一个站点全部四个类别的指标
pub fn evaluate_site(fetch: &FetchResult, doc: &impl MarkupQuery) -> SiteMetrics {
    SiteMetrics {
        performance: performance::evaluate(fetch),
        design: design::evaluate(doc),
        seo: seo::evaluate(doc),
        accessibility: accessibility::evaluate(doc),
    }
}
