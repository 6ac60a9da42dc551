//! 业务能力层
//!
//! 目前只有站点评分规则（`evaluators`），全部为纯函数，不做任何 I/O。

pub mod evaluators;

pub use evaluators::{evaluate_site, rate, Ladder};
