//! 性能类指标：加载时间、响应体大小、首字节时间、压缩

use std::time::Duration;

use crate::models::{FacetScores, FetchResult};
use crate::services::evaluators::ladder::{rate, Ladder};

const LOAD_TIME_SECS: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
const RESPONSE_SIZE_MB: [f64; 5] = [1.0, 2.0, 5.0, 10.0, 20.0];
const TTFB_SECS: [f64; 5] = [0.1, 0.3, 0.5, 0.8, 1.0];

pub fn load_time(elapsed: Duration) -> f64 {
    rate(elapsed.as_secs_f64(), &LOAD_TIME_SECS, Ladder::Ascending)
}

pub fn response_size(size_mb: f64) -> f64 {
    rate(size_mb, &RESPONSE_SIZE_MB, Ladder::Reverse)
}

pub fn ttfb(ttfb: Duration) -> f64 {
    rate(ttfb.as_secs_f64(), &TTFB_SECS, Ladder::Reverse)
}

/// `Content-Encoding` 中包含 gzip 记 10 分
pub fn compression(content_encoding: Option<&str>) -> f64 {
    if content_encoding.is_some_and(|v| v.contains("gzip")) {
        10.0
    } else {
        0.0
    }
}

pub fn evaluate(fetch: &FetchResult) -> FacetScores {
    let mut scores = FacetScores::new();
    scores.insert("load_time", load_time(fetch.elapsed));
    scores.insert("response_size", response_size(fetch.body_size_mb()));
    scores.insert("ttfb", ttfb(fetch.ttfb));
    scores.insert("compression", compression(fetch.header("content-encoding")));
    scores
}
