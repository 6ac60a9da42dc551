//! 基础设施层：只暴露"抓取"与"查询标记"两种能力，不认识评分规则

pub mod document;
pub mod http_fetcher;

pub use document::{FormSummary, HtmlDocument, MarkupQuery};
pub use http_fetcher::{HttpFetcher, ReqwestFetcher};
