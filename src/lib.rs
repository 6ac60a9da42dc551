//! # Site Rater
//!
//! 并发抓取一批网站并按性能、设计、SEO、无障碍四个类别打分的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 只暴露能力，不认识评分规则
//! - `HttpFetcher` / `ReqwestFetcher` - 单次 GET，记录耗时、TTFB、响应头与响应体
//! - `MarkupQuery` / `HtmlDocument` - 基于 scraper 的标记查询
//!
//! ### ② 业务能力层（Services）
//! - `services/evaluators` - 各项指标的评分规则，全部为纯函数
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个站点"的完整处理流程
//! - `SiteAnalyzer` - 规范化 → 抓取 → 解析 → 评分，任何失败都转为失败报告
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/dispatcher` - 有界并发调度，隔离单个站点的失败
//! - `orchestrator/collector` - 汇总成功数与平均分
//! - `orchestrator/batch_processor` - 应用入口，负责目标加载与报告写出
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{HttpFetcher, ReqwestFetcher};
pub use models::{BatchReport, Category, FetchResult, SiteReport};
pub use orchestrator::{analyze_batch, App, BatchObserver, NoopObserver, RequestDispatcher};
pub use workflow::SiteAnalyzer;
