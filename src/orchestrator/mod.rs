//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量调度和结果汇总，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 加载目标站点列表
//! - 写出 JSON 报告
//!
//! ### `dispatcher` - 批量站点调度器
//! - 校验输入
//! - 控制并发数量（Semaphore）
//! - 隔离单个站点的失败与 panic
//!
//! ### `collector` - 结果收集器
//! - 按完成顺序收集报告
//! - 计算成功数与各类别平均分
//!
//! ### `observer` - 进度观察者
//! - 批次开始、单站点完成、批次结束三个回调
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (App：配置、文件、报告)
//!     ↓
//! dispatcher (处理 Vec<target>)
//!     ↓
//! workflow::SiteAnalyzer (处理单个站点)
//!     ↓
//! services::evaluators (评分规则)
//!     ↓
//! infrastructure (HttpFetcher / HtmlDocument)
//! ```

pub mod batch_processor;
pub mod collector;
pub mod dispatcher;
pub mod observer;

// 重新导出主要类型
pub use batch_processor::App;
pub use collector::{average_scores, ResultCollector};
pub use dispatcher::{analyze_batch, RequestDispatcher};
pub use observer::{BatchObserver, NoopObserver, TracingObserver};
