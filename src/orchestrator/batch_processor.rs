//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：按配置创建 HTTP 抓取器和日志观察者
//! 2. **目标加载**：命令行参数优先，否则读取 `targets_file`
//! 3. **批量分析**：委托 `RequestDispatcher` 完成并发评分
//! 4. **报告输出**：将 `BatchReport` 以格式化 JSON 写入 `output_report_file`

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::FileError;
use crate::infrastructure::{HttpFetcher, ReqwestFetcher};
use crate::models::{load_targets, render_json, BatchReport};
use crate::orchestrator::dispatcher::RequestDispatcher;
use crate::orchestrator::observer::{BatchObserver, TracingObserver};

/// 应用主结构
pub struct App {
    config: Config,
    dispatcher: RequestDispatcher,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let fetcher = ReqwestFetcher::from_config(&config).context("初始化 HTTP 抓取器失败")?;
        let observer = TracingObserver::new(config.verbose_logging);
        Ok(Self::with_parts(config, Arc::new(fetcher), Arc::new(observer)))
    }

    /// 使用指定的抓取器和观察者组装应用
    pub fn with_parts(
        config: Config,
        fetcher: Arc<dyn HttpFetcher>,
        observer: Arc<dyn BatchObserver>,
    ) -> Self {
        Self {
            config,
            dispatcher: RequestDispatcher::new(fetcher, observer),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 运行应用主逻辑
    ///
    /// `cli_targets` 非空时直接使用，否则从配置的目标文件加载。
    pub async fn run(&self, cli_targets: Vec<String>) -> Result<BatchReport> {
        let targets = self.resolve_targets(cli_targets).await?;

        let report = self
            .dispatcher
            .run(
                &targets,
                self.config.max_concurrency,
                self.config.request_timeout(),
            )
            .await
            .context("批量分析失败")?;

        self.write_report(&report).await?;
        Ok(report)
    }

    async fn resolve_targets(&self, cli_targets: Vec<String>) -> Result<Vec<String>> {
        if !cli_targets.is_empty() {
            info!("📁 使用命令行提供的 {} 个目标站点", cli_targets.len());
            return Ok(cli_targets);
        }

        info!("\n📁 正在读取目标站点列表: {}", self.config.targets_file);
        let targets = load_targets(Path::new(&self.config.targets_file))
            .await
            .with_context(|| format!("加载目标站点失败: {}", self.config.targets_file))?;
        if targets.is_empty() {
            warn!("⚠️ 目标文件中没有任何站点: {}", self.config.targets_file);
        }
        Ok(targets)
    }

    async fn write_report(&self, report: &BatchReport) -> Result<()> {
        let path = &self.config.output_report_file;
        let json = render_json(report).context("序列化报告失败")?;
        tokio::fs::write(path, json)
            .await
            .map_err(|source| FileError::WriteFailed {
                path: path.clone(),
                source,
            })?;
        info!("\n报告已保存至: {}", path);
        Ok(())
    }
}
