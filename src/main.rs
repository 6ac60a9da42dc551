use anyhow::Result;
use site_rater::utils::logging;
use site_rater::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 命令行参数即目标站点；为空时读取 TARGETS_FILE
    let targets: Vec<String> = std::env::args().skip(1).collect();

    // 初始化并运行应用
    let report = App::initialize(config)?.run(targets).await?;

    if report.success_count == 0 {
        tracing::warn!("⚠️ 所有站点均分析失败");
    }

    Ok(())
}
