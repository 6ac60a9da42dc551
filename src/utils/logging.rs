/// 日志工具模块
///
/// 提供日志初始化以及批次进度、统计信息的输出函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::BatchReport;

/// 初始化全局日志订阅者
///
/// 优先使用 `RUST_LOG`，未设置时按 `verbose` 选择 `debug` 或 `info`。
/// 重复调用不会报错（测试中可能多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录批次启动信息
///
/// # 参数
/// - `max_concurrency`: 最大并发数
pub fn log_startup(max_concurrency: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 开始站点评分 - 并发分析模式");
    info!("📊 最大并发数: {}", max_concurrency);
    info!("{}", "=".repeat(60));
}

/// 记录目标站点加载信息
///
/// # 参数
/// - `total`: 站点总数
/// - `max_concurrency`: 最大并发数
pub fn log_targets_loaded(total: usize, max_concurrency: usize) {
    info!("✓ 共 {} 个待分析的站点", total);
    info!("📋 同时最多分析 {} 个，完成一个立即补上下一个\n", max_concurrency);
}

/// 打印批次最终统计信息
pub fn print_final_stats(report: &BatchReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部站点分析完成");
    info!("完成时间: {}", report.timestamp);
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", report.success_count, report.total_targets);
    info!("❌ 失败: {}", report.failure_count());
    info!("⏱️ 总耗时: {:.2} 秒", report.elapsed_seconds);

    if report.average_scores.is_empty() {
        info!("⚠️ 没有成功的站点，无平均分");
    } else {
        info!("📈 平均分:");
        for (category, score) in &report.average_scores {
            info!("   {:<14} {:.2}", category.as_str(), score);
        }
    }

    for failure in report.failures() {
        info!(
            "   ✗ {}: {}",
            failure.url,
            truncate_text(failure.error_message().unwrap_or_default(), 80)
        );
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_text("请求超时了", 2), "请求...");
        assert_eq!(truncate_text("short", 10), "short");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
