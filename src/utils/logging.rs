use anyhow::Result;
/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use std::fs;
use tracing::info;

use crate::config::Config;
use crate::models::SweepConfig;
use crate::orchestrator::SweepStats;
use crate::workflow::CaptureJob;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n扫描日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, sweep: &SweepConfig) {
    info!("{}", "=".repeat(60));
    if sweep.filter_only {
        info!("🚀 程序启动 - 仅滤波模式");
    } else {
        info!("🚀 程序启动 - 采集 + 滤波模式");
    }
    info!("📷 采集设备: {} (超时 {}s)", config.treed_bin, config.capture_timeout.as_secs());
    info!("🧹 滤波工具: {}", config.filter_bin);
    info!("📁 原始点云: {}", config.raw_dir.display());
    if config.output_dir.as_os_str().is_empty() {
        info!("📁 滤波结果: 当前目录");
    } else {
        info!("📁 滤波结果: {}", config.output_dir.display());
    }
    info!("{}", "=".repeat(60));
}

/// 记录任务规划信息
pub fn log_jobs_planned(jobs: &[CaptureJob]) {
    info!("✓ 共规划 {} 个采集任务", jobs.len());
    info!("💡 已存在滤波结果的任务会被跳过\n");
}

/// 打印最终统计信息
///
/// # 参数
/// - `stats`: 扫描统计
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(stats: &SweepStats, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 扫描统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 完成: {}/{}", stats.done, stats.planned);
    info!("⏭️ 跳过: {}", stats.skipped);
    info!("⚠️ 滤波失败: {}", stats.filter_failed);
    info!("❌ 采集失败: {}", stats.capture_failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}
