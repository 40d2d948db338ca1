use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::utils::logging;

/// 初始化日志
///
/// 先写日志文件头，之后的日志同时输出到终端和日志文件。
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info
pub fn init(verbose: bool, log_file_path: &str) -> Result<()> {
    logging::init_log_file(log_file_path)?;
    let file = open_log_file(Path::new(log_file_path))?;

    let _ = subscriber(verbose, file).try_init();
    Ok(())
}

/// 以追加模式打开日志文件
pub fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("无法打开日志文件: {}", path.display()))
}

/// 终端 + 日志文件两路输出
pub fn subscriber(verbose: bool, log_file: File) -> impl Subscriber + Send + Sync + 'static {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_writer(Mutex::new(log_file))
                .with_ansi(false)
                .with_target(false),
        )
}
