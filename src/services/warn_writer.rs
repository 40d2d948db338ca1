//! 警告写入服务 - 业务能力层
//!
//! 只负责"写 warn.txt"能力，不关心流程

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 警告写入服务
///
/// 职责：
/// - 把滤波失败的任务追加到 warn.txt，方便之后用 `--filter-only` 补跑
/// - 只处理单个任务
pub struct WarnWriter {
    warn_file_path: PathBuf,
}

impl WarnWriter {
    /// 创建新的警告写入服务
    pub fn new() -> Self {
        Self {
            warn_file_path: PathBuf::from("warn.txt"),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.warn_file_path
    }

    /// 写入警告信息
    ///
    /// # 参数
    /// - `raw_path`: 原始点云路径
    /// - `reason`: 失败原因
    pub fn write(&self, raw_path: &Path, reason: &str) -> Result<()> {
        debug!("写入警告: {} | {}", raw_path.display(), reason);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)?;

        let warn_msg = format!(
            "{} | {} | {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            raw_path.display(),
            reason.replace('\n', " ")
        );

        file.write_all(warn_msg.as_bytes())?;

        Ok(())
    }
}

impl Default for WarnWriter {
    fn default() -> Self {
        Self::new()
    }
}
