//! 采集设备服务 - 业务能力层
//!
//! 只负责"在指定角度采集一次"的能力，不关心扫描顺序和断点续扫。
//!
//! 协议（严格按顺序，每一步等待上一步结束）：
//! 1. `treed set --table-rotation <deg>`
//! 2. `treed set --table-curve <deg>`
//! 3. `treed scan -o <path>`
//!
//! 前两步的结果不做校验，设备问题会在第 3 步暴露。

use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::CaptureError;
use crate::infrastructure::{CommandOutcome, CommandResult, CommandRunner, CommandSpec};
use crate::workflow::CaptureJob;

/// 设置旋转角命令
pub fn set_rotation_command(program: &str, rotation_degrees: u32) -> CommandSpec {
    CommandSpec::new(
        program,
        ["set".to_string(), "--table-rotation".to_string(), rotation_degrees.to_string()],
    )
}

/// 设置弯曲角命令
pub fn set_curve_command(program: &str, curve_degrees: i32) -> CommandSpec {
    CommandSpec::new(
        program,
        ["set".to_string(), "--table-curve".to_string(), curve_degrees.to_string()],
    )
}

/// 采集命令
pub fn scan_command(program: &str, path: &Path) -> CommandSpec {
    CommandSpec::new(
        program,
        ["scan".to_string(), "-o".to_string(), path.to_string_lossy().into_owned()],
    )
}

/// 采集成功时设备输出的确认信息
pub fn expected_acknowledgment(path: &Path) -> String {
    format!("Starting scan\nFile saved to {}\n", path.display())
}

/// 采集设备服务
///
/// 职责：
/// - 按协议驱动设备完成一次采集
/// - 校验确认信息和点云文件
/// - 每种失败都作为独立错误返回，不在内部重试
pub struct DeviceDriver<'a, R> {
    runner: &'a R,
    program: String,
    timeout: Duration,
}

impl<'a, R: CommandRunner> DeviceDriver<'a, R> {
    pub fn new(runner: &'a R, program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            runner,
            program: program.into(),
            timeout,
        }
    }

    /// 在任务指定的角度采集，结果写到 `job.raw_path`
    pub async fn capture(&self, job: &CaptureJob) -> Result<(), CaptureError> {
        let rotation = set_rotation_command(&self.program, job.rotation_degrees);
        self.configure(&rotation).await?;

        let curve = set_curve_command(&self.program, job.curve_degrees);
        self.configure(&curve).await?;

        info!("{} 📷 开始采集 -> {}", job, job.raw_path.display());
        let scan = scan_command(&self.program, &job.raw_path);
        let result = self.runner.run(&scan, Some(self.timeout)).await?;

        validate_capture(&result, &job.raw_path).await?;
        info!("{} ✓ 采集完成", job);
        Ok(())
    }

    /// 发送配置命令，结果只记录不校验
    async fn configure(&self, command: &CommandSpec) -> Result<(), CaptureError> {
        let result = self.runner.run(command, Some(self.timeout)).await?;
        if result.success() {
            debug!("配置命令完成: {}", command);
            return Ok(());
        }
        match result.outcome {
            CommandOutcome::Completed => {
                warn!(
                    "⚠️ 配置命令返回退出码 {}: {} {}",
                    result.exit_code,
                    command,
                    result.stderr_lossy()
                );
            }
            CommandOutcome::TimedOut { timeout } => {
                warn!("⚠️ 配置命令超时 ({}s): {}", timeout.as_secs(), command);
            }
            CommandOutcome::LaunchFailed { os_code } => {
                warn!("⚠️ 配置命令无法启动 (OS 错误码 {}): {}", os_code, command);
            }
        }
        Ok(())
    }
}

/// 按顺序校验采集结果，第一个不满足的条件决定错误类型
pub async fn validate_capture(result: &CommandResult, path: &Path) -> Result<(), CaptureError> {
    match result.outcome {
        CommandOutcome::LaunchFailed { os_code } => {
            return Err(CaptureError::LaunchFailed {
                command: result.command.to_string(),
                os_code,
            })
        }
        CommandOutcome::TimedOut { timeout } => {
            return Err(CaptureError::TimedOut {
                command: result.command.to_string(),
                timeout,
            })
        }
        CommandOutcome::Completed => {}
    }

    if result.exit_code != 0 {
        return Err(CaptureError::NonZeroExit {
            exit_code: result.exit_code,
            stderr: result.stderr_lossy(),
        });
    }

    let stdout = match result.stdout.as_deref() {
        Some(bytes) if !bytes.is_empty() => String::from_utf8_lossy(bytes).into_owned(),
        _ => return Err(CaptureError::NoAcknowledgment),
    };

    let expected = expected_acknowledgment(path);
    if stdout != expected {
        return Err(CaptureError::UnexpectedAcknowledgment {
            actual: stdout,
            expected,
        });
    }

    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CaptureError::ArtifactMissing {
                path: path.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(CaptureError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    if metadata.len() == 0 {
        return Err(CaptureError::EmptyArtifact {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}
