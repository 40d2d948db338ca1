//! 滤波服务 - 业务能力层
//!
//! 只负责"对一个原始点云调用一次滤波工具"，不关心流程。
//! 滤波是 CPU 密集型任务，不设超时。

use std::path::Path;

use tracing::info;

use crate::error::FilterError;
use crate::infrastructure::{CommandOutcome, CommandResult, CommandRunner, CommandSpec};

/// 滤波命令: `filter -r <rot> --curve <cur> [--cutoff-height <h>] <path>`
pub fn filter_command(
    program: &str,
    path: &Path,
    rotation_degrees: u32,
    curve_degrees: i32,
    cutoff_height: Option<i32>,
) -> CommandSpec {
    let mut args = vec![
        "-r".to_string(),
        rotation_degrees.to_string(),
        "--curve".to_string(),
        curve_degrees.to_string(),
    ];
    if let Some(height) = cutoff_height {
        args.push("--cutoff-height".to_string());
        args.push(height.to_string());
    }
    args.push(path.to_string_lossy().into_owned());
    CommandSpec::new(program, args)
}

/// 滤波服务
pub struct FilterService<'a, R> {
    runner: &'a R,
    program: String,
    cutoff_height: Option<i32>,
}

impl<'a, R: CommandRunner> FilterService<'a, R> {
    pub fn new(runner: &'a R, program: impl Into<String>, cutoff_height: Option<i32>) -> Self {
        Self {
            runner,
            program: program.into(),
            cutoff_height,
        }
    }

    /// 调用滤波工具，原样返回结果
    pub async fn filter(
        &self,
        path: &Path,
        rotation_degrees: u32,
        curve_degrees: i32,
    ) -> Result<CommandResult, FilterError> {
        let command = filter_command(
            &self.program,
            path,
            rotation_degrees,
            curve_degrees,
            self.cutoff_height,
        );
        info!("🧹 滤波: {}", command);
        let result = self.runner.run(&command, None).await?;
        info!("滤波退出码: {}", result.exit_code);
        Ok(result)
    }
}

/// 把滤波结果归类为成功或失败
pub fn check(result: &CommandResult) -> Result<(), FilterError> {
    let command = result.command.to_string();
    match result.outcome {
        CommandOutcome::LaunchFailed { os_code } => Err(FilterError::LaunchFailed { command, os_code }),
        CommandOutcome::Completed if result.exit_code == 0 => Ok(()),
        // 滤波不设超时，TimedOut 只会带着 -1 退出码出现
        CommandOutcome::Completed | CommandOutcome::TimedOut { .. } => Err(FilterError::NonZeroExit {
            command,
            exit_code: result.exit_code,
            stderr: result.stderr_lossy(),
        }),
    }
}
