//! 进程调用器 - 基础设施层
//!
//! 唯一负责启动外部进程的地方，只暴露"运行命令"的能力。
//! 不认识采集设备、滤波工具，也不判断成功与否。

use std::fmt;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::InvokeError;

/// 外部命令描述（不可变）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// 完整参数列表（包含程序名）
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

/// 进程调用结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// 进程正常退出（无论退出码）
    Completed,
    /// 超时后被强制终止
    TimedOut { timeout: Duration },
    /// 找不到可执行文件
    LaunchFailed { os_code: i32 },
}

/// 单次外部调用的结果
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// 实际尝试执行的命令
    pub command: CommandSpec,
    pub exit_code: i32,
    pub stdout: Option<Vec<u8>>,
    pub stderr: Option<Vec<u8>>,
    pub outcome: CommandOutcome,
}

impl CommandResult {
    /// 正常退出的结果
    pub fn completed(
        command: CommandSpec,
        exit_code: i32,
        stdout: Option<Vec<u8>>,
        stderr: Option<Vec<u8>>,
    ) -> Self {
        Self {
            command,
            exit_code,
            stdout,
            stderr,
            outcome: CommandOutcome::Completed,
        }
    }

    pub fn timed_out(command: CommandSpec, timeout: Duration) -> Self {
        Self {
            command,
            exit_code: -1,
            stdout: None,
            stderr: None,
            outcome: CommandOutcome::TimedOut { timeout },
        }
    }

    pub fn launch_failed(command: CommandSpec, os_code: i32) -> Self {
        Self {
            command,
            exit_code: -1,
            stdout: None,
            stderr: None,
            outcome: CommandOutcome::LaunchFailed { os_code },
        }
    }

    /// 正常退出且退出码为 0
    pub fn success(&self) -> bool {
        self.outcome == CommandOutcome::Completed && self.exit_code == 0
    }

    /// stderr 的文本形式（用于日志）
    pub fn stderr_lossy(&self) -> String {
        self.stderr
            .as_deref()
            .map(|b| String::from_utf8_lossy(b).trim_end().to_string())
            .unwrap_or_default()
    }
}

/// 外部命令执行能力
///
/// 编排层和服务层只依赖这个 trait，测试中用假实现替换
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// 运行命令并等待退出，`timeout` 到期后强制终止
    async fn run(
        &self,
        command: &CommandSpec,
        timeout: Option<Duration>,
    ) -> Result<CommandResult, InvokeError>;

    /// 启动命令后立即返回，不等待也不收集输出
    fn launch(&self, command: &CommandSpec) -> Result<(), InvokeError>;
}

/// 基于 tokio 的系统进程调用器
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        command: &CommandSpec,
        timeout: Option<Duration>,
    ) -> Result<CommandResult, InvokeError> {
        debug!("执行命令: {} (超时: {:?})", command, timeout);

        // kill_on_drop 保证超时、出错或 future 被丢弃时子进程都会被终止
        let child = match Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let os_code = e.raw_os_error().unwrap_or(-1);
                warn!("找不到可执行文件: {} ({})", command.program, e);
                return Ok(CommandResult::launch_failed(command.clone(), os_code));
            }
            Err(e) => {
                return Err(InvokeError::Spawn {
                    command: command.to_string(),
                    source: e,
                })
            }
        };

        let waited = match timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(waited) => waited,
                Err(_) => {
                    warn!("命令超时 ({}s)，已强制终止: {}", limit.as_secs(), command);
                    return Ok(CommandResult::timed_out(command.clone(), limit));
                }
            },
            None => child.wait_with_output().await,
        };

        let output = waited.map_err(|e| InvokeError::Wait {
            command: command.to_string(),
            source: e,
        })?;

        let exit_code = output.status.code().unwrap_or(-1);
        debug!("命令退出: {} -> {}", command, exit_code);

        Ok(CommandResult::completed(
            command.clone(),
            exit_code,
            Some(output.stdout),
            Some(output.stderr),
        ))
    }

    fn launch(&self, command: &CommandSpec) -> Result<(), InvokeError> {
        debug!("后台启动: {}", command);
        Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .spawn()
            .map(|_child| ())
            .map_err(|e| InvokeError::Spawn {
                command: command.to_string(),
                source: e,
            })
    }
}
