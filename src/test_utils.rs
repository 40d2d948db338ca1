//! 单元测试辅助：可编程的假命令执行器

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::InvokeError;
use crate::infrastructure::{CommandResult, CommandRunner, CommandSpec};

type Responder = Box<dyn Fn(&CommandSpec) -> Result<CommandResult, InvokeError> + Send + Sync>;

/// 记录所有调用并按规则返回结果
pub struct FakeRunner {
    responder: Responder,
    calls: Mutex<Vec<(CommandSpec, Option<Duration>)>>,
    launches: Mutex<Vec<CommandSpec>>,
}

impl FakeRunner {
    pub fn new(
        responder: impl Fn(&CommandSpec) -> Result<CommandResult, InvokeError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
            launches: Mutex::new(Vec::new()),
        }
    }

    /// 模拟一台正常工作的设备和滤波工具
    pub fn healthy() -> Self {
        Self::new(healthy_response)
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().iter().map(|(c, _)| c.clone()).collect()
    }

    pub fn timeouts(&self) -> Vec<Option<Duration>> {
        self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }

    pub fn launches(&self) -> Vec<CommandSpec> {
        self.launches.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRunner {
    async fn run(
        &self,
        command: &CommandSpec,
        timeout: Option<Duration>,
    ) -> Result<CommandResult, InvokeError> {
        self.calls.lock().unwrap().push((command.clone(), timeout));
        (self.responder)(command)
    }

    fn launch(&self, command: &CommandSpec) -> Result<(), InvokeError> {
        self.launches.lock().unwrap().push(command.clone());
        Ok(())
    }
}

/// `scan -o <path>` 写出非空文件并返回标准确认信息，其余命令返回 0
pub fn healthy_response(command: &CommandSpec) -> Result<CommandResult, InvokeError> {
    if let Some(path) = scan_target(command) {
        std::fs::write(path, b"# .PCD v0.7\n").unwrap();
        return Ok(ok_with_stdout(command, &ack_for(path)));
    }
    Ok(ok_with_stdout(command, ""))
}

/// 如果是采集命令，返回输出路径
pub fn scan_target(command: &CommandSpec) -> Option<&Path> {
    match command.args.as_slice() {
        [sub, flag, path] if sub == "scan" && flag == "-o" => Some(Path::new(path)),
        _ => None,
    }
}

pub fn ack_for(path: &Path) -> String {
    format!("Starting scan\nFile saved to {}\n", path.display())
}

pub fn ok_with_stdout(command: &CommandSpec, stdout: &str) -> CommandResult {
    CommandResult::completed(
        command.clone(),
        0,
        Some(stdout.as_bytes().to_vec()),
        Some(Vec::new()),
    )
}

pub fn exit_with(command: &CommandSpec, code: i32, stderr: &str) -> CommandResult {
    CommandResult::completed(
        command.clone(),
        code,
        Some(Vec::new()),
        Some(stderr.as_bytes().to_vec()),
    )
}
