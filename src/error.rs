use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// 应用程序错误类型（致命）
///
/// 滤波失败在编排层被降级为警告，不会出现在这里
#[derive(Debug, Error)]
pub enum SweepError {
    /// 采集设备错误
    #[error("采集错误: {0}")]
    Capture(#[from] CaptureError),
    /// 文件操作错误
    #[error("文件错误 ({}): {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 进程调用错误
///
/// 仅包含"找不到可执行文件"以外的启动失败；
/// 找不到的情况通过 `CommandOutcome::LaunchFailed` 返回给调用方。
#[derive(Debug, Error)]
pub enum InvokeError {
    /// 启动进程失败
    #[error("无法启动 `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// 等待进程退出失败
    #[error("等待 `{command}` 退出失败: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// 采集设备错误
///
/// 每一种校验失败都是独立的变体，按校验顺序排列
#[derive(Debug, Error)]
pub enum CaptureError {
    /// 可执行文件不存在
    #[error("无法启动采集设备命令 `{command}` (OS 错误码 {os_code}): 请确认可执行文件在 PATH 中")]
    LaunchFailed { command: String, os_code: i32 },
    /// 采集超时
    #[error(
        "采集设备命令 `{command}` 在 {}s 内未完成: 请先重启采集设备再重新运行",
        .timeout.as_secs()
    )]
    TimedOut { command: String, timeout: Duration },
    /// 采集命令返回非零退出码
    #[error("non-zero exit from capture device: 退出码 {exit_code}, stderr: {stderr}")]
    NonZeroExit { exit_code: i32, stderr: String },
    /// 没有捕获到任何输出
    #[error("no acknowledgment output: 采集设备没有输出确认信息")]
    NoAcknowledgment,
    /// 确认信息与预期不一致
    #[error("unexpected acknowledgment: 实际 {actual:?}, 预期 {expected:?}")]
    UnexpectedAcknowledgment { actual: String, expected: String },
    /// 点云文件未生成
    #[error("artifact not produced: {}", .path.display())]
    ArtifactMissing { path: PathBuf },
    /// 点云文件为空
    #[error("empty artifact: {}", .path.display())]
    EmptyArtifact { path: PathBuf },
    /// 其他进程错误
    #[error(transparent)]
    Invoke(#[from] InvokeError),
    /// 读取点云文件元数据失败
    #[error("无法读取点云文件 {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 滤波工具错误（非致命）
#[derive(Debug, Error)]
pub enum FilterError {
    /// 滤波工具不存在
    #[error(
        "无法启动滤波工具 `{command}` (OS 错误码 {os_code}): 滤波工具未安装或不在 PATH 中，请检查环境变量 FILTER_BIN"
    )]
    LaunchFailed { command: String, os_code: i32 },
    /// 滤波工具返回非零退出码
    #[error("滤波工具 `{command}` 返回退出码 {exit_code}: {stderr}")]
    NonZeroExit {
        command: String,
        exit_code: i32,
        stderr: String,
    },
    /// 其他进程错误
    #[error(transparent)]
    Invoke(#[from] InvokeError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 扫描数量必须大于 0
    #[error("{field} 必须大于 0")]
    ZeroCount { field: &'static str },
    /// 同时指定了弯曲角度列表和弯曲扫描数量
    #[error("curve_angles 和 curve_scans 不能同时指定")]
    ConflictingCurves,
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl SweepError {
    /// 创建文件错误
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SweepError::File {
            path: path.into(),
            source,
        }
    }
}

impl CaptureError {
    /// 是否需要操作员重启硬件
    pub fn needs_device_restart(&self) -> bool {
        matches!(self, CaptureError::TimedOut { .. })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, SweepError>;
