//! # TreeD Sweep
//!
//! 驱动 TreeD 转台扫描仪完成多轴扫描，并对每个点云调用滤波工具
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 唯一启动外部进程的地方，只暴露能力
//! - `CommandRunner` - 运行命令（可超时）/ 后台启动命令
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个任务
//! - `DeviceDriver` - 设置角度 + 采集 + 校验
//! - `FilterService` - 滤波
//! - `viewer` - 打开点云查看器
//! - `WarnWriter` - 写 warn.txt 能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个任务"的完整处理流程
//! - `sweep_planner` - 扫描参数 → 有序任务列表
//! - `CaptureJob` - 任务及其定宽文件名
//! - `JobFlow` - 跳过 / 采集 → 滤波
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用入口，规划任务并汇总结果
//! - `orchestrator/sweep_runner` - 顺序执行任务，决定中止还是继续
//!
//! ## 模块结构

pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppResult, CaptureError, FilterError, SweepError};
pub use infrastructure::{CommandOutcome, CommandResult, CommandRunner, CommandSpec, SystemRunner};
pub use models::SweepConfig;
pub use orchestrator::{App, SweepOutcome, SweepRunner, SweepStats};
pub use workflow::{plan, CaptureJob, JobResult, SweepLayout};
