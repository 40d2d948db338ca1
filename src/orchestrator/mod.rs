//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 规划任务列表（Vec<CaptureJob>）
//! - 持有进程调用器
//! - 输出全局统计信息
//!
//! ### `sweep_runner` - 扫描执行器
//! - 顺序遍历采集任务
//! - 采集失败中止，滤波失败继续
//! - 结束后打开查看器
//!
//! ## 层次关系
//!
//! ```text
//! app (规划 Vec<CaptureJob>)
//!     ↓
//! sweep_runner (遍历 Vec<CaptureJob>)
//!     ↓
//! workflow::JobFlow (处理单个 CaptureJob)
//!     ↓
//! services (能力层：device / filter / viewer / warn)
//!     ↓
//! infrastructure (基础设施：CommandRunner)
//! ```

pub mod app;
pub mod sweep_runner;

// 重新导出主要类型
pub use app::App;
pub use sweep_runner::{JobRecord, SweepOutcome, SweepRunner, SweepStats};
