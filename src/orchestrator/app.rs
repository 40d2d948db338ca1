//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：校验参数、输出启动信息
//! 2. **任务规划**：把扫描参数展开为采集任务列表
//! 3. **资源管理**：持有进程调用器，整个扫描期间只有这一个
//! 4. **全局统计**：汇总结果并决定退出状态
//!
//! 单个任务的细节委托给 `sweep_runner`。

use anyhow::Result;
use crate::config::Config;
use crate::infrastructure::{CommandRunner, SystemRunner};
use crate::models::SweepConfig;
use crate::orchestrator::sweep_runner::{SweepRunner, SweepStats};
use crate::utils::logging;
use crate::workflow::{plan, CaptureJob, SweepLayout};

/// 应用主结构
pub struct App<R = SystemRunner> {
    config: Config,
    sweep: SweepConfig,
    runner: R,
}

impl App<SystemRunner> {
    /// 初始化应用
    pub fn initialize(config: Config, sweep: SweepConfig) -> Result<Self> {
        Self::with_runner(config, sweep, SystemRunner::new())
    }
}

impl<R: CommandRunner> App<R> {
    /// 使用指定的进程调用器初始化
    pub fn with_runner(config: Config, sweep: SweepConfig, runner: R) -> Result<Self> {
        sweep.validate()?;
        logging::log_startup(&config, &sweep);

        Ok(Self {
            config,
            sweep,
            runner,
        })
    }

    /// 规划出的全部任务
    pub fn jobs(&self) -> Vec<CaptureJob> {
        let layout = SweepLayout::new(&self.config.raw_dir, &self.config.output_dir);
        plan(&self.sweep, &layout)
    }

    /// 运行扫描
    ///
    /// 采集失败时返回错误（进程以非零状态退出），滤波失败不影响返回值
    pub async fn run(&self) -> Result<SweepStats> {
        let jobs = self.jobs();
        logging::log_jobs_planned(&jobs);

        let outcome = SweepRunner::new(&self.runner, &self.config, &self.sweep)
            .run(&jobs)
            .await?;

        let stats = outcome.stats();
        logging::print_final_stats(&stats, &self.config.output_log_file);

        Ok(outcome.into_result()?)
    }
}
