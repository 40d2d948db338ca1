//! 单个采集任务的处理流程 - 流程层
//!
//! 状态: `Planned → {Skipped | Capturing → Filtering → Done} | Failed`
//!
//! - 仅滤波模式：跳过采集，直接用已有的原始点云滤波（不检查其是否存在）
//! - 滤波结果已存在：跳过（断点续扫）
//! - 否则：采集 → 滤波
//!
//! 采集失败原样返回给编排层，由编排层中止扫描；
//! 滤波失败在这里降级为警告，写入 warn.txt。

use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{CaptureError, FilterError};
use crate::infrastructure::CommandRunner;
use crate::models::SweepConfig;
use crate::services::{filter_service, DeviceDriver, FilterService, WarnWriter};
use crate::workflow::capture_job::CaptureJob;

/// 任务处理结果
#[derive(Debug)]
pub enum JobResult {
    /// 滤波结果已存在，未做任何调用
    Skipped,
    /// 采集（如需要）和滤波都成功
    Done,
    /// 滤波失败（非致命）
    FilterFailed(FilterError),
}

impl JobResult {
    pub fn is_skipped(&self) -> bool {
        matches!(self, JobResult::Skipped)
    }
}

/// 任务处理流程
///
/// - 决定采集、跳过还是只滤波
/// - 不持有进程资源，只依赖 services
pub struct JobFlow<'a, R> {
    device: DeviceDriver<'a, R>,
    filter: FilterService<'a, R>,
    warn_writer: WarnWriter,
    filter_only: bool,
}

impl<'a, R: CommandRunner> JobFlow<'a, R> {
    pub fn new(runner: &'a R, config: &Config, sweep: &SweepConfig) -> Self {
        Self {
            device: DeviceDriver::new(runner, config.treed_bin.clone(), config.capture_timeout),
            filter: FilterService::new(runner, config.filter_bin.clone(), sweep.cutoff_height),
            warn_writer: WarnWriter::with_path(&config.warn_file),
            filter_only: sweep.filter_only,
        }
    }

    pub async fn run(&self, job: &CaptureJob) -> Result<JobResult, CaptureError> {
        if !self.filter_only {
            if is_complete(job).await {
                info!("{} ⏭️ 已存在 {}，跳过", job, job.filtered_path.display());
                return Ok(JobResult::Skipped);
            }
            self.device.capture(job).await?;
        }

        match self.filter(job).await {
            Ok(()) => {
                info!("{} ✓ 滤波完成", job);
                Ok(JobResult::Done)
            }
            Err(e) => {
                warn!("{} ⚠️ 滤波失败，继续下一个任务: {}", job, e);
                if let Err(write_err) = self.warn_writer.write(&job.raw_path, &e.to_string()) {
                    error!(
                        "无法写入 {}: {}",
                        self.warn_writer.path().display(),
                        write_err
                    );
                }
                Ok(JobResult::FilterFailed(e))
            }
        }
    }

    async fn filter(&self, job: &CaptureJob) -> Result<(), FilterError> {
        let result = self
            .filter
            .filter(&job.raw_path, job.rotation_degrees, job.curve_degrees)
            .await?;
        filter_service::check(&result)
    }
}

/// 滤波结果文件存在即视为完成
///
/// 写到一半的文件也会被当作完成
async fn is_complete(job: &CaptureJob) -> bool {
    match tokio::fs::try_exists(&job.filtered_path).await {
        Ok(exists) => exists,
        Err(e) => {
            warn!(
                "{} ⚠️ 无法检查滤波结果 {}: {}，按未完成处理",
                job,
                job.filtered_path.display(),
                e
            );
            false
        }
    }
}
