//! 扫描执行器 - 编排层
//!
//! ## 职责
//!
//! 1. **顺序执行**：同一时刻只有一个外部进程（设备是单一共享硬件）
//! 2. **流程调度**：每个任务委托给 `JobFlow`
//! 3. **失败分流**：采集失败中止整次扫描，滤波失败只记录
//! 4. **查看器**：结束后（包括中止时）按规划顺序打开全部滤波文件
//! 5. **统计输出**：记录跳过/完成/失败数量

use std::path::PathBuf;

use tracing::{error, info};

use crate::config::Config;
use crate::error::{AppResult, CaptureError, SweepError};
use crate::infrastructure::CommandRunner;
use crate::models::SweepConfig;
use crate::services::viewer;
use crate::workflow::{CaptureJob, JobFlow, JobResult};

/// 单个任务的最终状态
#[derive(Debug)]
pub struct JobRecord {
    pub job: CaptureJob,
    pub result: JobResult,
}

/// 整次扫描的结果
#[derive(Debug, Default)]
pub struct SweepOutcome {
    /// 已处理的任务（按处理顺序）
    pub records: Vec<JobRecord>,
    /// 导致中止的采集失败
    pub aborted: Option<(CaptureJob, CaptureError)>,
    /// 规划的任务总数
    pub planned: usize,
}

/// 扫描统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    pub planned: usize,
    pub done: usize,
    pub skipped: usize,
    pub filter_failed: usize,
    pub capture_failed: usize,
}

impl SweepOutcome {
    pub fn stats(&self) -> SweepStats {
        let mut stats = SweepStats {
            planned: self.planned,
            capture_failed: usize::from(self.aborted.is_some()),
            ..Default::default()
        };
        for record in &self.records {
            match record.result {
                JobResult::Done => stats.done += 1,
                JobResult::Skipped => stats.skipped += 1,
                JobResult::FilterFailed(_) => stats.filter_failed += 1,
            }
        }
        stats
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    /// 采集失败转为致命错误，其余情况返回统计
    pub fn into_result(self) -> AppResult<SweepStats> {
        let stats = self.stats();
        match self.aborted {
            Some((_, e)) => Err(SweepError::Capture(e)),
            None => Ok(stats),
        }
    }
}

/// 扫描执行器
pub struct SweepRunner<'a, R> {
    runner: &'a R,
    config: &'a Config,
    sweep: &'a SweepConfig,
}

impl<'a, R: CommandRunner> SweepRunner<'a, R> {
    pub fn new(runner: &'a R, config: &'a Config, sweep: &'a SweepConfig) -> Self {
        Self {
            runner,
            config,
            sweep,
        }
    }

    /// 依次处理全部任务
    ///
    /// 只有目录创建失败会返回 `Err`；采集失败记录在 `SweepOutcome::aborted` 中
    pub async fn run(&self, jobs: &[CaptureJob]) -> AppResult<SweepOutcome> {
        self.prepare_dirs().await?;

        let flow = JobFlow::new(self.runner, self.config, self.sweep);
        let mut outcome = SweepOutcome {
            planned: jobs.len(),
            ..Default::default()
        };

        for (index, job) in jobs.iter().enumerate() {
            log_job_start(index + 1, jobs.len(), job);

            match flow.run(job).await {
                Ok(result) => outcome.records.push(JobRecord {
                    job: job.clone(),
                    result,
                }),
                Err(e) => {
                    error!("{} ❌ 采集失败，停止扫描: {}", job, e);
                    if e.needs_device_restart() {
                        error!("🔌 请先重启采集设备，再重新运行相同的参数继续扫描");
                    }
                    outcome.aborted = Some((job.clone(), e));
                    break;
                }
            }
        }

        if self.sweep.show_viewer {
            let paths: Vec<PathBuf> = jobs.iter().map(|j| j.filtered_path.clone()).collect();
            viewer::show(self.runner, &self.config.viewer_bin, &paths);
        }

        Ok(outcome)
    }

    async fn prepare_dirs(&self) -> AppResult<()> {
        if !self.sweep.filter_only {
            tokio::fs::create_dir_all(&self.config.raw_dir)
                .await
                .map_err(|e| SweepError::file(&self.config.raw_dir, e))?;
        }
        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|e| SweepError::file(&self.config.output_dir, e))?;
        Ok(())
    }
}

fn log_job_start(index: usize, total: usize, job: &CaptureJob) {
    info!("\n{}", "─".repeat(30));
    info!("处理第 {}/{} 个任务 {}", index, total, job);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{exit_with, healthy_response, scan_target, FakeRunner};
    use crate::workflow::{plan, SweepLayout};
    use std::path::Path;

    fn config_in(dir: &Path) -> Config {
        Config {
            raw_dir: dir.join("raw"),
            output_dir: dir.to_path_buf(),
            warn_file: dir.join("warn.txt").to_string_lossy().into_owned(),
            ..Config::default()
        }
    }

    fn jobs_for(config: &Config, sweep: &SweepConfig) -> Vec<CaptureJob> {
        plan(sweep, &SweepLayout::new(&config.raw_dir, &config.output_dir))
    }

    fn scans(runner: &FakeRunner) -> usize {
        runner.calls().iter().filter(|c| scan_target(c).is_some()).count()
    }

    #[tokio::test]
    async fn test_completed_job_is_skipped_on_rerun() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let sweep = SweepConfig {
            rotation_count: Some(4),
            curve_angles: vec![10],
            ..Default::default()
        };
        let jobs = jobs_for(&config, &sweep);
        let done = jobs.iter().find(|j| j.rotation_degrees == 90).unwrap();
        std::fs::write(&done.filtered_path, b"filtered").unwrap();

        let runner = FakeRunner::healthy();
        let outcome = SweepRunner::new(&runner, &config, &sweep)
            .run(&jobs)
            .await
            .unwrap();

        let stats = outcome.stats();
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.done, 3);
        assert_eq!(scans(&runner), 3);

        let touched_done_job = runner.calls().iter().any(|c| {
            c.args.iter().any(|a| a.contains("cur10rot090"))
                || (c.args.first().map(String::as_str) == Some("set")
                    && c.args.get(2).map(String::as_str) == Some("90"))
        });
        assert!(!touched_done_job);
        assert!(dir.path().join("raw").is_dir());
    }

    #[tokio::test]
    async fn test_bad_ack_stops_the_sweep() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let sweep = SweepConfig {
            rotation_count: Some(4),
            ..Default::default()
        };
        let jobs = jobs_for(&config, &sweep);

        let runner = FakeRunner::new(|cmd| match scan_target(cmd) {
            Some(path) => {
                std::fs::write(path, b"data").unwrap();
                let ack = format!("Starting scan\nFile saved to {}\n ", path.display());
                Ok(crate::test_utils::ok_with_stdout(cmd, &ack))
            }
            None => healthy_response(cmd),
        });

        let outcome = SweepRunner::new(&runner, &config, &sweep)
            .run(&jobs)
            .await
            .unwrap();

        assert!(outcome.is_aborted());
        assert!(outcome.records.is_empty());
        assert_eq!(scans(&runner), 1);
        assert!(runner.calls().iter().all(|c| c.program != "filter"));

        match outcome.into_result() {
            Err(SweepError::Capture(CaptureError::UnexpectedAcknowledgment {
                actual,
                expected,
            })) => {
                assert!(actual.ends_with("\n "));
                assert!(expected.ends_with(".pcd\n"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_filter_failure_does_not_stop_the_sweep() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let sweep = SweepConfig {
            rotation_count: Some(2),
            curve_angles: vec![0, 20],
            ..Default::default()
        };
        let jobs = jobs_for(&config, &sweep);

        let runner = FakeRunner::new(|cmd| {
            if cmd.program == "filter" && cmd.args.iter().any(|a| a.contains("cur00rot000")) {
                Ok(exit_with(cmd, 1, "alignment failed"))
            } else {
                healthy_response(cmd)
            }
        });

        let outcome = SweepRunner::new(&runner, &config, &sweep)
            .run(&jobs)
            .await
            .unwrap();

        let stats = outcome.into_result().unwrap();
        assert_eq!(stats.planned, 4);
        assert_eq!(stats.filter_failed, 1);
        assert_eq!(stats.done, 3);
        assert_eq!(stats.capture_failed, 0);
    }

    #[tokio::test]
    async fn test_viewer_gets_every_planned_path_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let sweep = SweepConfig {
            rotation_count: Some(3),
            curve_angles: vec![0, 20],
            show_viewer: true,
            ..Default::default()
        };
        let jobs = jobs_for(&config, &sweep);

        // 第二个采集失败，查看器仍然收到全部 6 个路径
        let runner = FakeRunner::new(|cmd| match scan_target(cmd) {
            Some(path) if path.ends_with("cur00rot120.pcd") => Ok(exit_with(cmd, 1, "")),
            _ => healthy_response(cmd),
        });

        let outcome = SweepRunner::new(&runner, &config, &sweep)
            .run(&jobs)
            .await
            .unwrap();
        assert!(outcome.is_aborted());

        let launches = runner.launches();
        assert_eq!(launches.len(), 1);
        assert_eq!(launches[0].program, "pcl_viewer");
        let expected: Vec<String> = jobs
            .iter()
            .map(|j| j.filtered_path.to_string_lossy().into_owned())
            .collect();
        assert_eq!(launches[0].args, expected);
    }

    #[tokio::test]
    async fn test_filter_only_never_captures() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let sweep = SweepConfig {
            rotation_count: Some(2),
            filter_only: true,
            cutoff_height: Some(120),
            ..Default::default()
        };
        let jobs = jobs_for(&config, &sweep);

        let runner = FakeRunner::healthy();
        let stats = SweepRunner::new(&runner, &config, &sweep)
            .run(&jobs)
            .await
            .unwrap()
            .into_result()
            .unwrap();

        assert_eq!(stats.done, 2);
        assert!(runner.calls().iter().all(|c| c.program == "filter"));
        assert!(runner
            .calls()
            .iter()
            .all(|c| c.args.contains(&"--cutoff-height".to_string())));
        assert!(runner.launches().is_empty());
    }
}
