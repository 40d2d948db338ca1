//! 扫描规划 - 流程层
//!
//! 把扫描参数展开为有序的采集任务列表。纯函数，不访问文件系统。
//!
//! 顺序：外层按给定顺序遍历弯曲角，内层按升序遍历旋转角。
//! 文件生成顺序和查看器参数顺序都依赖这一顺序。

use crate::models::SweepConfig;
use crate::workflow::capture_job::{CaptureJob, SweepLayout};

/// 一整圈
const FULL_TURN: u32 = 360;
/// 弯曲轴的扫描范围（度）
const CURVE_RANGE: u32 = 100;

/// 旋转步长: `max(1, 360 / count)`，未指定次数时为 360（只扫 0 度）
///
/// 保留整数截断：count = 7 时步长为 51，得到 0, 51, ..., 357 共 8 个角度。
pub fn rotation_step(rotation_count: Option<u32>) -> u32 {
    axis_step(FULL_TURN, rotation_count)
}

/// 旋转角集合，严格递增、无重复
pub fn rotations(rotation_count: Option<u32>) -> Vec<u32> {
    let step = rotation_step(rotation_count);
    (0..FULL_TURN).step_by(step as usize).collect()
}

/// 弯曲角集合
///
/// 优先使用显式列表，其次按 `curve_scans` 在 0..100 度内均分，都没有时为 `[0]`
pub fn curves(config: &SweepConfig) -> Vec<i32> {
    if !config.curve_angles.is_empty() {
        return config.curve_angles.clone();
    }
    match config.curve_scans {
        Some(count) => {
            let step = axis_step(CURVE_RANGE, Some(count));
            (0..CURVE_RANGE)
                .step_by(step as usize)
                .map(|c| c as i32)
                .collect()
        }
        None => vec![0],
    }
}

/// 展开全部采集任务
pub fn plan(config: &SweepConfig, layout: &SweepLayout) -> Vec<CaptureJob> {
    let rotations = rotations(config.rotation_count);
    curves(config)
        .into_iter()
        .flat_map(|curve| {
            rotations
                .iter()
                .map(move |&rotation| CaptureJob::new(rotation, curve, layout))
        })
        .collect()
}

fn axis_step(range: u32, count: Option<u32>) -> u32 {
    match count {
        Some(n) if n > 0 => (range / n).max(1),
        _ => range,
    }
}
