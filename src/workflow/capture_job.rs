//! 采集任务
//!
//! 封装"在哪个旋转/弯曲角度采集、结果写到哪里"这一信息。
//! 文件名由角度唯一确定，同时充当断点续扫的完成标记。

use std::fmt::Display;
use std::path::PathBuf;

/// 输出目录布局
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepLayout {
    /// 原始点云目录
    pub raw_dir: PathBuf,
    /// 滤波结果目录
    pub output_dir: PathBuf,
}

impl SweepLayout {
    pub fn new(raw_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// 单个采集任务（规划后不可变）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureJob {
    pub rotation_degrees: u32,
    pub curve_degrees: i32,
    pub raw_path: PathBuf,
    pub filtered_path: PathBuf,
}

impl CaptureJob {
    pub fn new(rotation_degrees: u32, curve_degrees: i32, layout: &SweepLayout) -> Self {
        let stem = file_stem(curve_degrees, rotation_degrees);
        Self {
            rotation_degrees,
            curve_degrees,
            raw_path: layout.raw_dir.join(format!("{stem}.pcd")),
            filtered_path: layout.output_dir.join(format!("{stem}_filtered.pcd")),
        }
    }
}

impl Display for CaptureJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[弯曲 {}° 旋转 {}°]",
            self.curve_degrees, self.rotation_degrees
        )
    }
}

/// 定宽命名: 弯曲角 2 位、旋转角 3 位，补零
pub fn file_stem(curve_degrees: i32, rotation_degrees: u32) -> String {
    format!("cur{:02}rot{:03}", curve_degrees, rotation_degrees)
}
