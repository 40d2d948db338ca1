use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 扫描参数
///
/// 可以来自命令行，也可以来自 TOML 文件：
///
/// ```toml
/// rotation_count = 8
/// curve_angles = [0, 20, 40]
/// cutoff_height = 150
/// filter_only = false
/// show_viewer = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// 旋转方向的扫描次数，未设置时只扫描 0 度
    pub rotation_count: Option<u32>,
    /// 弯曲角度列表（度），按给定顺序扫描
    pub curve_angles: Vec<i32>,
    /// 弯曲方向的扫描次数（在 0..100 度内均分），与 `curve_angles` 互斥
    pub curve_scans: Option<u32>,
    /// 滤波截断高度
    pub cutoff_height: Option<i32>,
    /// 只执行滤波，不采集
    pub filter_only: bool,
    /// 完成后打开点云查看器
    pub show_viewer: bool,
}

impl SweepConfig {
    /// 校验参数
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rotation_count == Some(0) {
            return Err(ConfigError::ZeroCount {
                field: "rotation_count",
            });
        }
        if self.curve_scans == Some(0) {
            return Err(ConfigError::ZeroCount {
                field: "curve_scans",
            });
        }
        if self.curve_scans.is_some() && !self.curve_angles.is_empty() {
            return Err(ConfigError::ConflictingCurves);
        }
        Ok(())
    }

    /// 用 `other` 中显式设置的字段覆盖当前配置
    pub fn merge(mut self, other: SweepConfig) -> Self {
        if other.rotation_count.is_some() {
            self.rotation_count = other.rotation_count;
        }
        if !other.curve_angles.is_empty() {
            self.curve_angles = other.curve_angles;
            self.curve_scans = None;
        }
        if other.curve_scans.is_some() {
            self.curve_scans = other.curve_scans;
            self.curve_angles.clear();
        }
        if other.cutoff_height.is_some() {
            self.cutoff_height = other.cutoff_height;
        }
        self.filter_only |= other.filter_only;
        self.show_viewer |= other.show_viewer;
        self
    }
}
