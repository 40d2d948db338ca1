use std::path::PathBuf;

use clap::Parser;

use crate::models::SweepConfig;

#[derive(Parser, Debug)]
#[command(
    name = "treed_sweep",
    about = "Drive the TreeD scanner through a rotation/curve sweep and filter every capture"
)]
pub struct Cli {
    /// Number of scans around the rotation axis
    #[arg(short = 'r', long = "rotation-scans", value_parser = clap::value_parser!(u32).range(1..))]
    pub rotation_scans: Option<u32>,

    /// Curve (tilt) angles in degrees, e.g. `-c 0,20,40`
    #[arg(
        short = 'c',
        long = "curve-angles",
        value_delimiter = ',',
        num_args = 1..,
        allow_negative_numbers = true,
        conflicts_with = "curve_scans"
    )]
    pub curve_angles: Vec<i32>,

    /// Number of scans along the curve axis (spread over 0..100 degrees)
    #[arg(long = "curve-scans", value_parser = clap::value_parser!(u32).range(1..))]
    pub curve_scans: Option<u32>,

    /// Cutoff height passed to the filter
    #[arg(long = "cutoff-height", allow_negative_numbers = true)]
    pub cutoff_height: Option<i32>,

    /// Only filter existing raw captures, do not drive the scanner
    #[arg(long = "filter-only")]
    pub filter_only: bool,

    /// Open the point cloud viewer when the sweep ends
    #[arg(short = 's', long = "show")]
    pub show: bool,

    /// Sweep parameters file (TOML); command-line flags take precedence
    #[arg(long = "config", env = "SWEEP_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// 命令行中显式给出的扫描参数
    pub fn sweep_config(&self) -> SweepConfig {
        SweepConfig {
            rotation_count: self.rotation_scans,
            curve_angles: self.curve_angles.clone(),
            curve_scans: self.curve_scans,
            cutoff_height: self.cutoff_height,
            filter_only: self.filter_only,
            show_viewer: self.show,
        }
    }
}
