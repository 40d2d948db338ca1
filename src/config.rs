use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// 程序配置（外部工具和目录布局）
///
/// 扫描参数本身见 [`crate::models::SweepConfig`]
#[derive(Clone, Debug)]
pub struct Config {
    /// 采集设备命令
    pub treed_bin: String,
    /// 滤波工具命令
    pub filter_bin: String,
    /// 点云查看器命令
    pub viewer_bin: String,
    /// 原始点云存放目录
    pub raw_dir: PathBuf,
    /// 滤波结果存放目录
    pub output_dir: PathBuf,
    /// 采集超时
    pub capture_timeout: Duration,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 滤波失败记录文件
    pub warn_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            treed_bin: "treed".to_string(),
            filter_bin: "filter".to_string(),
            viewer_bin: "pcl_viewer".to_string(),
            raw_dir: PathBuf::from("raw"),
            output_dir: PathBuf::new(),
            capture_timeout: Duration::from_secs(120),
            verbose_logging: false,
            output_log_file: "sweep_log.txt".to_string(),
            warn_file: "warn.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 使用自定义查找函数构建配置（便于测试）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default = Self::default();
        let capture_timeout = match lookup("CAPTURE_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_var("CAPTURE_TIMEOUT_SECS", &v, "u64")?),
            None => default.capture_timeout,
        };
        let verbose_logging = match lookup("VERBOSE_LOGGING") {
            Some(v) => parse_var("VERBOSE_LOGGING", &v, "bool")?,
            None => default.verbose_logging,
        };

        Ok(Self {
            treed_bin: lookup("TREED_BIN").unwrap_or(default.treed_bin),
            filter_bin: lookup("FILTER_BIN").unwrap_or(default.filter_bin),
            viewer_bin: lookup("VIEWER_BIN").unwrap_or(default.viewer_bin),
            raw_dir: lookup("RAW_DIR").map(PathBuf::from).unwrap_or(default.raw_dir),
            output_dir: lookup("OUTPUT_DIR").map(PathBuf::from).unwrap_or(default.output_dir),
            capture_timeout,
            verbose_logging,
            output_log_file: lookup("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            warn_file: lookup("WARN_FILE").unwrap_or(default.warn_file),
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    var_name: &str,
    value: &str,
    expected_type: &str,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: expected_type.to_string(),
        })
}
