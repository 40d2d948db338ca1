use crate::models::sweep_config::SweepConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载扫描参数
pub async fn load_sweep_config(toml_file_path: &Path) -> Result<SweepConfig> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let config: SweepConfig = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    config
        .validate()
        .with_context(|| format!("扫描参数无效: {}", toml_file_path.display()))?;

    tracing::info!("已加载扫描参数: {}", toml_file_path.display());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_sweep_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.toml");
        std::fs::write(
            &path,
            "rotation_count = 8\ncurve_angles = [0, 20, 40]\ncutoff_height = 150\nshow_viewer = true\n",
        )
        .unwrap();

        let config = load_sweep_config(&path).await.unwrap();
        assert_eq!(config.rotation_count, Some(8));
        assert_eq!(config.curve_angles, vec![0, 20, 40]);
        assert_eq!(config.cutoff_height, Some(150));
        assert!(config.show_viewer);
        assert!(!config.filter_only);
    }

    #[tokio::test]
    async fn test_invalid_sweep_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.toml");
        std::fs::write(&path, "rotation_count = 0\n").unwrap();

        assert!(load_sweep_config(&path).await.is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = tokio_test::block_on(load_sweep_config(&dir.path().join("nope.toml")))
            .unwrap_err();
        assert!(err.to_string().contains("无法读取TOML文件"));
    }
}
