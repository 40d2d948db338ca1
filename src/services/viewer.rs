//! 点云查看器服务 - 业务能力层
//!
//! 启动后立即返回，不等待、不读取结果

use std::path::PathBuf;

use tracing::{info, warn};

use crate::infrastructure::{CommandRunner, CommandSpec};

/// 查看器命令：每个滤波文件一个位置参数
pub fn viewer_command(program: &str, paths: &[PathBuf]) -> CommandSpec {
    CommandSpec::new(
        program,
        paths.iter().map(|p| p.to_string_lossy().into_owned()),
    )
}

/// 打开查看器，启动失败只记录警告
pub fn show<R: CommandRunner>(runner: &R, program: &str, paths: &[PathBuf]) {
    let command = viewer_command(program, paths);
    info!("🖥️ 打开点云查看器 ({} 个文件)", paths.len());
    if let Err(e) = runner.launch(&command) {
        warn!("⚠️ 无法打开点云查看器: {} (请确认 {} 在 PATH 中)", e, program);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeRunner;

    #[test]
    fn test_show_launches_once_with_all_paths() {
        let runner = FakeRunner::healthy();
        let paths = vec![
            PathBuf::from("cur00rot000_filtered.pcd"),
            PathBuf::from("cur00rot180_filtered.pcd"),
        ];

        show(&runner, "pcl_viewer", &paths);

        let launches = runner.launches();
        assert_eq!(launches.len(), 1);
        assert_eq!(
            launches[0].argv(),
            vec![
                "pcl_viewer",
                "cur00rot000_filtered.pcd",
                "cur00rot180_filtered.pcd"
            ]
        );
        assert!(runner.calls().is_empty());
    }
}
