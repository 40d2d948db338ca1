use anyhow::Result;
use clap::Parser;
use treed_sweep::cli::Cli;
use treed_sweep::models::{load_sweep_config, SweepConfig};
use treed_sweep::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env()?;

    // 初始化日志
    logger::init(config.verbose_logging, &config.output_log_file)?;

    // 文件参数在前，命令行参数覆盖
    let file_sweep = match &cli.config {
        Some(path) => load_sweep_config(path).await?,
        None => SweepConfig::default(),
    };
    let sweep = file_sweep.merge(cli.sweep_config());

    // 初始化并运行应用
    App::initialize(config, sweep)?.run().await?;

    Ok(())
}
