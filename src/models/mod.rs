pub mod loaders;
pub mod sweep_config;

pub use loaders::load_sweep_config;
pub use sweep_config::SweepConfig;
