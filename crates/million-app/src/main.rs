use std::path::PathBuf;

use anyhow::Result;
use million_engine::core::EngineConfig;
use million_engine::device::GpuInit;
use million_engine::logging::{init_logging, LoggingConfig};
use million_engine::window::{Runtime, RuntimeConfig};

/// Overrides the directory `test.png` is loaded from.
const ASSET_DIR_VAR: &str = "MILLION_ASSET_DIR";
/// Enables snapshot persistence at the given path.
const STATE_PATH_VAR: &str = "MILLION_STATE_PATH";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut config = RuntimeConfig {
        title: "Million".to_string(),
        ..RuntimeConfig::default()
    };
    if let Some(dir) = std::env::var_os(ASSET_DIR_VAR) {
        config.asset_dir = PathBuf::from(dir);
    }
    if let Some(path) = std::env::var_os(STATE_PATH_VAR) {
        config.state_path = Some(PathBuf::from(path));
    }

    log::info!(
        "assets from {}, state {}",
        config.asset_dir.display(),
        config
            .state_path
            .as_deref()
            .map_or_else(|| "not persisted".to_string(), |p| p.display().to_string()),
    );

    Runtime::run(config, EngineConfig::default(), GpuInit::default())
}
