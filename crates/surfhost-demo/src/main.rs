mod scene;

use std::path::PathBuf;

use anyhow::Result;
use surfhost_runtime::logging::{init_logging, LoggingConfig};
use surfhost_runtime::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use scene::OrbitScene;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut config = RuntimeConfig {
        title: "surfhost demo".to_string(),
        initial_size: LogicalSize::new(960.0, 640.0),
        ..RuntimeConfig::default()
    };
    if let Some(root) = std::env::args_os().nth(1) {
        config.assets_root = PathBuf::from(root);
    }

    log::info!("assets root: {}", config.assets_root.display());
    Runtime::run(config, OrbitScene::default())
}
