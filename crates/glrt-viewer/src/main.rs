use anyhow::Context;
use glrt_engine::logging::{LoggingConfig, init_logging};
use glrt_engine::scene::presets;
use glrt_engine::{BootstrapConfig, Runtime, RuntimeConfig};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let scene = presets::demo_scene().context("failed to build demo scene")?;
    let bootstrap = BootstrapConfig::from_env();

    log::info!("starting viewer with {} scene object(s)", scene.len());
    Runtime::run(RuntimeConfig::default(), bootstrap, scene)
}
