use rpg_engine::{resolve_loop_config, ConfigError, GameFactory, LoopConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::gameplay;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) factory: GameFactory,
}

pub(crate) fn build_app() -> Result<AppWiring, ConfigError> {
    init_tracing();
    info!(version = env!("CARGO_PKG_VERSION"), "=== RPG Startup ===");

    let config = resolve_loop_config()?;
    Ok(AppWiring {
        config,
        factory: gameplay::build_game_factory(),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
