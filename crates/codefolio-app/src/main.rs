use std::time::Instant;
use tracing::{error, info};

use codefolio_infrastructure::logging::init_logger;
use codefolio_lib::{build_app_state, serve, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let _guard = init_logger(&config.log_dir)?;

    let started_at = Instant::now();
    info!("Starting codefolio v{}", env!("CARGO_PKG_VERSION"));

    let state = match build_app_state(&config).await {
        Ok(state) => state,
        Err(e) => {
            error!("Startup failed: {:#}", e);
            return Err(e);
        }
    };
    info!("✓ Startup completed ({}ms)", started_at.elapsed().as_millis());

    serve(&config, state).await
}
