//! restmeta gateway
//!
//! - Metadata endpoint: GET /resteasy/KotlinMetadata (path configurable)
//! - Liveness: GET /healthz
//! - Config: restmeta.yaml, or the path given as the first argument

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use restmeta_core::error::{MetaError, Result};
use restmeta_gateway::{app_state, config, router};

const DEFAULT_CONFIG_PATH: &str = "restmeta.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.client_code().as_str(), error = %e, "restmeta-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;
    let endpoint_path = cfg.server.endpoint_path.clone();

    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, %endpoint_path, "restmeta-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MetaError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| MetaError::Internal(format!("server failed: {e}")))
}
