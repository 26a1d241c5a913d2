//! Axum router wiring.
//!
//! Exposes the metadata endpoint at the configured path plus `/healthz`.

use axum::{routing::get, Router};

use crate::{app_state::AppState, metadata, ops};

pub fn build_router(state: AppState) -> Router {
    let endpoint_path = state.cfg().server.endpoint_path.clone();
    Router::new()
        .route(&endpoint_path, get(metadata::resource_metadata))
        .route("/healthz", get(ops::healthz))
        .with_state(state)
}
