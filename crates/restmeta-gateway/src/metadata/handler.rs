use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};

use restmeta_core::error::MetaError;

use crate::app_state::AppState;

/// Body returned when no deployment registry is bound.
pub const REGISTRY_NOT_FOUND_BODY: &str = "RestEasy Deployment Was Not Found\n";

pub async fn resource_metadata(State(state): State<AppState>) -> Response {
    match state.snapshots().get_or_build(state.host()).await {
        Ok(snapshot) => (
            StatusCode::OK,
            [(CONTENT_TYPE, "application/json")],
            snapshot.body(),
        )
            .into_response(),
        Err(MetaError::RegistryNotFound) => {
            tracing::warn!("metadata requested but no deployment registry is bound");
            (
                StatusCode::OK,
                [(CONTENT_TYPE, "text/plain")],
                REGISTRY_NOT_FOUND_BODY,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(
                code = e.client_code().as_str(),
                error = %e,
                "metadata snapshot failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(CONTENT_TYPE, "text/plain")],
                "internal error",
            )
                .into_response()
        }
    }
}
