//! restmeta gateway library entry.
//!
//! Wires config, the host registry, the snapshot cache, and the HTTP
//! handlers into an axum service. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod config;
pub mod host;
pub mod metadata;
pub mod ops;
pub mod router;
