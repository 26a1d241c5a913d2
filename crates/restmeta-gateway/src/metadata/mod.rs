//! Resource metadata endpoint and its snapshot cache.

pub mod cache;
pub mod handler;

pub use cache::SnapshotCache;
pub use handler::{resource_metadata, REGISTRY_NOT_FOUND_BODY};
