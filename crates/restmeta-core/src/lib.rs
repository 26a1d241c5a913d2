//! restmeta core: the host registry contract, the resource descriptor model,
//! and the snapshot builder.
//!
//! Nothing here knows about HTTP. The gateway crate owns transport, config,
//! and the compute-once cache around [`snapshot::build`].
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Every fallible
//! path surfaces as [`MetaError`].

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod host;
pub mod model;
pub mod snapshot;

pub use error::{MetaError, Result};
pub use snapshot::Snapshot;
