//! Top-level facade crate for restmeta.
//!
//! Re-exports the core model and the gateway library so users can depend on a single crate.

pub mod core {
    pub use restmeta_core::*;
}

pub mod gateway {
    pub use restmeta_gateway::*;
}
