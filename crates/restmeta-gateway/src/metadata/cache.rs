//! Compute-once snapshot cell.
//!
//! The first successful discovery pass is kept for the life of the process.
//! Concurrent first callers wait on the same initializer instead of starting
//! their own pass. A missing registry is not cached, so a later call retries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::OnceCell;

use restmeta_core::error::Result;
use restmeta_core::host::RegistryProvider;
use restmeta_core::snapshot::{self, Snapshot};

pub struct SnapshotCache {
    marker: String,
    cell: OnceCell<Arc<Snapshot>>,
    builds: AtomicU64,
}

impl SnapshotCache {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            cell: OnceCell::new(),
            builds: AtomicU64::new(0),
        }
    }

    pub async fn get_or_build(&self, provider: &dyn RegistryProvider) -> Result<Arc<Snapshot>> {
        let marker = self.marker.as_str();
        let builds = &self.builds;
        self.cell
            .get_or_try_init(move || async move {
                builds.fetch_add(1, Ordering::SeqCst);
                snapshot::discover(provider, marker).map(Arc::new)
            })
            .await
            .map(Arc::clone)
    }

    /// Cached snapshot, if a pass has succeeded.
    pub fn get(&self) -> Option<Arc<Snapshot>> {
        self.cell.get().cloned()
    }

    /// Number of discovery passes started, including ones that found no registry.
    pub fn builds(&self) -> u64 {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}
