//! Shared application state.

use std::sync::Arc;

use restmeta_core::host::RegistryProvider;

use crate::config::GatewayConfig;
use crate::host::StaticHost;
use crate::metadata::SnapshotCache;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    host: Arc<dyn RegistryProvider>,
    snapshots: SnapshotCache,
}

impl AppState {
    /// State backed by the config's static deployments.
    pub fn new(cfg: GatewayConfig) -> Self {
        let host = StaticHost::from_config(cfg.deployments.as_deref());
        Self::with_host(cfg, Arc::new(host))
    }

    /// State backed by an externally owned registry provider.
    pub fn with_host(cfg: GatewayConfig, host: Arc<dyn RegistryProvider>) -> Self {
        let snapshots = SnapshotCache::new(cfg.server.marker_annotation.clone());
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                host,
                snapshots,
            }),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn host(&self) -> &dyn RegistryProvider {
        self.inner.host.as_ref()
    }

    pub fn snapshots(&self) -> &SnapshotCache {
        &self.inner.snapshots
    }
}
