//! Config-backed host registry.
//!
//! The gateway runs without an embedding framework, so the deployments it
//! describes come from the `deployments` section of the config file. When the
//! section is missing the host reports no registry at all.

use std::sync::Arc;

use restmeta_core::host::{
    DeploymentRegistry, EndpointDescriptor, EndpointKind, MethodParam, MethodRegistry,
    RegistryProvider, ResourceClass,
};

use crate::config::{DeploymentConfig, EndpointConfig, EndpointKindConfig};

#[derive(Clone, Default)]
pub struct StaticHost {
    registry: Option<Arc<DeploymentRegistry>>,
}

impl StaticHost {
    /// Host with no registry bound.
    pub fn unbound() -> Self {
        Self { registry: None }
    }

    pub fn with_registry(registry: DeploymentRegistry) -> Self {
        Self {
            registry: Some(Arc::new(registry)),
        }
    }

    pub fn from_config(deployments: Option<&[DeploymentConfig]>) -> Self {
        match deployments {
            Some(deployments) => Self::with_registry(build_registry(deployments)),
            None => Self::unbound(),
        }
    }
}

impl RegistryProvider for StaticHost {
    fn registry(&self) -> Option<Arc<DeploymentRegistry>> {
        self.registry.clone()
    }
}

fn build_registry(deployments: &[DeploymentConfig]) -> DeploymentRegistry {
    let mut registry = DeploymentRegistry::new();
    for d in deployments {
        let mut methods = MethodRegistry::new();
        for r in &d.resources {
            let class = Arc::new(ResourceClass {
                qualified_name: r.class.clone(),
                annotations: r.annotations.clone(),
            });
            for e in &r.endpoints {
                let bound_path = e.full_path.clone().or_else(|| e.path.clone()).unwrap_or_default();
                methods.bind(bound_path, Arc::new(endpoint(&class, e)));
            }
        }
        tracing::debug!(deployment = %d.id, invokers = methods.len(), "static deployment bound");
        registry.insert(d.id.clone(), methods);
    }
    registry
}

fn endpoint(class: &Arc<ResourceClass>, e: &EndpointConfig) -> EndpointDescriptor {
    let kind = match e.kind {
        EndpointKindConfig::Method => EndpointKind::Method {
            http_methods: e.http_methods.clone(),
            produces: e.produces.clone(),
            consumes: e.consumes.clone(),
        },
        EndpointKindConfig::Locator => EndpointKind::Locator,
    };

    EndpointDescriptor {
        resource_class: Arc::clone(class),
        method_name: e.method.clone(),
        return_type: e.return_type.clone(),
        params: e
            .params
            .iter()
            .map(|p| MethodParam {
                ty: p.ty.clone(),
                kind: p.kind,
                name: p.name.clone(),
            })
            .collect(),
        full_path: e.full_path.clone(),
        path: e.path.clone(),
        kind,
    }
}
