//! Metadata snapshot builder.
//!
//! Walks every deployment in the registry, keeps endpoints whose resource
//! class carries the marker annotation, and describes them in discovery
//! order. The result is serialized once; callers cache the [`Snapshot`].

use std::time::Instant;

use bytes::Bytes;

use crate::error::{MetaError, Result};
use crate::host::{
    DeploymentRegistry, EndpointDescriptor, EndpointKind, MethodParam, RegistryProvider, TypeRef,
};
use crate::model::{ParamDescriptor, ResourceDescriptor, TypeDescriptor, UNKNOWN_TYPE};

/// Deepest generic nesting accepted in a single type.
pub const MAX_TYPE_DEPTH: usize = 32;

/// Immutable result of one discovery pass.
#[derive(Debug, Clone)]
pub struct Snapshot {
    resources: Vec<ResourceDescriptor>,
    body: Bytes,
}

impl Snapshot {
    pub fn resources(&self) -> &[ResourceDescriptor] {
        &self.resources
    }

    /// Serialized JSON array, shared by every response.
    pub fn body(&self) -> Bytes {
        self.body.clone()
    }
}

/// Look the registry up through `provider` and build a snapshot from it.
///
/// An absent registry is reported as [`MetaError::RegistryNotFound`], never as
/// an empty snapshot.
pub fn discover(provider: &dyn RegistryProvider, marker: &str) -> Result<Snapshot> {
    let registry = provider.registry().ok_or(MetaError::RegistryNotFound)?;
    build(&registry, marker)
}

pub fn build(registry: &DeploymentRegistry, marker: &str) -> Result<Snapshot> {
    let started = Instant::now();

    let mut resources = Vec::new();
    for (deployment, methods) in registry.iter() {
        for invoker in methods.invokers() {
            let Some(endpoint) = invoker.endpoint() else {
                tracing::debug!(%deployment, "skipping invoker without endpoint descriptor");
                continue;
            };
            if !endpoint.resource_class.has_annotation(marker) {
                continue;
            }
            resources.push(describe(endpoint)?);
        }
    }

    let body = serde_json::to_vec(&resources)
        .map_err(|e| MetaError::Internal(format!("serialize snapshot failed: {e}")))?;

    tracing::info!(
        resources = resources.len(),
        elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        "metadata snapshot built"
    );

    Ok(Snapshot {
        resources,
        body: Bytes::from(body),
    })
}

/// Describe one endpoint.
pub fn describe(endpoint: &EndpointDescriptor) -> Result<ResourceDescriptor> {
    if endpoint.method_name.is_empty() {
        return Err(MetaError::Introspection(format!(
            "endpoint on {} has no method name",
            endpoint.resource_class.qualified_name
        )));
    }

    let params = endpoint
        .params
        .iter()
        .map(describe_param)
        .collect::<Result<Vec<_>>>()?;

    let (resource_method, http_methods, produces, consumes) = match &endpoint.kind {
        EndpointKind::Method {
            http_methods,
            produces,
            consumes,
        } => (true, http_methods.clone(), produces.clone(), consumes.clone()),
        EndpointKind::Locator => (false, Vec::new(), Vec::new(), Vec::new()),
    };

    Ok(ResourceDescriptor {
        resource_class: endpoint.resource_class.qualified_name.clone(),
        return_type: describe_type(endpoint.return_type.as_ref())?,
        method: endpoint.method_name.clone(),
        params,
        full_path: endpoint.full_path.clone(),
        path: endpoint.path.clone(),
        resource_method,
        http_methods,
        produces,
        consumes,
    })
}

fn describe_param(param: &MethodParam) -> Result<ParamDescriptor> {
    Ok(ParamDescriptor {
        ty: describe_type(Some(&param.ty))?,
        param_type: param.kind,
        param_name: param.name.clone(),
    })
}

/// Resolve a type into its descriptor tree.
///
/// A missing type becomes the nullable `"???"` sentinel; an unresolvable
/// classifier keeps the type's own nullability.
pub fn describe_type(ty: Option<&TypeRef>) -> Result<TypeDescriptor> {
    describe_type_at(ty, 0)
}

fn describe_type_at(ty: Option<&TypeRef>, depth: usize) -> Result<TypeDescriptor> {
    if depth > MAX_TYPE_DEPTH {
        return Err(MetaError::Introspection(format!(
            "type nesting exceeds {MAX_TYPE_DEPTH} levels"
        )));
    }
    let Some(ty) = ty else {
        return Ok(TypeDescriptor::unknown());
    };

    let type_arguments = ty
        .arguments
        .iter()
        .map(|arg| describe_type_at(arg.as_ref(), depth + 1))
        .collect::<Result<Vec<_>>>()?;

    Ok(TypeDescriptor {
        qualified_name: ty
            .classifier
            .clone()
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        is_marked_nullable: ty.nullable,
        type_arguments,
    })
}
