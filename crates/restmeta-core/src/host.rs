//! Host registry contract.
//!
//! The host framework owns the deployment registry. This module describes the
//! narrow surface restmeta reads from it: deployments, their bound invokers,
//! and the endpoint descriptor each invoker chooses to expose. Nothing here
//! is mutated after construction.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A type as the host sees it in an endpoint signature.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeRef {
    /// Fully qualified classifier name. `None` when the host cannot resolve it
    /// (type parameters, intersection types).
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(default)]
    pub nullable: bool,
    /// Generic arguments in declaration order. `None` is a star projection.
    #[serde(default)]
    pub arguments: Vec<Option<TypeRef>>,
}

impl TypeRef {
    pub fn named(classifier: impl Into<String>) -> Self {
        Self {
            classifier: Some(classifier.into()),
            nullable: false,
            arguments: Vec::new(),
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_arg(mut self, arg: TypeRef) -> Self {
        self.arguments.push(Some(arg));
        self
    }

    pub fn with_star(mut self) -> Self {
        self.arguments.push(None);
        self
    }
}

/// Where a parameter value is taken from. Serialized with the host's constant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParamKind {
    PathParam,
    QueryParam,
    HeaderParam,
    CookieParam,
    MatrixParam,
    FormParam,
    Form,
    BeanParam,
    Entity,
    Context,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodParam {
    pub ty: TypeRef,
    pub kind: ParamKind,
    /// Declared name. Entity and context parameters carry none.
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceClass {
    pub qualified_name: String,
    /// Qualified names of the annotations declared on the class itself.
    pub annotations: Vec<String>,
}

impl ResourceClass {
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointKind {
    /// Handles the request directly.
    Method {
        http_methods: Vec<String>,
        produces: Vec<String>,
        consumes: Vec<String>,
    },
    /// Returns a sub-resource for further dispatch.
    Locator,
}

/// What an invoker dispatches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub resource_class: Arc<ResourceClass>,
    pub method_name: String,
    pub return_type: Option<TypeRef>,
    pub params: Vec<MethodParam>,
    pub full_path: Option<String>,
    pub path: Option<String>,
    pub kind: EndpointKind,
}

/// Dispatcher for one bound endpoint.
///
/// Invokers that are neither a resource method nor a sub-resource locator
/// return `None` from [`ResourceInvoker::endpoint`].
pub trait ResourceInvoker: Send + Sync {
    fn endpoint(&self) -> Option<&EndpointDescriptor>;
}

impl ResourceInvoker for EndpointDescriptor {
    fn endpoint(&self) -> Option<&EndpointDescriptor> {
        Some(self)
    }
}

/// Bound invokers of one deployment, grouped by path in binding order.
#[derive(Default, Clone)]
pub struct MethodRegistry {
    bound: Vec<(String, Vec<Arc<dyn ResourceInvoker>>)>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, path: impl Into<String>, invoker: Arc<dyn ResourceInvoker>) {
        let path = path.into();
        match self.bound.iter_mut().find(|(p, _)| *p == path) {
            Some((_, invokers)) => invokers.push(invoker),
            None => self.bound.push((path, vec![invoker])),
        }
    }

    pub fn invokers(&self) -> impl Iterator<Item = &Arc<dyn ResourceInvoker>> {
        self.bound.iter().flat_map(|(_, invokers)| invokers.iter())
    }

    pub fn len(&self) -> usize {
        self.bound.iter().map(|(_, invokers)| invokers.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Deployment id -> method registry, in registration order.
#[derive(Default, Clone)]
pub struct DeploymentRegistry {
    deployments: Vec<(String, MethodRegistry)>,
}

impl DeploymentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a deployment.
    pub fn insert(&mut self, id: impl Into<String>, registry: MethodRegistry) {
        let id = id.into();
        match self.deployments.iter_mut().find(|(d, _)| *d == id) {
            Some((_, existing)) => *existing = registry,
            None => self.deployments.push((id, registry)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&MethodRegistry> {
        self.deployments
            .iter()
            .find(|(d, _)| d == id)
            .map(|(_, r)| r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MethodRegistry)> {
        self.deployments.iter().map(|(id, r)| (id.as_str(), r))
    }
}

/// Execution-context lookup for the deployment registry.
pub trait RegistryProvider: Send + Sync {
    fn registry(&self) -> Option<Arc<DeploymentRegistry>>;
}

impl RegistryProvider for Option<Arc<DeploymentRegistry>> {
    fn registry(&self) -> Option<Arc<DeploymentRegistry>> {
        self.clone()
    }
}
