use std::collections::HashSet;
use std::net::SocketAddr;

use restmeta_core::error::{MetaError, Result};
use restmeta_core::host::{ParamKind, TypeRef};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    /// Static host registry. Absent means no registry is bound.
    #[serde(default)]
    pub deployments: Option<Vec<DeploymentConfig>>,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetaError::UnsupportedVersion);
        }

        self.server.validate()?;

        if let Some(deployments) = &self.deployments {
            let mut seen = HashSet::new();
            for d in deployments {
                if d.id.trim().is_empty() {
                    return Err(MetaError::BadConfig("deployments[].id must not be empty".into()));
                }
                if !seen.insert(d.id.as_str()) {
                    return Err(MetaError::BadConfig(format!("duplicate deployment id: {}", d.id)));
                }
                for r in &d.resources {
                    r.validate()?;
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,

    #[serde(default = "default_marker_annotation")]
    pub marker_annotation: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            endpoint_path: default_endpoint_path(),
            marker_annotation: default_marker_annotation(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.endpoint_path.starts_with('/') {
            return Err(MetaError::BadConfig(
                "server.endpoint_path must start with '/'".into(),
            ));
        }
        if self.endpoint_path.contains([':', '*', '{', '}']) {
            return Err(MetaError::BadConfig(
                "server.endpoint_path must be a literal path (no ':', '*', '{' or '}')".into(),
            ));
        }
        if self.endpoint_path == "/healthz" {
            return Err(MetaError::BadConfig(
                "server.endpoint_path must not shadow /healthz".into(),
            ));
        }
        if self.marker_annotation.trim().is_empty() {
            return Err(MetaError::BadConfig(
                "server.marker_annotation must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            MetaError::BadConfig(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_endpoint_path() -> String {
    "/resteasy/KotlinMetadata".into()
}
fn default_marker_annotation() -> String {
    "kotlin.Metadata".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploymentConfig {
    pub id: String,
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    pub class: String,
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

impl ResourceConfig {
    fn validate(&self) -> Result<()> {
        if self.class.trim().is_empty() {
            return Err(MetaError::BadConfig("resources[].class must not be empty".into()));
        }
        for e in &self.endpoints {
            if e.method.trim().is_empty() {
                return Err(MetaError::BadConfig(format!(
                    "endpoint on {} has an empty method name",
                    self.class
                )));
            }
            if e.kind == EndpointKindConfig::Locator
                && !(e.http_methods.is_empty() && e.produces.is_empty() && e.consumes.is_empty())
            {
                return Err(MetaError::BadConfig(format!(
                    "locator {}.{} must not declare http_methods/produces/consumes",
                    self.class, e.method
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKindConfig {
    #[default]
    Method,
    Locator,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    pub method: String,
    #[serde(default)]
    pub kind: EndpointKindConfig,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub full_path: Option<String>,
    #[serde(default)]
    pub http_methods: Vec<String>,
    #[serde(default)]
    pub produces: Vec<String>,
    #[serde(default)]
    pub consumes: Vec<String>,
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub params: Vec<ParamConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub kind: ParamKind,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}
