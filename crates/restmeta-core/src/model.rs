//! Resource descriptors as they appear on the wire.
//!
//! Field names are fixed by existing consumers of the endpoint, hence the
//! explicit renames.

use serde::Serialize;

use crate::host::ParamKind;

/// Qualified name used when the host cannot resolve a classifier.
pub const UNKNOWN_TYPE: &str = "???";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    #[serde(rename = "qualifiedName")]
    pub qualified_name: String,
    #[serde(rename = "isMarkedNullable")]
    pub is_marked_nullable: bool,
    #[serde(rename = "typeArguments")]
    pub type_arguments: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// Descriptor for a type the host could not provide at all.
    pub fn unknown() -> Self {
        Self {
            qualified_name: UNKNOWN_TYPE.to_string(),
            is_marked_nullable: true,
            type_arguments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDescriptor {
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    #[serde(rename = "paramType")]
    pub param_type: ParamKind,
    #[serde(rename = "paramName")]
    pub param_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub resource_class: String,
    pub return_type: TypeDescriptor,
    pub method: String,
    pub params: Vec<ParamDescriptor>,
    pub full_path: Option<String>,
    pub path: Option<String>,
    pub resource_method: bool,
    pub http_methods: Vec<String>,
    pub produces: Vec<String>,
    pub consumes: Vec<String>,
}
