//! The presentation-ready document model handed to renderers

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::annotations::AnnotationSet;
use crate::example::Example;
use crate::parser::OperationType;

/// A type reference turned into a tree that can be rendered directly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpandedType {
    Scalar(ExpandedScalar),
    Object(ExpandedObject),
    Interface(ExpandedObject),
    InputObject(ExpandedObject),
    Enum(ExpandedEnum),
    Union(ExpandedUnion),
    List(ExpandedList),
    /// A pointer to a type documented in the catalog
    TypeRef(TypeRef),
    /// A pointer back to a type that is already being expanded
    CircularRef(CircularRef),
}

impl ExpandedType {
    pub fn scalar(name: impl Into<String>, description: Option<String>) -> Self {
        ExpandedType::Scalar(ExpandedScalar {
            name: name.into(),
            description,
        })
    }

    pub fn list(of_type: ExpandedType) -> Self {
        ExpandedType::List(ExpandedList {
            of_type: Box::new(of_type),
        })
    }

    pub fn type_ref(name: &str) -> Self {
        ExpandedType::TypeRef(TypeRef {
            name: name.to_string(),
            link: anchor(name),
        })
    }

    pub fn circular_ref(name: &str) -> Self {
        ExpandedType::CircularRef(CircularRef {
            reference: name.to_string(),
            link: anchor(name),
        })
    }

    /// The type name, for every variant that carries one
    pub fn name(&self) -> Option<&str> {
        match self {
            ExpandedType::Scalar(scalar) => Some(scalar.name.as_str()),
            ExpandedType::Object(object)
            | ExpandedType::Interface(object)
            | ExpandedType::InputObject(object) => Some(object.name.as_str()),
            ExpandedType::Enum(enumeration) => Some(enumeration.name.as_str()),
            ExpandedType::Union(union) => Some(union.name.as_str()),
            ExpandedType::TypeRef(type_ref) => Some(type_ref.name.as_str()),
            ExpandedType::CircularRef(_) | ExpandedType::List(_) => None,
        }
    }

    /// The payload of an object, interface or input object
    pub fn as_object(&self) -> Option<&ExpandedObject> {
        match self {
            ExpandedType::Object(object)
            | ExpandedType::Interface(object)
            | ExpandedType::InputObject(object) => Some(object),
            ExpandedType::Scalar(_)
            | ExpandedType::Enum(_)
            | ExpandedType::Union(_)
            | ExpandedType::List(_)
            | ExpandedType::TypeRef(_)
            | ExpandedType::CircularRef(_) => None,
        }
    }
}

/// The in-page anchor of a catalog entry
pub fn anchor(type_name: &str) -> String {
    format!("#{}", type_name.to_lowercase())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedScalar {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedObject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<ExpandedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<Vec<String>>,
    /// Renderers should start this node collapsed
    pub is_collapsible: bool,
}

impl ExpandedObject {
    pub fn field(&self, name: &str) -> Option<&ExpandedField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedEnum {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub values: Vec<ExpandedEnumValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedEnumValue {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedUnion {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub possible_types: Vec<ExpandedType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedList {
    pub of_type: Box<ExpandedType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircularRef {
    #[serde(rename = "ref")]
    pub reference: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedField {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: ExpandedType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<String>,
    pub is_required: bool,
    pub is_list: bool,
    pub is_deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<ExpandedArgument>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedArgument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: ExpandedType,
    pub type_ref: String,
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "AnnotationSet::is_empty")]
    pub annotations: AnnotationSet,
}

/// An operation with its signature expanded and its examples attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedOperation {
    pub name: String,
    pub operation_type: OperationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub arguments: Vec<ExpandedArgument>,
    pub return_type: ExpandedType,
    pub return_type_ref: String,
    #[serde(default)]
    pub annotations: AnnotationSet,
    pub referenced_types: Vec<String>,
    pub is_deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    /// Empty for operations placed at the root of their section
    pub name: String,
    pub operations: Vec<ExpandedOperation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    pub subsections: Vec<Subsection>,
}

/// The complete output of one generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocModel {
    pub sections: Vec<Section>,
    /// Every documented type, expanded and sorted by name
    pub types: Vec<ExpandedType>,
}

impl DocModel {
    /// Iterate every operation in document order
    pub fn operations(&self) -> impl Iterator<Item = &ExpandedOperation> {
        self.sections
            .iter()
            .flat_map(|section| &section.subsections)
            .flat_map(|subsection| &subsection.operations)
    }

    /// Find a catalog entry by type name
    pub fn type_named(&self, name: &str) -> Option<&ExpandedType> {
        self.types.iter().find(|ty| ty.name() == Some(name))
    }
}
