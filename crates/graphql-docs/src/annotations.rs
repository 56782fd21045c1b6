//! Documentation directives attached to schema nodes
//!
//! Schemas opt into documentation metadata with four directives:
//!
//! - `@docGroup(name, order, subsection, displayLabel, sidebarTitle)`
//! - `@docPriority(level)`
//! - `@docTags(tags)`
//! - `@docIgnore`
//!
//! Each directive's arguments are converted to JSON and validated by
//! deserializing them into a strict struct. A directive that fails validation
//! is left out of the resulting [`AnnotationSet`] and reported as a
//! [`ParserWarning`]; it never affects sibling directives.

use std::fmt;

use apollo_compiler::ast::{Directive, Value};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as JsonValue};
use tracing::warn;

use crate::warning::ParserWarning;

/// The documentation directives recognized by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnnotationKind {
    DocGroup,
    DocPriority,
    DocTags,
    DocIgnore,
}

impl AnnotationKind {
    /// The directive name as written in SDL, without the leading `@`
    pub fn directive_name(&self) -> &'static str {
        match self {
            AnnotationKind::DocGroup => "docGroup",
            AnnotationKind::DocPriority => "docPriority",
            AnnotationKind::DocTags => "docTags",
            AnnotationKind::DocIgnore => "docIgnore",
        }
    }

    fn from_directive_name(name: &str) -> Option<Self> {
        match name {
            "docGroup" => Some(AnnotationKind::DocGroup),
            "docPriority" => Some(AnnotationKind::DocPriority),
            "docTags" => Some(AnnotationKind::DocTags),
            "docIgnore" => Some(AnnotationKind::DocIgnore),
            _ => None,
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.directive_name())
    }
}

/// Placement of an operation in the documentation hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DocGroup {
    /// The section the operation belongs to
    pub name: String,

    /// Explicit position of the section; sections with an order sort first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,

    /// The subsection inside the section. Absent means the section root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsection: Option<String>,

    /// Label to show for the operation in navigation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,

    /// Older spelling of `displayLabel`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocPriority {
    pub level: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocTags {
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DocIgnore {}

/// The validated documentation directives of a single schema node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_group: Option<DocGroup>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_priority: Option<DocPriority>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_tags: Option<DocTags>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub doc_ignore: bool,
}

impl AnnotationSet {
    /// Whether the node is excluded from all documentation output
    pub fn is_ignored(&self) -> bool {
        self.doc_ignore
    }

    pub fn is_empty(&self) -> bool {
        self.doc_group.is_none()
            && self.doc_priority.is_none()
            && self.doc_tags.is_none()
            && !self.doc_ignore
    }

    pub fn group_name(&self) -> Option<&str> {
        self.doc_group.as_ref().map(|group| group.name.as_str())
    }

    pub fn priority_level(&self) -> Option<i64> {
        self.doc_priority.map(|priority| priority.level)
    }
}

/// Why a directive's arguments were rejected
#[derive(Debug, thiserror::Error)]
enum AnnotationError {
    #[error("{0}")]
    Shape(#[from] serde_json::Error),

    #[error("name must not be empty")]
    EmptyName,
}

/// Reads documentation directives off schema nodes
#[derive(Debug, Default, Clone, Copy)]
pub struct AnnotationExtractor;

impl AnnotationExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the documentation directives from a node's directive list.
    ///
    /// `coordinate` names the node (e.g. `Query.users`) in any warning pushed
    /// onto `warnings`. Unknown directives are skipped silently.
    pub fn extract<'d>(
        &self,
        coordinate: &str,
        directives: impl IntoIterator<Item = &'d Directive>,
        warnings: &mut Vec<ParserWarning>,
    ) -> AnnotationSet {
        let mut annotations = AnnotationSet::default();

        for directive in directives {
            let Some(kind) = AnnotationKind::from_directive_name(directive.name.as_str()) else {
                continue;
            };
            let arguments = directive_arguments(directive);

            let outcome = match kind {
                AnnotationKind::DocGroup => {
                    parse_doc_group(arguments).map(|group| annotations.doc_group = Some(group))
                }
                AnnotationKind::DocPriority => parse::<DocPriority>(arguments)
                    .map(|priority| annotations.doc_priority = Some(priority)),
                AnnotationKind::DocTags => {
                    parse::<DocTags>(arguments).map(|tags| annotations.doc_tags = Some(tags))
                }
                AnnotationKind::DocIgnore => {
                    parse::<DocIgnore>(arguments).map(|_| annotations.doc_ignore = true)
                }
            };

            if let Err(error) = outcome {
                let warning = ParserWarning::invalid_directive(kind, coordinate, error.to_string());
                warn!(
                    directive = kind.directive_name(),
                    coordinate,
                    "{}",
                    warning.message
                );
                warnings.push(warning);
            }
        }

        annotations
    }
}

fn parse<T: DeserializeOwned>(arguments: Map<String, JsonValue>) -> Result<T, AnnotationError> {
    Ok(serde_json::from_value(JsonValue::Object(arguments))?)
}

fn parse_doc_group(arguments: Map<String, JsonValue>) -> Result<DocGroup, AnnotationError> {
    let mut group: DocGroup = parse(arguments)?;
    if group.name.is_empty() {
        return Err(AnnotationError::EmptyName);
    }
    if group.display_label.is_none() {
        group.display_label = group.sidebar_title.clone();
    }
    Ok(group)
}

fn directive_arguments(directive: &Directive) -> Map<String, JsonValue> {
    directive
        .arguments
        .iter()
        .map(|argument| (argument.name.to_string(), value_to_json(&argument.value)))
        .collect()
}

/// Convert a GraphQL literal to JSON without consulting its declared type
pub(crate) fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null | Value::Variable(_) => JsonValue::Null,
        Value::Enum(name) => JsonValue::String(name.to_string()),
        Value::String(string) => JsonValue::String(string.to_string()),
        Value::Boolean(boolean) => JsonValue::Bool(*boolean),
        Value::Int(int) => number_from_literal(int.as_str()),
        Value::Float(float) => number_from_literal(float.as_str()),
        Value::List(items) => JsonValue::Array(items.iter().map(|item| value_to_json(item)).collect()),
        Value::Object(entries) => JsonValue::Object(
            entries
                .iter()
                .map(|(name, value)| (name.to_string(), value_to_json(value)))
                .collect(),
        ),
    }
}

fn number_from_literal(literal: &str) -> JsonValue {
    literal
        .parse::<i64>()
        .ok()
        .map(Number::from)
        .or_else(|| literal.parse::<f64>().ok().and_then(Number::from_f64))
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}
