#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Transforms an annotated GraphQL schema into a documentation model.
//!
//! [`generate`] runs the whole pipeline: [`parser::parse`] extracts the
//! operations and the types they reach, and [`Transformer`] groups the
//! operations into sections, attaches examples and expands every type into a
//! renderable tree. Problems with documentation directives or examples never
//! fail a run; they are returned as [`ParserWarning`]s next to the model.
//! With [`TransformConfig::require_examples`] set, documented operations
//! without examples are reported the same way.

pub mod annotations;
pub mod config;
pub mod example;
pub mod parser;
pub mod transformer;
pub mod type_ref;
pub mod warning;

use apollo_compiler::Schema;
use serde::Serialize;
use tracing::debug;

pub use annotations::{AnnotationKind, AnnotationSet};
pub use config::TransformConfig;
pub use example::{Example, ExampleBundle, ExampleResponse, ResponseKind};
pub use parser::{Operation, OperationType, ParsedSchema, TypeDefinition, TypeKind, parse};
pub use transformer::{DocModel, ExpandedType, Transformer};
pub use warning::{ParserWarning, WarningCode};

/// The result of a generation run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generated {
    pub doc_model: DocModel,
    /// Every distinct warning of the run, in the order it was found
    pub warnings: Vec<ParserWarning>,
}

/// Build the documentation model of `schema`, attaching the examples in `bundles`
pub fn generate(schema: &Schema, bundles: &[ExampleBundle], config: &TransformConfig) -> Generated {
    let ParsedSchema {
        operations,
        types,
        mut warnings,
    } = parse(schema);

    warnings.extend(transformer::cross_validate(&operations, bundles));
    if config.require_examples {
        warnings.extend(transformer::missing_examples(
            &operations,
            bundles,
            &config.exclude_doc_groups,
        ));
    }
    let doc_model = Transformer::new(&types, config).transform(&operations, bundles);
    let warnings = warning::dedup(warnings);

    debug!(
        operations = doc_model.operations().count(),
        types = doc_model.types.len(),
        warnings = warnings.len(),
        "generated documentation model"
    );
    Generated {
        doc_model,
        warnings,
    }
}
