//! Extraction of operations and reachable types from a schema

mod collector;
mod definitions;

use apollo_compiler::Schema;
use apollo_compiler::ast::FieldDefinition as AstFieldDefinition;
use itertools::Itertools as _;
use tracing::debug;

pub use collector::{DEFAULT_DEPRECATION_REASON, TypeCollector};
use collector::{ast_directives, deprecation};
pub use definitions::{
    Argument, EnumValueDefinition, FieldDefinition, Operation, OperationType, TypeDefinition,
    TypeKind, TypeTable,
};

use crate::warning::{self, ParserWarning};

/// The raw output of [`parse`]
#[derive(Debug, Clone)]
pub struct ParsedSchema {
    /// One operation per root field, queries first, then mutations, then subscriptions
    pub operations: Vec<Operation>,

    /// Every type reachable from an operation signature, in discovery order
    pub types: TypeTable,

    /// Problems with documentation directives, in discovery order
    pub warnings: Vec<ParserWarning>,
}

/// Extract the operations of every root type present in `schema`, collecting
/// the types their signatures reach into one shared table.
pub fn parse(schema: &Schema) -> ParsedSchema {
    let mut collector = TypeCollector::new(schema);
    let mut operations = Vec::new();

    for operation_type in OperationType::ALL {
        let Some(root_name) = schema.root_operation(operation_type.into()) else {
            continue;
        };
        let Some(root) = schema.get_object(root_name) else {
            continue;
        };

        for field in root.fields.values() {
            operations.push(extract_operation(
                &mut collector,
                root_name.as_str(),
                operation_type,
                field,
            ));
        }
    }

    let (types, warnings) = collector.into_parts();
    debug!(
        operations = operations.len(),
        types = types.len(),
        warnings = warnings.len(),
        "parsed schema"
    );

    ParsedSchema {
        operations,
        types,
        warnings: warning::dedup(warnings),
    }
}

fn extract_operation(
    collector: &mut TypeCollector<'_>,
    root_name: &str,
    operation_type: OperationType,
    field: &AstFieldDefinition,
) -> Operation {
    let coordinate = format!("{root_name}.{}", field.name);
    let annotations = collector.annotations(&coordinate, ast_directives(&field.directives));

    let return_type = field.ty.to_string();
    let mut referenced_types = vec![collector.collect(&return_type)];
    let mut arguments = Vec::with_capacity(field.arguments.len());
    for argument in &field.arguments {
        referenced_types.push(collector.collect(&argument.ty.to_string()));
        arguments.push(collector.argument(&coordinate, argument));
    }

    let deprecation_reason = deprecation(ast_directives(&field.directives));

    Operation {
        name: field.name.to_string(),
        operation_type,
        description: field.description.as_deref().map(str::to_string),
        arguments,
        return_type,
        annotations,
        referenced_types: referenced_types.into_iter().unique().collect(),
        is_deprecated: deprecation_reason.is_some(),
        deprecation_reason,
    }
}
