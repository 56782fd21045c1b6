//! Matching example bundles to operations

use std::collections::HashMap;

use tracing::warn;

use crate::example::{Example, ExampleBundle};
use crate::parser::{Operation, OperationType};
use crate::warning::ParserWarning;

use super::DEFAULT_SECTION;

/// Examples indexed by `(operation type, operation name)`, with a name-only
/// fallback for bundles that do not declare an operation type
#[derive(Debug, Default)]
pub(crate) struct ExampleIndex<'b> {
    by_key: HashMap<(OperationType, &'b str), Vec<&'b Example>>,
    by_name: HashMap<&'b str, Vec<&'b Example>>,
}

impl<'b> ExampleIndex<'b> {
    pub(crate) fn new(bundles: &'b [ExampleBundle]) -> Self {
        let mut index = Self::default();
        for bundle in bundles {
            let examples = match bundle.operation_type {
                Some(operation_type) => index
                    .by_key
                    .entry((operation_type, bundle.operation_name.as_str()))
                    .or_default(),
                None => index
                    .by_name
                    .entry(bundle.operation_name.as_str())
                    .or_default(),
            };
            examples.extend(&bundle.examples);
        }
        index
    }

    /// The examples for one operation, preferring bundles that declare its type
    pub(crate) fn examples_for(&self, operation_type: OperationType, name: &str) -> Vec<Example> {
        self.by_key
            .get(&(operation_type, name))
            .or_else(|| self.by_name.get(name))
            .map(|examples| examples.iter().map(|&example| example.clone()).collect())
            .unwrap_or_default()
    }
}

/// Check every bundle against the operations of the schema
pub(crate) fn cross_validate(
    operations: &[Operation],
    bundles: &[ExampleBundle],
) -> Vec<ParserWarning> {
    let mut defined: HashMap<&str, Vec<OperationType>> = HashMap::new();
    for operation in operations {
        defined
            .entry(operation.name.as_str())
            .or_default()
            .push(operation.operation_type);
    }

    let mut warnings = Vec::new();
    for bundle in bundles {
        let name = bundle.operation_name.as_str();
        let warning = match (defined.get(name), bundle.operation_type) {
            (None, _) => ParserWarning::unknown_operation(name),
            (Some(found), Some(declared)) if !found.contains(&declared) => {
                ParserWarning::operation_type_mismatch(name, declared, found)
            }
            (Some(_), _) => continue,
        };
        warn!(
            code = ?warning.code,
            coordinate = %warning.coordinate,
            "{}",
            warning.message
        );
        warnings.push(warning);
    }
    warnings
}

/// Report each documented operation that no bundle gives an example.
///
/// An operation is documented unless it is ignored or its section is one of
/// `excluded_sections`.
pub(crate) fn missing_examples(
    operations: &[Operation],
    bundles: &[ExampleBundle],
    excluded_sections: &[String],
) -> Vec<ParserWarning> {
    let index = ExampleIndex::new(bundles);

    operations
        .iter()
        .filter(|operation| !operation.annotations.is_ignored())
        .filter(|operation| {
            let section = operation.annotations.group_name().unwrap_or(DEFAULT_SECTION);
            !excluded_sections.iter().any(|excluded| excluded == section)
        })
        .filter(|operation| {
            index
                .examples_for(operation.operation_type, &operation.name)
                .is_empty()
        })
        .map(|operation| {
            let warning =
                ParserWarning::missing_operation_example(operation.operation_type, &operation.name);
            warn!(
                code = ?warning.code,
                coordinate = %warning.coordinate,
                "{}",
                warning.message
            );
            warning
        })
        .collect()
}
