//! Turning parsed operations and types into a [`DocModel`]

mod expander;
mod merger;
mod model;

use std::cmp::Ordering;
use std::collections::HashSet;

use apollo_compiler::collections::IndexMap;
use itertools::Itertools as _;
use tracing::debug;

pub use expander::TypeExpander;
pub use model::{
    CircularRef, DocModel, ExpandedArgument, ExpandedEnum, ExpandedEnumValue, ExpandedField,
    ExpandedList, ExpandedObject, ExpandedOperation, ExpandedScalar, ExpandedType, ExpandedUnion,
    Section, Subsection, TypeRef, anchor,
};

pub(crate) use merger::{cross_validate, missing_examples};

use crate::config::TransformConfig;
use crate::example::{Example, ExampleBundle};
use crate::parser::{Operation, TypeTable};
use merger::ExampleIndex;

/// Section for operations without a `@docGroup`
pub const DEFAULT_SECTION: &str = "Uncategorized";

/// Priority of operations without a `@docPriority`
pub const DEFAULT_PRIORITY: i64 = 999;

pub struct Transformer<'t> {
    types: &'t TypeTable,
    expander: TypeExpander<'t>,
    excluded_sections: HashSet<&'t str>,
}

/// An operation waiting to be sorted, with its discovery index
type Indexed<'o> = (usize, &'o Operation);

struct SectionBucket<'o> {
    name: &'o str,
    order: Option<f64>,
    subsections: IndexMap<&'o str, Vec<Indexed<'o>>>,
}

impl<'t> Transformer<'t> {
    pub fn new(types: &'t TypeTable, config: &'t TransformConfig) -> Self {
        Self {
            types,
            expander: TypeExpander::new(types, config),
            excluded_sections: config
                .exclude_doc_groups
                .iter()
                .map(String::as_str)
                .collect(),
        }
    }

    /// Group, sort and expand `operations`, attaching the matching examples,
    /// and build the type catalog.
    pub fn transform(&self, operations: &[Operation], bundles: &[ExampleBundle]) -> DocModel {
        let examples = ExampleIndex::new(bundles);

        let sections: Vec<Section> = self
            .group(operations)
            .into_iter()
            .map(|bucket| Section {
                name: bucket.name.to_string(),
                order: bucket.order,
                subsections: bucket
                    .subsections
                    .into_iter()
                    .map(|(name, operations)| Subsection {
                        name: name.to_string(),
                        operations: operations
                            .into_iter()
                            .map(|(_, operation)| {
                                self.expand_operation(
                                    operation,
                                    examples.examples_for(operation.operation_type, &operation.name),
                                )
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        let types = self.expand_types();

        debug!(
            sections = sections.len(),
            types = types.len(),
            "built documentation model"
        );
        DocModel { sections, types }
    }

    /// Expand every documented type for the catalog, sorted by name
    pub fn expand_types(&self) -> Vec<ExpandedType> {
        self.types
            .values()
            .filter(|definition| !definition.is_reserved() && !definition.is_ignored())
            .sorted_by(|a, b| compare_names(&a.name, &b.name))
            .map(|definition| self.expander.expand_definition(&definition.name))
            .collect()
    }

    fn group<'o>(&self, operations: &'o [Operation]) -> Vec<SectionBucket<'o>> {
        let mut sections: IndexMap<&'o str, SectionBucket<'o>> = IndexMap::default();

        for (index, operation) in operations.iter().enumerate() {
            if operation.annotations.is_ignored() {
                continue;
            }
            let group = operation.annotations.doc_group.as_ref();
            let name = group.map_or(DEFAULT_SECTION, |group| group.name.as_str());
            if self.excluded_sections.contains(name) {
                continue;
            }

            let section = sections.entry(name).or_insert_with(|| SectionBucket {
                name,
                order: None,
                subsections: IndexMap::default(),
            });
            if section.order.is_none() {
                section.order = group.and_then(|group| group.order);
            }
            section
                .subsections
                .entry(group.and_then(|group| group.subsection.as_deref()).unwrap_or(""))
                .or_default()
                .push((index, operation));
        }

        let mut sections: Vec<_> = sections.into_values().collect();
        sections.sort_by(compare_sections);
        for section in &mut sections {
            section.subsections.sort_by(|a, _, b, _| compare_subsections(a, b));
            for operations in section.subsections.values_mut() {
                operations.sort_by_key(|&(index, operation)| {
                    (
                        operation
                            .annotations
                            .priority_level()
                            .unwrap_or(DEFAULT_PRIORITY),
                        index,
                    )
                });
            }
        }
        sections
    }

    fn expand_operation(
        &self,
        operation: &Operation,
        examples: Vec<Example>,
    ) -> ExpandedOperation {
        ExpandedOperation {
            name: operation.name.clone(),
            operation_type: operation.operation_type,
            description: operation.description.clone(),
            arguments: operation
                .arguments
                .iter()
                .filter(|argument| !argument.annotations.is_ignored())
                .map(|argument| self.expander.expand_argument(argument))
                .collect(),
            return_type: self.expander.expand(&operation.return_type),
            return_type_ref: operation.return_type.clone(),
            annotations: operation.annotations.clone(),
            referenced_types: operation.referenced_types.clone(),
            is_deprecated: operation.is_deprecated,
            deprecation_reason: operation.deprecation_reason.clone(),
            examples,
        }
    }
}

/// Case-insensitive, with byte order breaking ties
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Ordered sections first, by order, then the rest by name
fn compare_sections(a: &SectionBucket<'_>, b: &SectionBucket<'_>) -> Ordering {
    match (a.order, b.order) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| compare_names(a.name, b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_names(a.name, b.name),
    }
}

/// The section root first, then named subsections by name
fn compare_subsections(a: &str, b: &str) -> Ordering {
    b.is_empty()
        .cmp(&a.is_empty())
        .then_with(|| compare_names(a, b))
}
