//! Expansion of type references into renderable trees
//!
//! Two entry points share one set of rules:
//!
//! - [`TypeExpander::expand`] renders operation signatures. Named types become
//!   [`ExpandedType::TypeRef`] links into the catalog and are never inlined.
//! - [`TypeExpander::expand_definition`] renders catalog entries. Field types
//!   are inlined depth first, carrying the set of type names on the current
//!   path. A name already on the path becomes a circular reference and
//!   inlining stops at `max_depth`, so every tree is finite.
//!
//! Types, fields, arguments and enum values annotated with `@docIgnore` never
//! appear in the output. References to an ignored type degrade to a bare
//! scalar so renderers never link to a missing catalog entry.

use std::collections::HashSet;

use super::model::{
    ExpandedArgument, ExpandedEnum, ExpandedEnumValue, ExpandedField, ExpandedObject, ExpandedType,
    ExpandedUnion,
};
use crate::config::TransformConfig;
use crate::parser::{Argument, FieldDefinition, TypeDefinition, TypeKind, TypeTable};
use crate::type_ref::TypeReference;

/// Names of the types on the current expansion path
type Visited<'t> = HashSet<&'t str>;

pub struct TypeExpander<'t> {
    types: &'t TypeTable,
    max_depth: usize,
    default_levels: usize,
    show_circular_references: bool,
}

impl<'t> TypeExpander<'t> {
    pub fn new(types: &'t TypeTable, config: &TransformConfig) -> Self {
        Self {
            types,
            max_depth: config.max_depth,
            default_levels: config.default_levels,
            show_circular_references: config.show_circular_references,
        }
    }

    /// Expand an operation argument or return type.
    ///
    /// Lists become nested [`ExpandedType::List`] nodes. Unknown and ignored
    /// names become scalars; every other name becomes a type reference.
    pub fn expand(&self, type_ref: &str) -> ExpandedType {
        match TypeReference::parse(type_ref) {
            TypeReference::List(item) => ExpandedType::list(self.expand(item)),
            TypeReference::Named(name) => match self.documented(name) {
                Some(definition) => ExpandedType::type_ref(&definition.name),
                None => ExpandedType::scalar(name, None),
            },
        }
    }

    /// Expand a named type for the catalog, inlining nested types up to
    /// `max_depth`
    pub fn expand_definition(&self, type_name: &str) -> ExpandedType {
        match self.documented(type_name) {
            Some(definition) => self.expand_named(definition, 0, &Visited::new()),
            None => ExpandedType::scalar(type_name, None),
        }
    }

    /// Expand an argument in reference mode
    pub(crate) fn expand_argument(&self, argument: &Argument) -> ExpandedArgument {
        ExpandedArgument {
            name: argument.name.clone(),
            description: argument.description.clone(),
            ty: self.expand(&argument.type_ref),
            type_ref: argument.type_ref.clone(),
            is_required: argument.is_required,
            default_value: argument.default_value.clone(),
            annotations: argument.annotations.clone(),
        }
    }

    /// The definition of `name`, unless it is unknown or ignored
    fn documented(&self, name: &str) -> Option<&'t TypeDefinition> {
        self.types
            .get(name)
            .filter(|definition| !definition.is_ignored())
    }

    fn expand_named(
        &self,
        definition: &'t TypeDefinition,
        depth: usize,
        visited: &Visited<'t>,
    ) -> ExpandedType {
        match definition.kind {
            TypeKind::Scalar => {
                ExpandedType::scalar(definition.name.clone(), definition.description.clone())
            }
            TypeKind::Enum => ExpandedType::Enum(ExpandedEnum {
                name: definition.name.clone(),
                description: definition.description.clone(),
                values: definition
                    .enum_values
                    .iter()
                    .filter(|value| !value.annotations.is_ignored())
                    .map(|value| ExpandedEnumValue {
                        name: value.name.clone(),
                        description: value.description.clone(),
                        is_deprecated: value.is_deprecated,
                        deprecation_reason: value.deprecation_reason.clone(),
                    })
                    .collect(),
            }),
            TypeKind::Union => {
                let visited = with_name(visited, &definition.name);
                ExpandedType::Union(ExpandedUnion {
                    name: definition.name.clone(),
                    description: definition.description.clone(),
                    possible_types: definition
                        .possible_types
                        .iter()
                        .filter(|member| {
                            self.types
                                .get(member.as_str())
                                .is_none_or(|member| !member.is_ignored())
                        })
                        .map(|member| self.expand_reference(member, depth, &visited))
                        .collect(),
                })
            }
            TypeKind::Object => ExpandedType::Object(self.expand_object(definition, depth, visited)),
            TypeKind::Interface => {
                ExpandedType::Interface(self.expand_object(definition, depth, visited))
            }
            TypeKind::InputObject => {
                ExpandedType::InputObject(self.expand_object(definition, depth, visited))
            }
        }
    }

    fn expand_object(
        &self,
        definition: &'t TypeDefinition,
        depth: usize,
        visited: &Visited<'t>,
    ) -> ExpandedObject {
        let visited = with_name(visited, &definition.name);
        let interfaces: Vec<String> = definition
            .interfaces
            .iter()
            .filter(|interface| self.documented(interface).is_some())
            .cloned()
            .collect();
        ExpandedObject {
            name: definition.name.clone(),
            description: definition.description.clone(),
            fields: definition
                .fields
                .iter()
                .filter(|field| !field.annotations.is_ignored())
                .map(|field| self.expand_field(field, depth, &visited))
                .collect(),
            interfaces: (!interfaces.is_empty()).then_some(interfaces),
            is_collapsible: depth > self.default_levels,
        }
    }

    fn expand_field(
        &self,
        field: &'t FieldDefinition,
        depth: usize,
        visited: &Visited<'t>,
    ) -> ExpandedField {
        let args: Vec<_> = field
            .arguments
            .iter()
            .filter(|argument| !argument.annotations.is_ignored())
            .map(|argument| self.expand_argument(argument))
            .collect();

        ExpandedField {
            name: field.name.clone(),
            description: field.description.clone(),
            ty: self.expand_reference(&field.type_ref, depth, visited),
            type_ref: Some(field.type_ref.clone()),
            is_required: field.is_required,
            is_list: field.is_list,
            is_deprecated: field.is_deprecated,
            deprecation_reason: field.deprecation_reason.clone(),
            args: (!args.is_empty()).then_some(args),
        }
    }

    /// Expand a type referenced from a definition at `depth`
    fn expand_reference(
        &self,
        type_ref: &'t str,
        depth: usize,
        visited: &Visited<'t>,
    ) -> ExpandedType {
        match TypeReference::parse(type_ref) {
            TypeReference::List(item) => {
                ExpandedType::list(self.expand_reference(item, depth, visited))
            }
            TypeReference::Named(name) => {
                let Some(definition) = self.documented(name) else {
                    return ExpandedType::scalar(name, None);
                };
                if visited.contains(name) {
                    return if self.show_circular_references {
                        ExpandedType::circular_ref(name)
                    } else {
                        ExpandedType::type_ref(name)
                    };
                }
                if depth >= self.max_depth {
                    return ExpandedType::type_ref(name);
                }
                self.expand_named(definition, depth + 1, visited)
            }
        }
    }
}

fn with_name<'t>(visited: &Visited<'t>, name: &'t str) -> Visited<'t> {
    let mut visited = visited.clone();
    visited.insert(name);
    visited
}
