//! Discovery of every type reachable from a starting type reference

use apollo_compiler::Schema;
use apollo_compiler::ast::{
    Directive, DirectiveList, FieldDefinition as AstFieldDefinition, InputValueDefinition,
};
use apollo_compiler::schema::{DirectiveList as ComponentDirectiveList, ExtendedType};
use tracing::debug;

use super::definitions::{
    Argument, EnumValueDefinition, FieldDefinition, TypeDefinition, TypeKind, TypeTable,
};
use crate::annotations::{AnnotationExtractor, AnnotationSet, value_to_json};
use crate::type_ref;
use crate::warning::ParserWarning;

/// The reason reported for `@deprecated` without an explicit `reason`
pub const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// Walks the schema from type references and records each named type once.
///
/// A name is inserted into the table before its own references are walked,
/// so self-referential and mutually referential types terminate.
pub struct TypeCollector<'s> {
    schema: &'s Schema,
    extractor: AnnotationExtractor,
    types: TypeTable,
    warnings: Vec<ParserWarning>,
}

impl<'s> TypeCollector<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            extractor: AnnotationExtractor::new(),
            types: TypeTable::default(),
            warnings: Vec::new(),
        }
    }

    /// Collect the type named by `type_ref` and everything it references.
    ///
    /// Returns the base type name. Names absent from the schema are not
    /// recorded; later stages render them as opaque scalars.
    pub fn collect(&mut self, type_ref: &str) -> String {
        let name = type_ref::base_name(type_ref);
        if self.types.contains_key(name) {
            return name.to_string();
        }

        let schema: &'s Schema = self.schema;
        let Some(extended_type) = schema.types.get(name) else {
            debug!(type_name = name, "type is not declared in the schema");
            return name.to_string();
        };

        let (definition, references) = self.define(extended_type);
        self.types.insert(name.to_string(), definition);
        for reference in references {
            self.collect(&reference);
        }

        name.to_string()
    }

    /// The types collected so far
    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    pub fn warnings(&self) -> &[ParserWarning] {
        &self.warnings
    }

    pub fn into_parts(self) -> (TypeTable, Vec<ParserWarning>) {
        (self.types, self.warnings)
    }

    /// Extract the documentation directives of a node, recording any warnings
    pub(crate) fn annotations<'d>(
        &mut self,
        coordinate: &str,
        directives: impl IntoIterator<Item = &'d Directive>,
    ) -> AnnotationSet {
        self.extractor
            .extract(coordinate, directives, &mut self.warnings)
    }

    /// Build the record of a field argument or operation argument
    pub(crate) fn argument(&mut self, parent: &str, argument: &InputValueDefinition) -> Argument {
        let coordinate = format!("{parent}({}:)", argument.name);
        let type_ref = argument.ty.to_string();
        Argument {
            name: argument.name.to_string(),
            is_required: argument.ty.is_non_null(),
            description: argument.description.as_deref().map(str::to_string),
            default_value: argument.default_value.as_deref().map(value_to_json),
            annotations: self.annotations(&coordinate, ast_directives(&argument.directives)),
            type_ref,
        }
    }

    /// Build the definition of a named type along with the type references
    /// it needs collected
    fn define(&mut self, extended_type: &ExtendedType) -> (TypeDefinition, Vec<String>) {
        let name = extended_type.name().as_str();
        let mut references = Vec::new();

        let definition = match extended_type {
            ExtendedType::Scalar(scalar) => {
                let mut definition = TypeDefinition::new(TypeKind::Scalar, name);
                definition.description = scalar.description.as_deref().map(str::to_string);
                definition.annotations =
                    self.annotations(name, schema_directives(&scalar.directives));
                definition
            }
            ExtendedType::Object(object) => {
                let mut definition = TypeDefinition::new(TypeKind::Object, name);
                definition.description = object.description.as_deref().map(str::to_string);
                definition.annotations =
                    self.annotations(name, schema_directives(&object.directives));
                definition.fields = object
                    .fields
                    .values()
                    .map(|field| self.output_field(name, field))
                    .collect();
                definition.interfaces = object
                    .implements_interfaces
                    .iter()
                    .map(|interface| interface.to_string())
                    .collect();
                definition
            }
            ExtendedType::Interface(interface) => {
                let mut definition = TypeDefinition::new(TypeKind::Interface, name);
                definition.description = interface.description.as_deref().map(str::to_string);
                definition.annotations =
                    self.annotations(name, schema_directives(&interface.directives));
                definition.fields = interface
                    .fields
                    .values()
                    .map(|field| self.output_field(name, field))
                    .collect();
                definition.interfaces = interface
                    .implements_interfaces
                    .iter()
                    .map(|interface| interface.to_string())
                    .collect();
                definition
            }
            ExtendedType::InputObject(input) => {
                let mut definition = TypeDefinition::new(TypeKind::InputObject, name);
                definition.description = input.description.as_deref().map(str::to_string);
                definition.annotations =
                    self.annotations(name, schema_directives(&input.directives));
                definition.fields = input
                    .fields
                    .values()
                    .map(|field| self.input_field(name, field))
                    .collect();
                definition
            }
            ExtendedType::Union(union) => {
                let mut definition = TypeDefinition::new(TypeKind::Union, name);
                definition.description = union.description.as_deref().map(str::to_string);
                definition.annotations =
                    self.annotations(name, schema_directives(&union.directives));
                definition.possible_types = union
                    .members
                    .iter()
                    .map(|member| member.to_string())
                    .collect();
                definition
            }
            ExtendedType::Enum(enumeration) => {
                let mut definition = TypeDefinition::new(TypeKind::Enum, name);
                definition.description = enumeration.description.as_deref().map(str::to_string);
                definition.annotations =
                    self.annotations(name, schema_directives(&enumeration.directives));
                definition.enum_values = enumeration
                    .values
                    .values()
                    .map(|value| {
                        let coordinate = format!("{name}.{}", value.value);
                        let deprecation_reason = deprecation(ast_directives(&value.directives));
                        EnumValueDefinition {
                            name: value.value.to_string(),
                            description: value.description.as_deref().map(str::to_string),
                            is_deprecated: deprecation_reason.is_some(),
                            deprecation_reason,
                            annotations: self
                                .annotations(&coordinate, ast_directives(&value.directives)),
                        }
                    })
                    .collect();
                definition
            }
        };

        for field in &definition.fields {
            references.push(field.type_ref.clone());
            references.extend(
                field
                    .arguments
                    .iter()
                    .map(|argument| argument.type_ref.clone()),
            );
        }
        references.extend(definition.possible_types.iter().cloned());
        references.extend(definition.interfaces.iter().cloned());

        (definition, references)
    }

    fn output_field(&mut self, parent: &str, field: &AstFieldDefinition) -> FieldDefinition {
        let coordinate = format!("{parent}.{}", field.name);
        let type_ref = field.ty.to_string();
        let deprecation_reason = deprecation(ast_directives(&field.directives));
        FieldDefinition {
            name: field.name.to_string(),
            description: field.description.as_deref().map(str::to_string),
            is_required: field.ty.is_non_null(),
            is_list: field.ty.is_list(),
            is_deprecated: deprecation_reason.is_some(),
            deprecation_reason,
            arguments: field
                .arguments
                .iter()
                .map(|argument| self.argument(&coordinate, argument))
                .collect(),
            annotations: self.annotations(&coordinate, ast_directives(&field.directives)),
            type_ref,
        }
    }

    fn input_field(&mut self, parent: &str, field: &InputValueDefinition) -> FieldDefinition {
        let coordinate = format!("{parent}.{}", field.name);
        let type_ref = field.ty.to_string();
        let deprecation_reason = deprecation(ast_directives(&field.directives));
        FieldDefinition {
            name: field.name.to_string(),
            description: field.description.as_deref().map(str::to_string),
            is_required: field.ty.is_non_null(),
            is_list: field.ty.is_list(),
            is_deprecated: deprecation_reason.is_some(),
            deprecation_reason,
            arguments: Vec::new(),
            annotations: self.annotations(&coordinate, ast_directives(&field.directives)),
            type_ref,
        }
    }
}

/// The directives of a type definition, without their extension origin
pub(crate) fn schema_directives(
    directives: &ComponentDirectiveList,
) -> impl Iterator<Item = &Directive> {
    directives.iter().map(|directive| &*directive.node)
}

/// The directives of a field, argument or enum value
pub(crate) fn ast_directives(directives: &DirectiveList) -> impl Iterator<Item = &Directive> {
    directives.iter().map(|directive| &**directive)
}

/// The deprecation reason of a node, if it carries `@deprecated`
pub(crate) fn deprecation<'d>(
    directives: impl IntoIterator<Item = &'d Directive>,
) -> Option<String> {
    directives
        .into_iter()
        .find(|directive| directive.name.as_str() == "deprecated")
        .map(|directive| {
            directive
                .specified_argument_by_name("reason")
                .and_then(|reason| reason.as_str())
                .unwrap_or(DEFAULT_DEPRECATION_REASON)
                .to_string()
        })
}
