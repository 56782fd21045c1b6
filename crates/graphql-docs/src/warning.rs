//! Non-fatal problems reported next to the documentation model

use std::fmt;

use itertools::Itertools as _;
use serde::{Deserialize, Serialize};

use crate::annotations::AnnotationKind;
use crate::parser::OperationType;

/// Machine-readable category of a [`ParserWarning`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// A documentation directive had arguments of the wrong shape
    InvalidDirectiveUsage,
    /// An example bundle names an operation missing from the schema
    UnknownOperation,
    /// An example bundle names an operation that only exists under another root type
    OperationTypeMismatch,
    /// A documented operation has no matching examples
    MissingOperationExample,
}

/// A non-fatal problem found while building the documentation model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserWarning {
    pub code: WarningCode,

    /// The offending directive, for directive warnings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_name: Option<AnnotationKind>,

    /// Where the problem was found, e.g. `Query.users` or `mutation.ping`
    pub coordinate: String,

    pub message: String,
}

impl ParserWarning {
    pub(crate) fn invalid_directive(
        kind: AnnotationKind,
        coordinate: &str,
        detail: impl fmt::Display,
    ) -> Self {
        Self {
            code: WarningCode::InvalidDirectiveUsage,
            annotation_name: Some(kind),
            coordinate: coordinate.to_string(),
            message: format!("Invalid @{kind} usage: {detail}"),
        }
    }

    pub(crate) fn unknown_operation(operation_name: &str) -> Self {
        Self {
            code: WarningCode::UnknownOperation,
            annotation_name: None,
            coordinate: operation_name.to_string(),
            message: format!("Operation \"{operation_name}\" not found in schema"),
        }
    }

    pub(crate) fn operation_type_mismatch(
        operation_name: &str,
        declared: OperationType,
        found: &[OperationType],
    ) -> Self {
        Self {
            code: WarningCode::OperationTypeMismatch,
            annotation_name: None,
            coordinate: format!("{declared}.{operation_name}"),
            message: format!(
                "Examples declare \"{operation_name}\" as a {declared} but the schema defines it as a {}",
                found.iter().join(" and ")
            ),
        }
    }

    pub(crate) fn missing_operation_example(operation_type: OperationType, name: &str) -> Self {
        Self {
            code: WarningCode::MissingOperationExample,
            annotation_name: None,
            coordinate: format!("{operation_type}.{name}"),
            message: format!("Operation \"{name}\" is included in docs but has no examples"),
        }
    }
}

impl fmt::Display for ParserWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.coordinate, self.message)
    }
}

/// Drop repeated warnings, keeping the first occurrence of each
pub(crate) fn dedup(warnings: Vec<ParserWarning>) -> Vec<ParserWarning> {
    warnings.into_iter().unique().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let a = ParserWarning::unknown_operation("a");
        let b = ParserWarning::unknown_operation("b");

        let deduped = dedup(vec![a.clone(), b.clone(), a.clone()]);

        assert_eq!(deduped, vec![a, b]);
    }

    #[test]
    fn serializes_codes_in_screaming_snake_case() {
        let warning = ParserWarning::invalid_directive(AnnotationKind::DocTags, "Query.users", "bad");

        insta::assert_json_snapshot!(warning, @r#"
        {
          "code": "INVALID_DIRECTIVE_USAGE",
          "annotationName": "docTags",
          "coordinate": "Query.users",
          "message": "Invalid @docTags usage: bad"
        }
        "#);
    }
}
