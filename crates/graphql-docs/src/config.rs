use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Options controlling type expansion and section grouping
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// How many levels of nested object types are expanded inline in the
    /// type catalog before falling back to references
    pub max_depth: usize,

    /// Nested objects deeper than this are marked collapsible
    pub default_levels: usize,

    /// Render references back to a type being expanded as circular
    /// references instead of plain type references
    pub show_circular_references: bool,

    /// Sections to drop from the output, along with their operations
    pub exclude_doc_groups: Vec<String>,

    /// Report every documented operation that has no examples
    pub require_examples: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            max_depth: defaults::MAX_DEPTH,
            default_levels: defaults::DEFAULT_LEVELS,
            show_circular_references: true,
            exclude_doc_groups: Vec::new(),
            require_examples: false,
        }
    }
}

mod defaults {
    pub(super) const MAX_DEPTH: usize = 5;
    pub(super) const DEFAULT_LEVELS: usize = 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config: TransformConfig =
            serde_json::from_value(serde_json::json!({ "max_depth": 3 })).expect("valid config");

        assert_eq!(
            config,
            TransformConfig {
                max_depth: 3,
                ..Default::default()
            }
        );
        assert!(config.show_circular_references);
        assert!(!config.require_examples);
    }

    #[test]
    fn rejects_unknown_keys() {
        let result =
            serde_json::from_value::<TransformConfig>(serde_json::json!({ "maxDepth": 3 }));

        assert!(result.is_err());
    }
}
