use graphql_docs::TransformConfig;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::logging::Logging;

/// Configuration for a documentation generation run
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Type expansion and section grouping
    #[serde(default)]
    pub transform: TransformConfig,

    /// Logging options
    #[serde(default)]
    pub logging: Logging,

    /// Fail the run when any warning is reported
    #[serde(default)]
    pub strict: bool,
}

/// The JSON schema of [`Config`], for editor completion of config files
pub fn config_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::FormatStyle;
    use tracing::Level;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();

        assert_eq!(config.transform, TransformConfig::default());
        assert_eq!(config.logging.level, Level::INFO);
        assert_eq!(config.logging.format, FormatStyle::Full);
        assert!(!config.strict);
    }

    #[test]
    fn parses_every_section() {
        let config: Config = serde_yaml::from_str(
            r#"
            transform:
              max_depth: 3
              default_levels: 1
              show_circular_references: false
              exclude_doc_groups: [Internal]
              require_examples: true
            logging:
              level: debug
              format: json
            strict: true
            "#,
        )
        .unwrap();

        assert_eq!(config.transform.max_depth, 3);
        assert_eq!(config.transform.default_levels, 1);
        assert!(!config.transform.show_circular_references);
        assert_eq!(config.transform.exclude_doc_groups, ["Internal"]);
        assert!(config.transform.require_examples);
        assert_eq!(config.logging.level, Level::DEBUG);
        assert_eq!(config.logging.format, FormatStyle::Json);
        assert!(config.strict);
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = serde_yaml::from_str::<Config>("strictness: true");

        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }

    #[test]
    fn schema_describes_every_section() {
        let schema = serde_json::to_value(config_schema()).unwrap();

        let properties = schema["properties"].as_object().unwrap();
        let mut keys: Vec<_> = properties.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["logging", "strict", "transform"]);
    }
}
