use schemars::JsonSchema;
use serde::Deserialize;

/// Log output format style. Maps to a format from tracing-subscriber.
#[derive(Debug, Default, Deserialize, JsonSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormatStyle {
    /// Human-readable, single-line logs
    #[default]
    Full,
    /// Single-line logs optimized for short line lengths
    Compact,
    /// Newline-delimited JSON logs
    Json,
    /// Multi-line logs with source locations
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::FormatStyle;
    use rstest::rstest;
    use serde::Deserialize;
    use serde::de::value::{Error, StrDeserializer};

    #[test]
    fn full_style_returned_as_default() {
        assert_eq!(FormatStyle::default(), FormatStyle::Full);
    }

    #[rstest]
    #[case("full", FormatStyle::Full)]
    #[case("compact", FormatStyle::Compact)]
    #[case("json", FormatStyle::Json)]
    #[case("pretty", FormatStyle::Pretty)]
    fn deserializes_lowercase_names(#[case] value: &str, #[case] expected: FormatStyle) {
        let de = StrDeserializer::<Error>::new(value);
        assert_eq!(FormatStyle::deserialize(de).unwrap(), expected);

        let from_yaml: FormatStyle = serde_yaml::from_str(value).unwrap();
        assert_eq!(from_yaml, expected);
    }

    #[rstest]
    #[case("Full")]
    #[case("JSON")]
    #[case("verbose")]
    fn rejects_unknown_styles(#[case] invalid_value: &str) {
        let result: Result<FormatStyle, _> = serde_yaml::from_str(invalid_value);

        assert!(
            result
                .expect_err("expected an error for invalid format style")
                .to_string()
                .contains("unknown variant")
        );
    }
}
