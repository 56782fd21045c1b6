use std::fmt;

use apollo_compiler::Schema;
use apollo_compiler::validation::WithErrors;
use graphql_docs::ParserWarning;

/// Prints each diagnostic message without rendering source snippets
struct SafeWithErrors<'a, T>(&'a WithErrors<T>);

impl<T> fmt::Display for SafeWithErrors<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = &self.0.errors;

        if errors.is_empty() {
            return write!(f, "Unknown error");
        }

        writeln!(f, "GraphQL validation errors:")?;
        for (i, diagnostic) in errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, diagnostic.error)?;
        }

        Ok(())
    }
}

/// One warning per line
struct WarningList<'a>(&'a [ParserWarning]);

impl fmt::Display for WarningList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for warning in self.0 {
            writeln!(f, "  - {warning}")?;
        }
        Ok(())
    }
}

/// An error that stops a generation run
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Invalid schema: {}", SafeWithErrors(.0.as_ref()))]
    InvalidSchema(Box<WithErrors<Schema>>),

    #[error("Invalid example bundles: {0}")]
    InvalidExamples(#[from] serde_json::Error),

    #[error("Strict mode: {} warning(s) reported\n{}", .0.len(), WarningList(.0))]
    Strict(Vec<ParserWarning>),

    #[error("Invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<WithErrors<Schema>> for GenerationError {
    fn from(errors: WithErrors<Schema>) -> Self {
        GenerationError::InvalidSchema(Box::new(errors))
    }
}

impl From<figment::Error> for GenerationError {
    fn from(error: figment::Error) -> Self {
        GenerationError::Config(Box::new(error))
    }
}
