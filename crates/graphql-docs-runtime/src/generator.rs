use std::path::Path;

use apollo_compiler::Schema;
use apollo_compiler::validation::Valid;
use graphql_docs::{ExampleBundle, Generated};
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::GenerationError;

/// Runs the documentation pipeline with one configuration
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: Config,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build a generator from a YAML config file merged with the environment
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, GenerationError> {
        Ok(Self::new(crate::read_config(path)?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and validate SDL. `path` only labels diagnostics.
    pub fn parse_schema(
        sdl: &str,
        path: impl AsRef<Path>,
    ) -> Result<Valid<Schema>, GenerationError> {
        Ok(Schema::parse_and_validate(sdl, path)?)
    }

    /// Parse a JSON array of example bundles
    pub fn parse_examples(json: &str) -> Result<Vec<ExampleBundle>, GenerationError> {
        let bundles: Vec<ExampleBundle> = serde_json::from_str(json)?;
        debug!(bundles = bundles.len(), "parsed example bundles");
        Ok(bundles)
    }

    /// Parse `sdl` and build its documentation model
    pub fn generate(
        &self,
        sdl: &str,
        path: impl AsRef<Path>,
        bundles: &[ExampleBundle],
    ) -> Result<Generated, GenerationError> {
        let schema = Self::parse_schema(sdl, path)?;
        self.generate_from_schema(&schema, bundles)
    }

    /// Build the documentation model of an already validated schema.
    ///
    /// In strict mode any warning fails the run.
    pub fn generate_from_schema(
        &self,
        schema: &Valid<Schema>,
        bundles: &[ExampleBundle],
    ) -> Result<Generated, GenerationError> {
        let generated = graphql_docs::generate(schema, bundles, &self.config.transform);

        if self.config.strict && !generated.warnings.is_empty() {
            return Err(GenerationError::Strict(generated.warnings));
        }

        info!(
            sections = generated.doc_model.sections.len(),
            operations = generated.doc_model.operations().count(),
            types = generated.doc_model.types.len(),
            warnings = generated.warnings.len(),
            "generated documentation"
        );
        Ok(generated)
    }
}
