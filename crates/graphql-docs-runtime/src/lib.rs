//! Runtime utilities
//!
//! Configuration loading, logging setup and the [`Generator`] entry point
//! around the `graphql-docs` engine.

mod config;
pub mod errors;
mod generator;
pub mod logging;

use std::path::Path;

pub use config::{Config, config_schema};
pub use errors::GenerationError;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
pub use generator::Generator;

/// Prefix of the environment variables read into the config
const ENV_PREFIX: &str = "GRAPHQL_DOCS_";

/// Separator to use when drilling down into nested options in the env figment
const ENV_NESTED_SEPARATOR: &str = "__";

/// Read configuration from environment variables only (when no config file is provided)
#[allow(clippy::result_large_err)]
pub fn read_config_from_env() -> Result<Config, figment::Error> {
    Figment::new()
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .extract()
}

/// Read in a config from a YAML file, filling in any missing values from the environment.
#[allow(clippy::result_large_err)]
pub fn read_config(yaml_path: impl AsRef<Path>) -> Result<Config, figment::Error> {
    Figment::new()
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .join(Yaml::file(yaml_path))
        .extract()
}
