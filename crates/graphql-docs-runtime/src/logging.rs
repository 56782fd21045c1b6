//! Logging config and subscriber setup

mod defaults;
mod format_style;
mod parsers;

pub use format_style::FormatStyle;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, Layer as LayerTrait, Registry};

/// Logging related options
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Logging {
    /// The log level to use for tracing
    #[serde(
        default = "defaults::log_level",
        deserialize_with = "parsers::from_str"
    )]
    #[schemars(schema_with = "level")]
    pub level: Level,

    #[serde(default)]
    pub format: FormatStyle,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            format: FormatStyle::default(),
        }
    }
}

type LoggingLayer = Box<dyn LayerTrait<Registry> + Send + Sync>;

pub struct LoggingLayerBuilder {
    writer: Option<BoxMakeWriter>,
    ansi_enabled: bool,
}

impl Default for LoggingLayerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingLayerBuilder {
    pub fn new() -> Self {
        Self {
            writer: None,
            ansi_enabled: false,
        }
    }

    /// Write logs somewhere other than stderr
    pub fn with_writer<W>(mut self, mw: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.writer = Some(BoxMakeWriter::new(mw));
        self
    }

    pub fn with_ansi_enabled(mut self, enabled: bool) -> Self {
        self.ansi_enabled = enabled;
        self
    }

    pub fn build(self, logging: &Logging) -> Result<LoggingLayer, anyhow::Error> {
        // Stdout is left to the generated output
        let (writer, ansi_enabled) = match self.writer {
            Some(writer) => (writer, self.ansi_enabled),
            None => (BoxMakeWriter::new(std::io::stderr), true),
        };

        let layer = tracing_subscriber::fmt::layer();
        let formatted_layer = match logging.format {
            FormatStyle::Full => layer
                .with_writer(writer)
                .with_ansi(ansi_enabled)
                .with_target(false)
                .boxed(),
            FormatStyle::Compact => layer
                .compact()
                .with_writer(writer)
                .with_ansi(ansi_enabled)
                .with_target(false)
                .boxed(),
            FormatStyle::Json => layer
                .json()
                .with_writer(writer)
                .with_ansi(ansi_enabled)
                .with_target(false)
                .boxed(),
            FormatStyle::Pretty => layer
                .pretty()
                .with_writer(writer)
                .with_ansi(ansi_enabled)
                .with_target(false)
                .boxed(),
        };

        Ok(formatted_layer)
    }
}

impl Logging {
    /// The configured level, refined by any `RUST_LOG` directives
    pub fn env_filter(logging: &Logging) -> Result<EnvFilter, anyhow::Error> {
        let mut env_filter = EnvFilter::from_default_env().add_directive(logging.level.into());

        if logging.level == Level::INFO {
            env_filter = env_filter.add_directive("apollo_compiler=warn".parse()?);
        }
        Ok(env_filter)
    }

    /// Install a global subscriber that logs to stderr
    pub fn init(&self) -> Result<(), anyhow::Error> {
        let layer = LoggingLayerBuilder::new().build(self)?;
        Registry::default()
            .with(layer)
            .with(Self::env_filter(self)?)
            .try_init()?;
        Ok(())
    }
}

fn level(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
    /// Log level
    #[derive(JsonSchema)]
    #[schemars(rename_all = "lowercase")]
    // Only used to derive the schema of `tracing::Level`
    #[allow(dead_code)]
    enum Level {
        Trace,
        Debug,
        Info,
        Warn,
        Error,
    }

    Level::json_schema(generator)
}
