use tracing::Level;

pub(super) const fn log_level() -> Level {
    Level::INFO
}
