//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Environment variable prefix; nested keys use `__` (e.g. `VSR_WINDOW_WINDOW__PADDING`).
pub const ENV_PREFIX: &str = "VSR_WINDOW";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("data.data_dir", "./dataset/train")?
        .set_default("window.n_frames", 7)?
        .set_default("window.padding", "reflection")?
        .set_default("runtime.seed", 123)
}

/// Environment source applied last, so it overrides every file.
pub fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
