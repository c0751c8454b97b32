//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

use crate::config::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Create a Config builder with merge policy defaults applied.
/// Remaining defaults come from the serde `default` attributes on the config structs.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("generation.endpoint", DEFAULT_ENDPOINT)?
        .set_default("generation.model", DEFAULT_MODEL)?
        .set_default("index.persist_dir", "./client_books")
}
