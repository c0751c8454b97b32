//! Environment source: APLUS_<SECTION>__<KEY> variables and the OLLAMA_API_URL override.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Endpoint override honored for compatibility with existing deployments.
pub const ENDPOINT_ENV_VAR: &str = "OLLAMA_API_URL";

/// Add environment sources to builder. `OLLAMA_API_URL` wins over everything else.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let endpoint = std::env::var(ENDPOINT_ENV_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty());

    builder
        .add_source(
            Environment::with_prefix("APLUS")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("generation.endpoint", endpoint)
}
