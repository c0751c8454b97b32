//! Config loading facade: assembles sources in precedence order and deserializes.

use crate::config::merge::merge_policy;
use crate::config::sources::{env, global_file, workspace_file};
use crate::config::PlannerConfig;
use crate::error::ApiError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Loads [`PlannerConfig`] from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{APLUS_ENV}.toml`, `APLUS_*` environment,
    /// `OLLAMA_API_URL`.
    pub fn load(workspace_root: &Path) -> Result<PlannerConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = env::add_to_builder(builder)?;

        let config: PlannerConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            endpoint = %config.generation.endpoint,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from an explicit file; environment still applies on top.
    pub fn load_from_file(path: &Path) -> Result<PlannerConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = env::add_to_builder(builder)?;
        Ok(builder.build()?.try_deserialize()?)
    }
}
