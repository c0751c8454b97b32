//! CLI route: single route table and run context. Dispatches to the wizard session and
//! presentation.

use crate::config::{ConfigLoader, PlannerConfig};
use crate::error::ApiError;
use crate::folder::ProjectFolder;
use crate::module::{ModuleRegistry, ModuleSheet};
use crate::provider::{Credential, GenerationClient, OllamaClient};
use crate::session::WizardSession;
use crate::wizard::{BookGenre, Notification, NotifyLevel, StructureType, WizardStep};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::cli::parse::{command_name, Commands, KeyCommands};
use crate::cli::presentation::{
    format_modules_json, format_modules_text, format_notifications, format_plan_text,
    format_subfolders_json, format_subfolders_text,
};

/// Runtime context for CLI execution: workspace and resolved configuration.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: PlannerConfig,
}

/// Options for an end-to-end plan run
struct PlanRequest<'a> {
    directory: &'a Path,
    sheet: Option<&'a Path>,
    subfolders: &'a [String],
    genre: Option<&'a str>,
    structure: Option<&'a str>,
    bonus: bool,
    headlines: bool,
    refine: Option<&'a str>,
    api_key: Option<&'a str>,
    format: &'a str,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        if let Err(errors) = config.validate() {
            let joined = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ApiError::ConfigError(joined));
        }
        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let name = command_name(command);
        info!(command = name, "Command started");
        let result = self.execute_inner(command);
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => info!(command = name, duration_ms, "Command finished"),
            Err(e) => warn!(command = name, duration_ms, error = %e, "Command failed"),
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Key {
                command: KeyCommands::Check { key },
            } => {
                Credential::parse(key)?;
                Ok("API key format is valid.".to_string())
            }
            Commands::Subfolders { directory, format } => {
                let mut folder = ProjectFolder::new();
                folder.select(directory.to_string_lossy());
                folder.list_subfolders()?;
                if format == "json" {
                    format_subfolders_json(folder.directory(), folder.subfolders())
                } else {
                    Ok(format_subfolders_text(folder.directory(), folder.subfolders()))
                }
            }
            Commands::Modules { sheet, format } => {
                let (registry, _) = self.load_registry(sheet.as_deref())?;
                if format == "json" {
                    format_modules_json(registry.list_modules())
                } else {
                    Ok(format_modules_text(registry.list_modules()))
                }
            }
            Commands::Summarize { directory, api_key } => {
                let mut session = self.open_session(ModuleRegistry::new())?;
                self.apply_credential(&session, api_key.as_deref())?;
                session.select_directory(directory.to_string_lossy());
                block_on(session.summarize_documents())?
            }
            Commands::Plan {
                directory,
                sheet,
                subfolders,
                genre,
                structure,
                bonus,
                headlines,
                refine,
                api_key,
                format,
            } => self.run_plan(PlanRequest {
                directory,
                sheet: sheet.as_deref(),
                subfolders,
                genre: genre.as_deref(),
                structure: structure.as_deref(),
                bonus: *bonus,
                headlines: *headlines,
                refine: refine.as_deref(),
                api_key: api_key.as_deref(),
                format,
            }),
        }
    }

    fn run_plan(&self, request: PlanRequest<'_>) -> Result<String, ApiError> {
        let (registry, sheet) = self.load_registry(request.sheet)?;
        let mut session = self.open_session(registry)?;
        let mut notes: Vec<Notification> = Vec::new();

        let genre = request.genre.or(sheet.genre.as_deref());
        if let Some(raw) = genre {
            let parsed = BookGenre::parse(raw)
                .ok_or_else(|| ApiError::ConfigError(format!("Unknown genre: {}", raw)))?;
            session.set_genre(parsed);
        }
        let structure = request.structure.or(sheet.structure.as_deref());
        if let Some(raw) = structure {
            let parsed = StructureType::parse(raw)
                .ok_or_else(|| ApiError::ConfigError(format!("Unknown structure type: {}", raw)))?;
            session.set_structure_type(parsed);
        }

        notes.push(self.apply_credential(&session, request.api_key)?);
        notes.push(session.select_directory(request.directory.to_string_lossy()));
        if !request.subfolders.is_empty() {
            notes.push(session.list_subfolders());
            for name in request.subfolders {
                if !session.set_subfolder_selected(name, true) {
                    notes.push(Notification::warning(format!("Unknown subfolder: {}", name)));
                }
            }
        }
        session.readiness().check()?;

        session.set_bonus_enabled(request.bonus);
        if request.bonus {
            for bonus in sheet.bonus {
                notes.push(session.add_bonus_module(bonus));
            }
        }

        let report = block_on(async {
            let mut report = None;
            while session.state().step != WizardStep::Generation {
                let outcome = session.next();
                if let Some(ran) = session.run_effects(&outcome).await {
                    report = Some(ran);
                }
            }
            if request.headlines {
                if let Err(e) = session.propose_headlines().await {
                    notes.push(Notification::warning(format!("Headlines unavailable: {}", e)));
                }
            }
            report
        })?;

        if let Some(refine) = request.refine {
            session.set_refinement_prompt(refine);
        }
        session.next();
        let plan = session.finalize_plan();
        notes.push(Notification::success(format!("{}.", plan.summary())));

        if request.format == "json" {
            return plan.to_json();
        }
        let visible: Vec<Notification> = notes
            .into_iter()
            .filter(|n| n.level != NotifyLevel::Info)
            .collect();
        Ok(format!(
            "{}\n\n{}",
            format_notifications(&visible),
            format_plan_text(plan, report.as_ref())
        ))
    }

    fn open_session(
        &self,
        registry: ModuleRegistry,
    ) -> Result<WizardSession<dyn GenerationClient>, ApiError> {
        let client: Arc<dyn GenerationClient> =
            Arc::new(OllamaClient::new(&self.config.generation)?);
        Ok(WizardSession::with_registry(client, &self.config, registry))
    }

    /// Set the key from the flag, or from config when no flag was given. A rejected
    /// key is an error; a missing one is left for the setup gate to report.
    fn apply_credential(
        &self,
        session: &WizardSession<dyn GenerationClient>,
        flag: Option<&str>,
    ) -> Result<Notification, ApiError> {
        let Some(key) = flag.or(self.config.generation.api_key.as_deref()) else {
            return Ok(Notification::warning("No API key provided."));
        };
        let notification = session.set_credential(key);
        if notification.level == NotifyLevel::Error {
            return Err(ApiError::InvalidCredentialFormat);
        }
        Ok(notification)
    }

    /// Registry from a module sheet (ids in sheet order), or the default modules.
    fn load_registry(
        &self,
        sheet: Option<&Path>,
    ) -> Result<(ModuleRegistry, ModuleSheet), ApiError> {
        let Some(path) = sheet else {
            return Ok((
                ModuleRegistry::with_defaults(crate::session::DEFAULT_MODULE_COUNT),
                ModuleSheet::default(),
            ));
        };
        let path = if path.is_relative() {
            self.workspace_root.join(path)
        } else {
            path.to_path_buf()
        };
        let mut sheet = ModuleSheet::load(&path)?;
        let mut registry = ModuleRegistry::new();
        for (position, draft) in std::mem::take(&mut sheet.modules).into_iter().enumerate() {
            let fields = draft.into_fields(position as u32 + 1)?;
            registry.add_with_fields(fields);
        }
        Ok((registry, sheet))
    }
}

/// Drive a future to completion on a fresh runtime. Commands run outside any runtime.
fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, ApiError> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(ApiError::ProviderError(
            "Cannot run a command from within an async runtime".to_string(),
        ));
    }
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| ApiError::ProviderError(format!("Failed to create runtime: {}", e)))?;
    Ok(runtime.block_on(future))
}
