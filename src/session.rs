//! Wizard Session
//!
//! Composes the step state machine with everything the commands act on: the module
//! registry, the project folder, setup choices, bonus modules, headline proposals and
//! the final plan. The generation client is shared behind an [`Arc`] handed in at
//! construction; the session never reaches for global state.
//!
//! Every command returns plain values (notifications, outcomes, reports) that a front
//! end renders however it likes.

use crate::config::{GenerationConfig, IndexConfig, PlannerConfig};
use crate::error::{ApiError, SetupBlocker};
use crate::folder::ProjectFolder;
use crate::index::{ensure_index, summarize};
use crate::module::{BonusModule, ModuleEntry, ModuleId, ModuleRegistry, ModuleSnapshot};
use crate::plan::{parse_headlines, FinalPlan, HEADLINE_PROMPT};
use crate::population::{failure_output, populate_all, PopulationReport};
use crate::provider::GenerationClient;
use crate::schema::{module_request_prompt, parse_module_response};
use crate::wizard::{
    apply, BookGenre, Effect, Notification, Outcome, SetupReadiness, StructureType,
    WizardCommand, WizardState,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Modules a fresh session starts with
pub const DEFAULT_MODULE_COUNT: usize = 4;

/// Whether a manual execution's response could be mapped onto the module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Applied,
    /// The raw output was stored but the fields were left alone
    Rejected(String),
}

pub struct WizardSession<C: GenerationClient + ?Sized> {
    id: String,
    client: Arc<C>,
    generation: GenerationConfig,
    index: IndexConfig,
    state: WizardState,
    registry: ModuleRegistry,
    folder: ProjectFolder,
    genre: BookGenre,
    structure: StructureType,
    bonus_modules: Vec<BonusModule>,
    headlines: Vec<String>,
    refinement_prompt: String,
    book_summary: Option<String>,
    final_plan: Option<FinalPlan>,
}

impl<C: GenerationClient + ?Sized> WizardSession<C> {
    /// New session with the default modules.
    pub fn new(client: Arc<C>, config: &PlannerConfig) -> Self {
        Self::with_registry(
            client,
            config,
            ModuleRegistry::with_defaults(DEFAULT_MODULE_COUNT),
        )
    }

    pub fn with_registry(client: Arc<C>, config: &PlannerConfig, registry: ModuleRegistry) -> Self {
        let id = Uuid::new_v4().to_string();
        info!(session_id = %id, modules = registry.len(), "Wizard session started");
        Self {
            id,
            client,
            generation: config.generation.clone(),
            index: config.index.clone(),
            state: WizardState::new(),
            registry,
            folder: ProjectFolder::new(),
            genre: BookGenre::default(),
            structure: StructureType::default(),
            bonus_modules: Vec::new(),
            headlines: Vec::new(),
            refinement_prompt: String::new(),
            book_summary: None,
            final_plan: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ModuleRegistry {
        &mut self.registry
    }

    pub fn folder(&self) -> &ProjectFolder {
        &self.folder
    }

    pub fn genre(&self) -> BookGenre {
        self.genre
    }

    pub fn set_genre(&mut self, genre: BookGenre) {
        self.genre = genre;
    }

    pub fn structure_type(&self) -> StructureType {
        self.structure
    }

    pub fn set_structure_type(&mut self, structure: StructureType) {
        self.structure = structure;
    }

    pub fn bonus_modules(&self) -> &[BonusModule] {
        &self.bonus_modules
    }

    pub fn headlines(&self) -> &[String] {
        &self.headlines
    }

    pub fn refinement_prompt(&self) -> &str {
        &self.refinement_prompt
    }

    pub fn set_refinement_prompt(&mut self, text: impl Into<String>) {
        self.refinement_prompt = text.into();
    }

    pub fn book_summary(&self) -> Option<&str> {
        self.book_summary.as_deref()
    }

    pub fn final_plan(&self) -> Option<&FinalPlan> {
        self.final_plan.as_ref()
    }

    // Setup

    pub fn set_credential(&self, raw: &str) -> Notification {
        match self.client.set_credential(raw) {
            Ok(()) => {
                info!(session_id = %self.id, "API key set");
                Notification::success("API key set successfully!")
            }
            Err(err) => {
                warn!(session_id = %self.id, "API key rejected");
                Notification::error(err.to_string())
            }
        }
    }

    /// Select the book folder. A summary of the previous folder is dropped.
    pub fn select_directory(&mut self, directory: impl Into<String>) -> Notification {
        self.folder.select(directory);
        self.book_summary = None;
        Notification::success(format!("Selected directory: {}", self.folder.directory()))
    }

    pub fn flush_directory(&mut self) -> Notification {
        self.folder.flush();
        self.book_summary = None;
        Notification::warning("Directory selection cleared.")
    }

    pub fn list_subfolders(&mut self) -> Notification {
        match self.folder.list_subfolders() {
            Ok(0) => Notification::warning("No subfolders found."),
            Ok(count) => {
                info!(session_id = %self.id, count, "Subfolders listed");
                Notification::success("Subfolders loaded.")
            }
            Err(err) => Notification::error(err.to_string()),
        }
    }

    /// Tick or untick a listed subfolder. False when no such subfolder is listed.
    pub fn set_subfolder_selected(&mut self, name: &str, selected: bool) -> bool {
        self.folder.set_selected(name, selected)
    }

    pub fn readiness(&self) -> SetupReadiness<'_> {
        SetupReadiness {
            credential_set: self.client.has_credential(),
            directory: self.folder.directory(),
            subfolders: self.folder.subfolders(),
        }
    }

    // Navigation

    pub fn dispatch(&mut self, command: WizardCommand) -> Outcome {
        let from = self.state.step;
        let outcome = apply(self.state, command, &self.readiness());
        self.state = outcome.state;
        if outcome.state.step != from {
            info!(
                session_id = %self.id,
                from = from.number(),
                step = outcome.state.step.number(),
                "Wizard step changed"
            );
        }
        for notification in outcome.notifications() {
            warn!(
                session_id = %self.id,
                step = from.number(),
                message = %notification.message,
                "Transition blocked"
            );
        }
        outcome
    }

    pub fn next(&mut self) -> Outcome {
        self.dispatch(WizardCommand::Next)
    }

    pub fn back(&mut self) -> Outcome {
        self.dispatch(WizardCommand::Back)
    }

    pub fn set_bonus_enabled(&mut self, enabled: bool) -> Outcome {
        self.dispatch(WizardCommand::SetBonus(enabled))
    }

    /// Carry out the effects of `outcome`. Returns the population report when one ran.
    pub async fn run_effects(&mut self, outcome: &Outcome) -> Option<PopulationReport> {
        let mut report = None;
        for effect in &outcome.effects {
            if let Effect::PopulateModules = effect {
                report = Some(self.populate_modules().await);
            }
        }
        report
    }

    // Modules

    pub fn add_module(&mut self, prefill: Option<ModuleSnapshot>) -> ModuleId {
        self.registry.add_module(prefill).id
    }

    /// `None` when `id` is not a live module; removal of an unknown id is silent.
    pub fn remove_module(&mut self, id: ModuleId) -> Option<Notification> {
        self.registry.remove_module(id).then(|| {
            info!(session_id = %self.id, module_id = id, "Module removed");
            Notification::info(format!("Module {} removed.", id))
        })
    }

    pub fn undo_removal(&mut self) -> Notification {
        match self.registry.undo_last_removal() {
            Some(entry) => {
                info!(session_id = %self.id, module_id = entry.id, "Module restored");
                Notification::success(format!("Module {} restored.", entry.id))
            }
            None => Notification::warning("No module to undo."),
        }
    }

    pub fn add_bonus_module(&mut self, bonus: BonusModule) -> Notification {
        self.bonus_modules.push(bonus);
        info!(session_id = %self.id, count = self.bonus_modules.len(), "Bonus module field added");
        Notification::success("Bonus module field added")
    }

    pub fn modules(&self) -> &[ModuleEntry] {
        self.registry.list_modules()
    }

    // Generation

    /// One generation call per module, all in flight together.
    pub async fn populate_modules(&mut self) -> PopulationReport {
        info!(session_id = %self.id, modules = self.registry.len(), "Populating modules");
        let report = populate_all(
            self.registry.modules_mut(),
            self.client.as_ref(),
            self.generation.population_max_tokens,
        )
        .await;
        info!(
            session_id = %self.id,
            populated = report.populated.len(),
            failed = report.failed.len(),
            "Population finished"
        );
        report
    }

    /// Index the selected folder and ask for a book summary. The result is kept for
    /// later module executions.
    pub async fn summarize_documents(&mut self) -> Result<String, ApiError> {
        let data_dir = self
            .folder
            .path()
            .ok_or(ApiError::SetupBlocked(SetupBlocker::MissingDirectory))?;
        let handle = ensure_index(&data_dir, &self.index.persist_dir, &self.index)?;
        let summary = summarize(
            &handle,
            self.client.as_ref(),
            &self.index,
            self.generation.summary_max_tokens,
        )
        .await?;
        info!(session_id = %self.id, documents = handle.len(), "Book summary ready");
        self.book_summary = Some(summary.clone());
        Ok(summary)
    }

    /// Execute one module: send its current values, store the raw response as its
    /// output, then map the response onto its fields when it validates.
    ///
    /// `book_summary` falls back to the summary from
    /// [`summarize_documents`](Self::summarize_documents).
    pub async fn execute_module(
        &mut self,
        id: ModuleId,
        book_summary: Option<&str>,
    ) -> Result<FieldUpdate, ApiError> {
        let entry = self.registry.get(id).ok_or(ApiError::ModuleNotFound(id))?;
        if !self.client.has_credential() {
            return Err(ApiError::MissingCredential);
        }
        let summary = book_summary.or(self.book_summary.as_deref());
        let prompt = module_request_prompt(id, &entry.fields, self.structure, summary)?;

        let result = self
            .client
            .generate(&prompt, self.generation.module_max_tokens)
            .await;

        let entry = self
            .registry
            .get_mut(id)
            .ok_or(ApiError::ModuleNotFound(id))?;
        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    session_id = %self.id,
                    module_id = id,
                    error = %err,
                    "Module execution failed"
                );
                entry.execution_output = failure_output(&err);
                return Err(err);
            }
        };
        entry.execution_output = raw;
        info!(session_id = %self.id, module_id = id, "Module executed");

        let update = parse_module_response(&entry.execution_output)
            .and_then(|document| document.apply_to(&mut entry.fields));
        Ok(match update {
            Ok(()) => FieldUpdate::Applied,
            Err(err) => {
                warn!(
                    session_id = %self.id,
                    module_id = id,
                    error = %err,
                    "Module response not applied"
                );
                FieldUpdate::Rejected(err.to_string())
            }
        })
    }

    pub async fn propose_headlines(&mut self) -> Result<&[String], ApiError> {
        let text = self
            .client
            .generate(HEADLINE_PROMPT, self.generation.headline_max_tokens)
            .await?;
        self.headlines = parse_headlines(&text);
        info!(session_id = %self.id, count = self.headlines.len(), "Headlines proposed");
        Ok(&self.headlines)
    }

    /// Assemble the final plan from the current modules and choices.
    pub fn finalize_plan(&mut self) -> &FinalPlan {
        let mut plan = FinalPlan::new(
            self.id.clone(),
            self.genre,
            self.structure,
            self.registry.list_modules(),
        );
        if self.state.bonus_enabled {
            plan.bonus_modules = self.bonus_modules.clone();
        }
        plan.headlines = self.headlines.clone();
        let refinement = self.refinement_prompt.trim();
        plan.refinement_prompt = (!refinement.is_empty()).then(|| refinement.to_string());
        info!(session_id = %self.id, modules = plan.modules.len(), "{}", plan.summary());
        self.final_plan.insert(plan)
    }
}
