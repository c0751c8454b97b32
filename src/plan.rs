//! Final plan and headline helpers.

use crate::error::ApiError;
use crate::module::{BonusModule, MockupStyle, ModuleEntry, ModuleId};
use crate::wizard::{BookGenre, StructureType};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const HEADLINE_PROMPT: &str =
    "Generate 3 compelling, distinct headlines for the book based on its modules and style.";

/// Split a headline response into trimmed, non-blank lines.
pub fn parse_headlines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// One module as recorded in the final plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanModule {
    pub module_id: ModuleId,
    #[serde(rename = "module_title")]
    pub title: String,
    pub headline: String,
    pub subheadline: String,
    pub mockup_style: Option<MockupStyle>,
    pub testimonials: String,
    pub prompt: String,
    pub size: String,
    pub output: String,
}

impl From<&ModuleEntry> for PlanModule {
    fn from(entry: &ModuleEntry) -> Self {
        let fields = &entry.fields;
        Self {
            module_id: entry.id,
            title: fields.title.clone(),
            headline: fields.headline.clone(),
            subheadline: fields.subheadline.clone(),
            mockup_style: fields.mockup_style,
            testimonials: fields.testimonials.clone(),
            prompt: fields.prompt.clone(),
            size: fields.size.clone(),
            output: entry.execution_output.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalPlan {
    pub session_id: String,
    pub created_at: String,
    pub genre: BookGenre,
    pub structure_type: StructureType,
    pub modules: Vec<PlanModule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bonus_modules: Vec<BonusModule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headlines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refinement_prompt: Option<String>,
}

impl FinalPlan {
    pub fn new(
        session_id: impl Into<String>,
        genre: BookGenre,
        structure_type: StructureType,
        modules: &[ModuleEntry],
    ) -> Self {
        Self {
            session_id: session_id.into(),
            created_at: Utc::now().to_rfc3339(),
            genre,
            structure_type,
            modules: modules.iter().map(PlanModule::from).collect(),
            bonus_modules: Vec::new(),
            headlines: Vec::new(),
            refinement_prompt: None,
        }
    }

    /// "Plan created with N modules"
    pub fn summary(&self) -> String {
        format!("Plan created with {} modules", self.modules.len())
    }

    pub fn render_text(&self) -> String {
        let mut out = format!("{}:\n", self.summary());
        for module in &self.modules {
            let _ = writeln!(out, "\nModule {}: {}", module.module_id, module.title);
            let _ = writeln!(out, "  Headline: {}", module.headline);
            let _ = writeln!(out, "  Subheadline: {}", module.subheadline);
            let style = module.mockup_style.map(MockupStyle::label).unwrap_or("-");
            let _ = writeln!(out, "  Mockup style: {}", style);
            let _ = writeln!(out, "  Testimonials: {}", module.testimonials);
            let _ = writeln!(out, "  Prompt: {}", module.prompt);
            let _ = writeln!(out, "  Size: {}", module.size);
            if !module.output.is_empty() {
                let _ = writeln!(out, "  Output: {}", module.output);
            }
        }
        if !self.bonus_modules.is_empty() {
            let _ = writeln!(out, "\nBonus modules:");
            for bonus in &self.bonus_modules {
                let _ = writeln!(out, "- {}: {}", bonus.title, bonus.description);
            }
        }
        if !self.headlines.is_empty() {
            let _ = writeln!(out, "\nProposed headlines:");
            for headline in &self.headlines {
                let _ = writeln!(out, "- {}", headline);
            }
        }
        out
    }

    pub fn to_json(&self) -> Result<String, ApiError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ApiError::ProviderError(format!("Failed to serialize plan: {}", e)))
    }
}
