//! Module sheets: TOML files describing the modules a plan run starts with.
//!
//! ```toml
//! [[modules]]
//! title = "Introduction"
//! prompt = "Pitch the opening chapter"
//! tags = "mystery, debut"
//! color_primary = "#2C3E50"
//! ```
//!
//! Omitted values fall back to the form defaults for the module's position. A sheet
//! may also name the genre and structure type and list `[[bonus]]` modules.

use crate::error::ApiError;
use crate::module::entry::{parse_tags, BonusModule, HexColor, MockupStyle, ModuleFields, ModuleId};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleSheet {
    pub genre: Option<String>,
    pub structure: Option<String>,
    #[serde(default)]
    pub modules: Vec<ModuleDraft>,
    #[serde(default)]
    pub bonus: Vec<BonusModule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleDraft {
    pub title: Option<String>,
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub mockup_style: Option<String>,
    pub testimonials: Option<String>,
    pub prompt: Option<String>,
    pub size: Option<String>,
    pub color_primary: Option<String>,
    pub color_secondary: Option<String>,
    pub color_accent: Option<String>,
    pub font_primary: Option<String>,
    pub font_secondary: Option<String>,
    pub layout: Option<String>,
    pub image_desc_primary: Option<String>,
    pub image_desc_secondary: Option<String>,
    /// Comma-separated
    pub tags: Option<String>,
    pub alignment: Option<String>,
}

impl ModuleSheet {
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ApiError> {
        toml::from_str(content)
            .map_err(|e| ApiError::ConfigError(format!("Invalid module sheet: {}", e)))
    }
}

impl ModuleDraft {
    /// Resolve against the defaults for position `id`.
    pub fn into_fields(self, id: ModuleId) -> Result<ModuleFields, ApiError> {
        let mut fields = ModuleFields::defaults_for(id);
        let invalid = |e: String| ApiError::ConfigError(format!("Module {}: {}", id, e));

        if let Some(value) = self.title {
            fields.title = value;
        }
        if let Some(value) = self.headline {
            fields.headline = value;
        }
        if let Some(value) = self.subheadline {
            fields.subheadline = value;
        }
        if let Some(value) = self.mockup_style {
            fields.mockup_style = Some(
                MockupStyle::parse(&value)
                    .ok_or_else(|| invalid(format!("Unknown mockup style: {}", value)))?,
            );
        }
        if let Some(value) = self.testimonials {
            fields.testimonials = value;
        }
        if let Some(value) = self.prompt {
            fields.prompt = value;
        }
        if let Some(value) = self.size {
            fields.size = value;
        }
        if let Some(value) = self.color_primary {
            fields.palette.primary = HexColor::parse(&value).map_err(invalid)?;
        }
        if let Some(value) = self.color_secondary {
            fields.palette.secondary = HexColor::parse(&value).map_err(invalid)?;
        }
        if let Some(value) = self.color_accent {
            fields.palette.accent = HexColor::parse(&value).map_err(invalid)?;
        }
        if let Some(value) = self.font_primary {
            fields.fonts.primary = value;
        }
        if let Some(value) = self.font_secondary {
            fields.fonts.secondary = value;
        }
        if let Some(value) = self.layout {
            fields.layout = value;
        }
        if let Some(value) = self.image_desc_primary {
            fields.images.primary = value;
        }
        if let Some(value) = self.image_desc_secondary {
            fields.images.secondary = value;
        }
        if let Some(value) = self.tags {
            fields.tags = parse_tags(&value);
        }
        if let Some(value) = self.alignment {
            fields.alignment = value;
        }
        Ok(fields)
    }
}
