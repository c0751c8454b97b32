//! Module document schema.
//!
//! The JSON shape exchanged with the generation service when a single module is
//! executed: the request embeds the module's current values, and the response is
//! expected to echo the same shape back. Responses are mapped onto
//! [`ModuleFields`] field by field; a document that fails validation changes nothing.

use crate::error::ApiError;
use crate::module::{HexColor, MockupStyle, ModuleFields, ModuleId};
use crate::wizard::StructureType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_type: Option<String>,
    #[serde(default)]
    pub modules: Vec<ModuleDocument>,
}

/// One module as it appears on the wire. Every field is optional on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<ModuleId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub subheadline: Option<String>,
    #[serde(default)]
    pub mockup_style: Option<String>,
    #[serde(default)]
    pub testimonials: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_of_interest: Option<String>,
    #[serde(default)]
    pub design_attributes: Option<DesignAttributes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignAttributes {
    #[serde(default)]
    pub color_palette: Option<PaletteDocument>,
    #[serde(default)]
    pub fonts: Option<PairDocument>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub image_descriptions: Option<PairDocument>,
    /// Generated documents sometimes carry numbers here; they are kept as text.
    #[serde(default)]
    pub tags: Option<Vec<Value>>,
    #[serde(default)]
    pub alignment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaletteDocument {
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub secondary: Option<String>,
    #[serde(default)]
    pub accent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairDocument {
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub secondary: Option<String>,
}

impl ModuleDocument {
    /// Wire form of a module's current values.
    pub fn from_fields(
        id: ModuleId,
        fields: &ModuleFields,
        book_of_interest: Option<&str>,
    ) -> Self {
        Self {
            module_id: Some(id),
            title: Some(fields.title.clone()),
            headline: Some(fields.headline.clone()),
            subheadline: Some(fields.subheadline.clone()),
            mockup_style: fields.mockup_style.map(|style| style.label().to_string()),
            testimonials: Some(fields.testimonials.clone()),
            size: Some(fields.size.clone()),
            book_of_interest: book_of_interest.map(str::to_string),
            design_attributes: Some(DesignAttributes {
                color_palette: Some(PaletteDocument {
                    primary: Some(fields.palette.primary.to_string()),
                    secondary: Some(fields.palette.secondary.to_string()),
                    accent: Some(fields.palette.accent.to_string()),
                }),
                fonts: Some(PairDocument {
                    primary: Some(fields.fonts.primary.clone()),
                    secondary: Some(fields.fonts.secondary.clone()),
                }),
                layout: Some(fields.layout.clone()),
                image_descriptions: Some(PairDocument {
                    primary: Some(fields.images.primary.clone()),
                    secondary: Some(fields.images.secondary.clone()),
                }),
                tags: Some(fields.tags.iter().cloned().map(Value::String).collect()),
                alignment: Some(fields.alignment.clone()),
            }),
        }
    }

    /// Map this document onto `fields`. Validation runs first; on error `fields` is
    /// left exactly as it was.
    pub fn apply_to(&self, fields: &mut ModuleFields) -> Result<(), ApiError> {
        let mut updated = fields.clone();

        assign(&mut updated.title, &self.title);
        assign(&mut updated.headline, &self.headline);
        assign(&mut updated.subheadline, &self.subheadline);
        assign(&mut updated.testimonials, &self.testimonials);
        assign(&mut updated.size, &self.size);
        if let Some(raw) = &self.mockup_style {
            match MockupStyle::parse(raw) {
                Some(style) => updated.mockup_style = Some(style),
                None => warn!(mockup_style = %raw, "Ignoring unknown mockup style"),
            }
        }

        if let Some(design) = &self.design_attributes {
            if let Some(palette) = &design.color_palette {
                assign_color(&mut updated.palette.primary, &palette.primary)?;
                assign_color(&mut updated.palette.secondary, &palette.secondary)?;
                assign_color(&mut updated.palette.accent, &palette.accent)?;
            }
            if let Some(fonts) = &design.fonts {
                assign(&mut updated.fonts.primary, &fonts.primary);
                assign(&mut updated.fonts.secondary, &fonts.secondary);
            }
            assign(&mut updated.layout, &design.layout);
            if let Some(images) = &design.image_descriptions {
                assign(&mut updated.images.primary, &images.primary);
                assign(&mut updated.images.secondary, &images.secondary);
            }
            if let Some(tags) = &design.tags {
                updated.tags = tags.iter().map(tag_text).collect();
            }
            assign(&mut updated.alignment, &design.alignment);
        }

        *fields = updated;
        Ok(())
    }
}

fn assign(target: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

fn assign_color(target: &mut HexColor, value: &Option<String>) -> Result<(), ApiError> {
    if let Some(value) = value {
        *target = HexColor::parse(value).map_err(ApiError::InvalidModuleResponse)?;
    }
    Ok(())
}

fn tag_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Parse a generation response into its first module document.
///
/// Text around the outermost JSON object (prose, code fences) is ignored.
pub fn parse_module_response(raw: &str) -> Result<ModuleDocument, ApiError> {
    let json = extract_json_object(raw)
        .ok_or_else(|| ApiError::InvalidModuleResponse("No JSON object in response".to_string()))?;
    let response: ModuleResponse = serde_json::from_str(json)
        .map_err(|e| ApiError::InvalidModuleResponse(format!("Failed to parse JSON: {}", e)))?;
    response
        .modules
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::InvalidModuleResponse("Response contains no modules".to_string()))
}

fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

/// Prompt for executing one module: brief instructions followed by the module's
/// current values as the JSON shape the answer must follow.
pub fn module_request_prompt(
    id: ModuleId,
    fields: &ModuleFields,
    structure_type: StructureType,
    book_summary: Option<&str>,
) -> Result<String, ApiError> {
    let request = ModuleResponse {
        structure_type: Some(structure_type.label().to_string()),
        modules: vec![ModuleDocument::from_fields(id, fields, book_summary)],
    };
    let body = serde_json::to_string_pretty(&request).map_err(|e| {
        ApiError::InvalidModuleResponse(format!("Failed to serialize module request: {}", e))
    })?;

    Ok(format!(
        "Generate one comprehensive module description for the book of interest, as a \
         poster designer preparing a book marketing campaign. Keep every provided detail. \
         Lead the headline with the book's most intriguing aspect, make the subheadline \
         give context and a reason to read on, and choose colors and fonts that fit the \
         genre and mood. Avoid generic praise.\n\n\
         Output strictly one JSON document in exactly this shape:\n{}",
        body
    ))
}
