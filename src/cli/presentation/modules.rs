//! Module table presentation.

use crate::error::ApiError;
use crate::module::{format_tags, ModuleEntry};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::json;

pub fn format_modules_text(modules: &[ModuleEntry]) -> String {
    if modules.is_empty() {
        return "No modules.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Title", "Headline", "Size", "Mockup", "Tags", "Notes"]);
    for module in modules {
        let fields = &module.fields;
        let notes = fields
            .advisories()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        table.add_row(vec![
            module.id.to_string(),
            fields.title.clone(),
            fields.headline_counter(),
            fields.size.clone(),
            fields
                .mockup_style
                .map(|s| s.label().to_string())
                .unwrap_or_else(|| "-".to_string()),
            format_tags(&fields.tags),
            notes,
        ]);
    }
    format!("{}\n\nTotal: {} module(s)", table, modules.len())
}

pub fn format_modules_json(modules: &[ModuleEntry]) -> Result<String, ApiError> {
    let out = json!({ "modules": modules, "total": modules.len() });
    serde_json::to_string_pretty(&out)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize modules: {}", e)))
}
