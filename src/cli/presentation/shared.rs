//! Shared presentation: section headings, notifications and subfolder listings.

use crate::error::ApiError;
use crate::folder::SubfolderChoice;
use crate::wizard::{Notification, NotifyLevel};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn level_tag(level: NotifyLevel) -> String {
    match level {
        NotifyLevel::Info => format!("{}", "info".blue()),
        NotifyLevel::Success => format!("{}", "ok".green()),
        NotifyLevel::Warning => format!("{}", "warn".yellow()),
        NotifyLevel::Error => format!("{}", "error".red()),
    }
}

/// One line per notification, tagged with its level.
pub fn format_notifications(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|n| format!("[{}] {}", level_tag(n.level), n.message))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_subfolders_text(directory: &str, subfolders: &[SubfolderChoice]) -> String {
    if subfolders.is_empty() {
        return format!("No subfolders found in {}.", directory);
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "Subfolder"]);
    for (i, choice) in subfolders.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), choice.name.clone()]);
    }
    format!(
        "{}\n\n{}\n\nTotal: {} subfolder(s)",
        format_section_heading(directory),
        table,
        subfolders.len()
    )
}

pub fn format_subfolders_json(
    directory: &str,
    subfolders: &[SubfolderChoice],
) -> Result<String, ApiError> {
    let names: Vec<&str> = subfolders.iter().map(|s| s.name.as_str()).collect();
    let out = serde_json::json!({
        "directory": directory,
        "subfolders": names,
        "total": names.len(),
    });
    serde_json::to_string_pretty(&out)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize output: {}", e)))
}
