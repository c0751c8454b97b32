//! CLI presentation: text and json formatters per command family.

mod modules;
mod plan;
mod shared;

pub use modules::{format_modules_json, format_modules_text};
pub use plan::{format_plan_text, format_population_report};
pub use shared::{format_notifications, format_subfolders_json, format_subfolders_text};
