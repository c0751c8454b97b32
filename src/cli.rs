//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to the wizard session.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{command_name, Cli, Commands, KeyCommands};
pub use presentation::{
    format_modules_json, format_modules_text, format_notifications, format_plan_text,
    format_population_report, format_subfolders_json, format_subfolders_text,
};
pub use route::RunContext;
