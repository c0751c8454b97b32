//! Plan run presentation.

use crate::cli::presentation::shared::format_section_heading;
use crate::plan::FinalPlan;
use crate::population::PopulationReport;

pub fn format_population_report(report: &PopulationReport) -> String {
    let mut out = format!(
        "Populated {} of {} module(s)",
        report.populated.len(),
        report.total()
    );
    for (module_id, output) in &report.failed {
        out.push_str(&format!("\n  Module {}: {}", module_id, output));
    }
    out
}

pub fn format_plan_text(plan: &FinalPlan, report: Option<&PopulationReport>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Final Plan")));
    out.push_str(&format!("Genre: {}\n", plan.genre));
    out.push_str(&format!("Structure: {}\n", plan.structure_type));
    if let Some(report) = report {
        out.push_str(&format!("{}\n", format_population_report(report)));
    }
    if let Some(refinement) = &plan.refinement_prompt {
        out.push_str(&format!("Refinement: {}\n", refinement));
    }
    out.push('\n');
    out.push_str(&plan.render_text());
    out
}
