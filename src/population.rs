//! Parallel population: one generation call per module, joined before returning.
//!
//! Every request is issued before any is awaited. Outputs are written as each call
//! completes; a failed call records its error as that module's output and never
//! affects siblings.

use crate::error::ApiError;
use crate::module::{ModuleEntry, ModuleId};
use crate::provider::GenerationClient;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Per-module outcome of one population run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulationReport {
    pub populated: Vec<ModuleId>,
    pub failed: BTreeMap<ModuleId, String>,
}

impl PopulationReport {
    pub fn total(&self) -> usize {
        self.populated.len() + self.failed.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Text recorded as a module's output when its call fails.
pub fn failure_output(err: &ApiError) -> String {
    format!("Error: {}", err)
}

/// Populate every module's `execution_output` from `client`.
///
/// Taking `&mut` to the modules keeps the set fixed for the run and rules out a
/// second overlapping run on the same modules.
pub async fn populate_all<C>(
    modules: &mut [ModuleEntry],
    client: &C,
    max_tokens: u32,
) -> PopulationReport
where
    C: GenerationClient + ?Sized,
{
    let mut report = PopulationReport::default();
    let mut futures = FuturesUnordered::new();

    for (index, module) in modules.iter().enumerate() {
        let prompt = module.fields.population_prompt();
        let module_id = module.id;
        futures.push(async move {
            let outcome = client.generate(&prompt, max_tokens).await;
            (index, module_id, outcome)
        });
    }

    while let Some((index, module_id, outcome)) = futures.next().await {
        match outcome {
            Ok(text) => {
                modules[index].execution_output = text;
                report.populated.push(module_id);
                info!(module_id, "Module populated");
            }
            Err(err) => {
                let output = failure_output(&err);
                warn!(module_id, error = %err, "Module population failed");
                modules[index].execution_output = output.clone();
                report.failed.insert(module_id, output);
            }
        }
    }

    report
}
