//! Wizard navigation through a session: setup gate, bonus fork, population effect.

use aplus::config::PlannerConfig;
use aplus::session::WizardSession;
use aplus::wizard::{Effect, WizardStep};
use std::sync::Arc;
use tempfile::TempDir;

use super::test_utils::ScriptedClient;

fn session(client: ScriptedClient) -> WizardSession<ScriptedClient> {
    WizardSession::new(Arc::new(client), &PlannerConfig::default())
}

fn message(outcome: &aplus::wizard::Outcome) -> String {
    outcome
        .notifications()
        .next()
        .map(|n| n.message.clone())
        .unwrap_or_default()
}

#[test]
fn test_gate_blocks_without_directory_even_with_key() {
    let mut session = session(ScriptedClient::new().with_credential());
    let outcome = session.next();
    assert_eq!(outcome.state.step, WizardStep::Setup);
    assert_eq!(message(&outcome), "Please select a folder.");
}

#[test]
fn test_gate_checks_credential_first() {
    let mut session = session(ScriptedClient::new());
    let outcome = session.next();
    assert_eq!(message(&outcome), "OpenAI API key is required.");

    assert_eq!(session.set_credential("sk-abc123").message, "API key set successfully!");
    let temp = TempDir::new().unwrap();
    session.select_directory(temp.path().to_string_lossy());
    assert_eq!(session.next().state.step, WizardStep::Structure);
}

#[test]
fn test_listed_subfolders_need_a_tick() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("vol1")).unwrap();
    std::fs::create_dir(temp.path().join("vol2")).unwrap();

    let mut session = session(ScriptedClient::new().with_credential());
    session.select_directory(temp.path().to_string_lossy());
    session.list_subfolders();
    assert_eq!(message(&session.next()), "Please tick at least one subfolder.");

    session.set_subfolder_selected("vol2", true);
    assert_eq!(session.next().state.step, WizardStep::Structure);
}

#[test]
fn test_bonus_aware_paths() {
    let temp = TempDir::new().unwrap();
    let mut session = session(ScriptedClient::new().with_credential());
    session.select_directory(temp.path().to_string_lossy());

    session.set_bonus_enabled(true);
    let mut forward = vec![session.state().step.number()];
    for _ in 0..5 {
        forward.push(session.next().state.step.number());
    }
    assert_eq!(forward, vec![1, 2, 3, 4, 5, 5]);

    let mut backward = Vec::new();
    for _ in 0..5 {
        backward.push(session.back().state.step.number());
    }
    assert_eq!(backward, vec![4, 3, 2, 1, 1]);

    session.set_bonus_enabled(false);
    session.next();
    assert_eq!(session.next().state.step, WizardStep::Generation);
    assert_eq!(session.back().state.step, WizardStep::Structure);
}

#[test]
fn test_population_effect_only_on_forward_entry() {
    let temp = TempDir::new().unwrap();
    let mut session = session(ScriptedClient::new().with_credential());
    session.select_directory(temp.path().to_string_lossy());
    session.set_bonus_enabled(true);

    session.next();
    assert!(!session.next().wants_population());
    let entering = session.next();
    assert_eq!(entering.state.step, WizardStep::Generation);
    assert_eq!(entering.effects, vec![Effect::PopulateModules]);

    session.next();
    assert!(!session.back().wants_population());
}

#[tokio::test]
async fn test_run_effects_fills_outputs() {
    let temp = TempDir::new().unwrap();
    let mut session = session(ScriptedClient::new().with_credential());
    session.select_directory(temp.path().to_string_lossy());
    session.next();
    let outcome = session.next();

    let report = session.run_effects(&outcome).await.unwrap();
    assert!(report.is_complete_success());
    for module in session.modules() {
        assert_eq!(
            module.execution_output,
            format!("generated: {}", module.fields.population_prompt())
        );
    }
}
