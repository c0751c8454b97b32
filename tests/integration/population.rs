//! Parallel population against a scripted client with uneven delays.

use aplus::module::ModuleRegistry;
use aplus::population::populate_all;
use std::time::{Duration, Instant};

use super::test_utils::{Reply, ScriptedClient};

fn prompt_for(registry: &ModuleRegistry, id: u32) -> String {
    registry.get(id).unwrap().fields.population_prompt()
}

#[tokio::test]
async fn test_all_calls_in_flight_and_failures_isolated() {
    let mut registry = ModuleRegistry::with_defaults(4);
    for id in 1..=4 {
        registry.get_mut(id).unwrap().fields.prompt = format!("Describe module {}.", id);
    }
    let client = ScriptedClient::new()
        .with_credential()
        .reply(&prompt_for(&registry, 1), Reply::ok("one", 300))
        .reply(&prompt_for(&registry, 2), Reply::status(500, 50))
        .reply(&prompt_for(&registry, 3), Reply::ok("three", 10))
        .reply(&prompt_for(&registry, 4), Reply::ok("four", 150));

    let started = Instant::now();
    let report = populate_all(registry.modules_mut(), &client, 150).await;
    let elapsed = started.elapsed();

    let outputs: Vec<&str> = registry
        .list_modules()
        .iter()
        .map(|m| m.execution_output.as_str())
        .collect();
    assert_eq!(outputs[0], "one");
    assert!(outputs[1].starts_with("Error: "));
    assert!(outputs[1].contains("500"));
    assert_eq!(outputs[2], "three");
    assert_eq!(outputs[3], "four");

    assert_eq!(report.total(), 4);
    assert_eq!(report.failed.keys().copied().collect::<Vec<_>>(), vec![2]);
    assert!(!report.is_complete_success());

    assert!(elapsed >= Duration::from_millis(300));
    assert_eq!(client.max_in_flight(), 4);

    let issued: Vec<String> = client.calls().into_iter().map(|(p, _)| p).collect();
    let completed = client.completed();
    assert_eq!(completed.len(), 4);
    assert_ne!(issued, completed);
    assert_eq!(completed.last(), Some(&prompt_for(&registry, 1)));
    assert!(client.calls().iter().all(|(_, tokens)| *tokens == 150));
}

#[tokio::test]
async fn test_empty_registry_makes_no_calls() {
    let mut registry = ModuleRegistry::new();
    let client = ScriptedClient::new().with_credential();
    let report = populate_all(registry.modules_mut(), &client, 150).await;
    assert_eq!(report.total(), 0);
    assert!(client.calls().is_empty());
}
