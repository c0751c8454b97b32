//! Document index build, reload and summary.

use aplus::config::{IndexConfig, PlannerConfig};
use aplus::error::ApiError;
use aplus::index::{ensure_index, summarize, MANIFEST_FILE};
use aplus::session::WizardSession;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use super::test_utils::ScriptedClient;

fn book_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    let books = temp.path().join("books");
    fs::create_dir_all(books.join("vol1")).unwrap();
    fs::write(books.join("vol1").join("chapter1.txt"), "It was a dark night.").unwrap();
    fs::write(books.join("notes.md"), "# Notes\nThemes: loss").unwrap();
    fs::write(books.join("cover.png"), [0u8, 1, 2]).unwrap();
    temp
}

#[test]
fn test_build_then_reload() {
    let temp = book_dir();
    let data = temp.path().join("books");
    let persist = temp.path().join("index");
    let config = IndexConfig::default();

    let built = ensure_index(&data, &persist, &config).unwrap();
    assert!(!built.loaded_from_disk());
    let paths: Vec<&str> = built.documents().iter().map(|d| d.path.as_str()).collect();
    assert_eq!(paths, vec!["notes.md", "vol1/chapter1.txt"]);
    assert!(persist.join(MANIFEST_FILE).is_file());

    fs::write(data.join("late.txt"), "added later").unwrap();
    let reloaded = ensure_index(&data, &persist, &config).unwrap();
    assert!(reloaded.loaded_from_disk());
    assert_eq!(reloaded.len(), 2);
}

#[test]
fn test_no_documents() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("image.png"), [0u8]).unwrap();
    let err = ensure_index(temp.path(), &temp.path().join("index"), &IndexConfig::default())
        .unwrap_err();
    assert!(matches!(err, ApiError::NoDocuments(_)));
}

#[tokio::test]
async fn test_summary_prompt_carries_excerpts() {
    let temp = book_dir();
    let handle = ensure_index(
        &temp.path().join("books"),
        &temp.path().join("index"),
        &IndexConfig::default(),
    )
    .unwrap();
    let client = ScriptedClient::new().with_credential();

    let summary = summarize(&handle, &client, &IndexConfig::default(), 512)
        .await
        .unwrap();
    let (prompt, tokens) = client.calls().remove(0);
    assert_eq!(summary, format!("generated: {}", prompt));
    assert_eq!(tokens, 512);
    assert!(prompt.starts_with("Provide a concise summary"));
    assert!(prompt.contains("It was a dark night."));
    assert!(prompt.contains("Themes: loss"));
}

#[tokio::test]
async fn test_session_summary_feeds_module_execution() {
    let temp = book_dir();
    let mut config = PlannerConfig::default();
    config.index.persist_dir = temp.path().join("index");

    let client = Arc::new(ScriptedClient::new().with_credential());
    let mut session = WizardSession::new(Arc::clone(&client), &config);
    session.select_directory(temp.path().join("books").to_string_lossy());

    let summary = session.summarize_documents().await.unwrap();
    assert_eq!(session.book_summary(), Some(summary.as_str()));

    session.execute_module(1, None).await.unwrap();
    let (prompt, tokens) = client.calls().pop().unwrap();
    assert_eq!(tokens, config.generation.module_max_tokens);
    assert!(prompt.contains("book_of_interest"));
    assert!(prompt.contains("Provide a concise summary"));
}
