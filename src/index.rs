//! Document Index
//!
//! Directory-backed index of the book's source documents. The first call scans the
//! data directory and persists a manifest (relative path, size, BLAKE3 content hash)
//! under the persist directory; later calls load that manifest instead of rescanning.
//! [`summarize`] folds the fixed book-analysis questions and text excerpts into one
//! generation request.

use crate::config::IndexConfig;
use crate::error::ApiError;
use crate::provider::GenerationClient;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

pub const MANIFEST_FILE: &str = "index.json";
const MANIFEST_VERSION: u32 = 1;

/// Extensions whose content is read as plain text for summary excerpts
const TEXT_EXTENSIONS: [&str; 5] = ["txt", "md", "json", "csv", "html"];

/// Questions sent with every summary request
pub const ANALYSIS_QUESTIONS: [&str; 15] = [
    "What is the central theme of the book, and how is it developed throughout the narrative?",
    "Who are the key characters, and what are their motivations, conflicts, and arcs?",
    "What literary techniques (symbolism, metaphor, foreshadowing) are used, and how do they enhance the story?",
    "What crucial information or insights can be derived from this book?",
    "How does the book reflect its historical, cultural, or social context?",
    "What is the author's intent or message, and how is it conveyed through the text?",
    "What narrative structure is employed, and how does it affect the reader's experience?",
    "How do the setting and atmosphere contribute to the mood and themes of the book?",
    "What are the major conflicts and resolutions, and what do they reveal about the characters or themes?",
    "How does the book compare to other works in the same genre or by the same author?",
    "What are the notable quotes or passages, and why are they significant?",
    "How do literary devices like irony, allegory, and satire function within the text?",
    "What philosophical or moral questions are raised by the book, and how are they explored?",
    "How does the book's pacing and tone influence the reader's engagement?",
    "What critical interpretations or academic analyses exist for this book?",
];

/// One indexed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Path relative to the data directory, `/`-separated
    pub path: String,
    pub size: u64,
    /// Hex-encoded BLAKE3 hash of the content
    pub hash: String,
}

/// Persisted form of the index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexManifest {
    pub version: u32,
    pub data_dir: PathBuf,
    /// RFC 3339 creation time
    pub created_at: String,
    pub documents: Vec<DocumentRecord>,
}

/// A ready index: the manifest plus where it lives.
#[derive(Debug, Clone)]
pub struct IndexHandle {
    manifest: IndexManifest,
    persist_dir: PathBuf,
    loaded_from_disk: bool,
}

impl IndexHandle {
    pub fn documents(&self) -> &[DocumentRecord] {
        &self.manifest.documents
    }

    pub fn data_dir(&self) -> &Path {
        &self.manifest.data_dir
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.persist_dir.join(MANIFEST_FILE)
    }

    /// True when the manifest came from an earlier run rather than a fresh scan.
    pub fn loaded_from_disk(&self) -> bool {
        self.loaded_from_disk
    }

    pub fn len(&self) -> usize {
        self.manifest.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifest.documents.is_empty()
    }
}

/// Load the persisted index, or build and persist one from `data_dir`.
pub fn ensure_index(
    data_dir: &Path,
    persist_dir: &Path,
    config: &IndexConfig,
) -> Result<IndexHandle, ApiError> {
    let manifest_path = persist_dir.join(MANIFEST_FILE);
    if manifest_path.is_file() {
        let manifest = load_manifest(&manifest_path)?;
        if manifest.data_dir != data_dir {
            warn!(
                indexed = %manifest.data_dir.display(),
                requested = %data_dir.display(),
                "Persisted index was built from a different directory"
            );
        }
        info!(documents = manifest.documents.len(), "Index loaded from disk");
        return Ok(IndexHandle {
            manifest,
            persist_dir: persist_dir.to_path_buf(),
            loaded_from_disk: true,
        });
    }

    if !data_dir.is_dir() {
        return Err(ApiError::NoDocuments(data_dir.to_path_buf()));
    }
    let documents = scan_documents(data_dir, &config.supported_extensions)?;
    if documents.is_empty() {
        return Err(ApiError::NoDocuments(data_dir.to_path_buf()));
    }

    let manifest = IndexManifest {
        version: MANIFEST_VERSION,
        data_dir: data_dir.to_path_buf(),
        created_at: Utc::now().to_rfc3339(),
        documents,
    };
    persist_manifest(persist_dir, &manifest)?;
    info!(
        documents = manifest.documents.len(),
        persist_dir = %persist_dir.display(),
        "Index created and persisted to disk"
    );

    Ok(IndexHandle {
        manifest,
        persist_dir: persist_dir.to_path_buf(),
        loaded_from_disk: false,
    })
}

/// Ask `client` for a concise summary of the indexed book.
pub async fn summarize<C>(
    handle: &IndexHandle,
    client: &C,
    config: &IndexConfig,
    max_tokens: u32,
) -> Result<String, ApiError>
where
    C: GenerationClient + ?Sized,
{
    let prompt = summary_prompt(handle, config.excerpt_chars);
    let summary = client.generate(&prompt, max_tokens).await?;
    info!(chars = summary.len(), "Book summary generated");
    Ok(summary)
}

/// Fixed summary query plus up to `excerpt_chars` characters of document text.
pub fn summary_prompt(handle: &IndexHandle, excerpt_chars: usize) -> String {
    let questions = serde_json::json!({ "questions": ANALYSIS_QUESTIONS });
    let mut prompt = format!(
        "Provide a concise summary of the key themes and content of this book. \
         Consider foundational assumptions, core elements, evident patterns, long-term \
         implications, and key stakeholders from the provided data: {}",
        questions
    );

    let excerpts = collect_excerpts(handle, excerpt_chars);
    if !excerpts.is_empty() {
        prompt.push_str("\n\nExcerpts:");
        for (path, text) in excerpts {
            prompt.push_str(&format!("\n--- {} ---\n{}", path, text));
        }
    }
    prompt
}

fn collect_excerpts(handle: &IndexHandle, budget: usize) -> Vec<(String, String)> {
    let mut remaining = budget;
    let mut excerpts = Vec::new();
    for record in handle.documents() {
        if remaining == 0 {
            break;
        }
        if !is_text_document(&record.path) {
            continue;
        }
        let path = handle.data_dir().join(&record.path);
        let text = match fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable document");
                continue;
            }
        };
        let excerpt: String = text.trim().chars().take(remaining).collect();
        if excerpt.is_empty() {
            continue;
        }
        remaining -= excerpt.chars().count();
        excerpts.push((record.path.clone(), excerpt));
    }
    excerpts
}

fn is_text_document(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| TEXT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn has_supported_extension(path: &Path, supported: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    let dotted = format!(".{}", ext.to_ascii_lowercase());
    supported.iter().any(|s| s.eq_ignore_ascii_case(&dotted))
}

/// Supported documents under `data_dir`, sorted by relative path.
fn scan_documents(data_dir: &Path, supported: &[String]) -> Result<Vec<DocumentRecord>, ApiError> {
    let mut documents = Vec::new();
    for entry in WalkDir::new(data_dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() || !has_supported_extension(entry.path(), supported) {
            continue;
        }
        let content = fs::read(entry.path())?;
        let relative = entry
            .path()
            .strip_prefix(data_dir)
            .map_err(|e| ApiError::IndexError(format!("Path outside data dir: {}", e)))?;
        let path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        documents.push(DocumentRecord {
            path,
            size: content.len() as u64,
            hash: hex::encode(blake3::hash(&content).as_bytes()),
        });
    }
    Ok(documents)
}

fn load_manifest(path: &Path) -> Result<IndexManifest, ApiError> {
    let raw = fs::read_to_string(path)?;
    let manifest: IndexManifest = serde_json::from_str(&raw).map_err(|e| {
        ApiError::IndexError(format!("Failed to parse index manifest {:?}: {}", path, e))
    })?;
    if manifest.version != MANIFEST_VERSION {
        return Err(ApiError::IndexError(format!(
            "Unsupported index manifest version {}",
            manifest.version
        )));
    }
    Ok(manifest)
}

fn persist_manifest(persist_dir: &Path, manifest: &IndexManifest) -> Result<(), ApiError> {
    fs::create_dir_all(persist_dir)?;
    let serialized = serde_json::to_string_pretty(manifest)
        .map_err(|e| ApiError::IndexError(format!("Failed to serialize manifest: {}", e)))?;

    let path = persist_dir.join(MANIFEST_FILE);
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, serialized)?;
    fs::rename(&temp_path, &path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ApiError::IndexError(format!("Failed to rename temp file to {:?}: {}", path, e))
    })?;
    Ok(())
}
