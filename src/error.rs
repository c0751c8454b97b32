//! Error types for the A+ plan wizard.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons the setup step refuses to advance. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetupBlocker {
    #[error("OpenAI API key is required.")]
    MissingCredential,

    #[error("Please select a folder.")]
    MissingDirectory,

    #[error("Please tick at least one subfolder.")]
    NoSubfolderSelected,
}

/// Errors surfaced by the wizard core and its collaborators
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid Ollama API key format.")]
    InvalidCredentialFormat,

    #[error("No API key set. Please go back and set your OpenAI API key.")]
    MissingCredential,

    #[error("{0}")]
    SetupBlocked(#[from] SetupBlocker),

    #[error("Module not found: {0}")]
    ModuleNotFound(u32),

    #[error("Provider request failed with status {status}: {message}")]
    ProviderStatus { status: u16, message: String },

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Invalid module response: {0}")]
    InvalidModuleResponse(String),

    #[error("Directory '{0}' not found.")]
    DirectoryNotFound(PathBuf),

    #[error("No documents found in '{0}'. Please add files to index.")]
    NoDocuments(PathBuf),

    #[error("Index error: {0}")]
    IndexError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl ApiError {
    /// Status code carried by a failed generation request, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ProviderStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
