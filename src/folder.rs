//! Project folder: the selected book directory and its subfolder choices.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One listed subfolder and whether the user ticked it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubfolderChoice {
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectFolder {
    directory: String,
    subfolders: Vec<SubfolderChoice>,
}

impl ProjectFolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the chosen directory. Existing subfolder choices belong to the old
    /// directory and are dropped.
    pub fn select(&mut self, directory: impl Into<String>) {
        self.directory = directory.into();
        self.subfolders.clear();
    }

    /// Clear the directory and every subfolder choice.
    pub fn flush(&mut self) {
        self.directory.clear();
        self.subfolders.clear();
    }

    /// Raw directory text as entered (may be blank).
    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn path(&self) -> Option<PathBuf> {
        let trimmed = self.directory.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }

    pub fn subfolders(&self) -> &[SubfolderChoice] {
        &self.subfolders
    }

    /// Replace the choices with the directory's immediate subfolders, sorted by name
    /// and all unticked. Returns how many were found.
    pub fn list_subfolders(&mut self) -> Result<usize, ApiError> {
        let root = PathBuf::from(self.directory.trim());
        if !root.is_dir() {
            return Err(ApiError::DirectoryNotFound(root));
        }
        self.subfolders = read_subfolders(&root)?
            .into_iter()
            .map(|name| SubfolderChoice {
                name,
                selected: false,
            })
            .collect();
        Ok(self.subfolders.len())
    }

    /// Tick or untick a listed subfolder. Returns false if `name` is not listed.
    pub fn set_selected(&mut self, name: &str, selected: bool) -> bool {
        match self.subfolders.iter_mut().find(|s| s.name == name) {
            Some(choice) => {
                choice.selected = selected;
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> Vec<&str> {
        self.subfolders
            .iter()
            .filter(|s| s.selected)
            .map(|s| s.name.as_str())
            .collect()
    }
}

fn read_subfolders(root: &Path) -> Result<Vec<String>, ApiError> {
    let mut names = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
