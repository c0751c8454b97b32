//! Step-one inputs and the gate that guards leaving it.

use crate::error::SetupBlocker;
use crate::folder::SubfolderChoice;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the setup gate looks at. Borrowed from the session at check time.
#[derive(Debug, Clone, Copy)]
pub struct SetupReadiness<'a> {
    pub credential_set: bool,
    pub directory: &'a str,
    pub subfolders: &'a [SubfolderChoice],
}

impl SetupReadiness<'_> {
    /// First unmet precondition, in order: credential, directory, subfolder selection.
    pub fn check(&self) -> Result<(), SetupBlocker> {
        if !self.credential_set {
            return Err(SetupBlocker::MissingCredential);
        }
        if self.directory.trim().is_empty() {
            return Err(SetupBlocker::MissingDirectory);
        }
        if !self.subfolders.is_empty() && !self.subfolders.iter().any(|s| s.selected) {
            return Err(SetupBlocker::NoSubfolderSelected);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookGenre {
    #[default]
    #[serde(rename = "Self-Help")]
    SelfHelp,
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    Mystery,
    #[serde(rename = "Sci-Fi")]
    SciFi,
}

impl BookGenre {
    pub const ALL: [BookGenre; 5] = [
        BookGenre::SelfHelp,
        BookGenre::Fiction,
        BookGenre::NonFiction,
        BookGenre::Mystery,
        BookGenre::SciFi,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BookGenre::SelfHelp => "Self-Help",
            BookGenre::Fiction => "Fiction",
            BookGenre::NonFiction => "Non-Fiction",
            BookGenre::Mystery => "Mystery",
            BookGenre::SciFi => "Sci-Fi",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|genre| genre.label().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for BookGenre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How modules get built in step two
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StructureType {
    #[default]
    Generate,
    Select,
    Manual,
}

impl StructureType {
    pub fn label(self) -> &'static str {
        match self {
            StructureType::Generate => "Generate",
            StructureType::Select => "Select",
            StructureType::Manual => "Manual",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [
            StructureType::Generate,
            StructureType::Select,
            StructureType::Manual,
        ]
        .into_iter()
        .find(|kind| kind.label().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
