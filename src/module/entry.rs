//! Module entry values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Module identifier; positive, unique among live entries.
pub type ModuleId = u32;

/// Headlines longer than this get a soft warning; nothing is enforced.
pub const HEADLINE_SOFT_LIMIT: usize = 100;

/// Book mockup presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MockupStyle {
    #[serde(rename = "Open Book")]
    OpenBook,
    #[serde(rename = "Closed Book")]
    ClosedBook,
    #[serde(rename = "3D Book")]
    ThreeD,
}

impl MockupStyle {
    pub const ALL: [MockupStyle; 3] = [
        MockupStyle::OpenBook,
        MockupStyle::ClosedBook,
        MockupStyle::ThreeD,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MockupStyle::OpenBook => "Open Book",
            MockupStyle::ClosedBook => "Closed Book",
            MockupStyle::ThreeD => "3D Book",
        }
    }

    /// Case-insensitive label match. A trailing "Display" is tolerated
    /// ("Open Book Display" is what generated documents tend to say).
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let normalized = normalized
            .strip_suffix(" display")
            .unwrap_or(&normalized)
            .trim();
        Self::ALL
            .into_iter()
            .find(|style| style.label().to_ascii_lowercase() == normalized)
    }
}

impl fmt::Display for MockupStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `#RGB` or `#RRGGBB` color string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(value: &str) -> Result<Self, String> {
        let value = value.trim();
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| format!("Color must start with '#': {}", value))?;
        if !matches!(digits.len(), 3 | 6) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex color: {}", value));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn hex(value: &str) -> HexColor {
    HexColor(value.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: HexColor,
    pub secondary: HexColor,
    pub accent: HexColor,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: hex("#3D5A80"),
            secondary: hex("#98C1D9"),
            accent: hex("#EE6C4D"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontPair {
    pub primary: String,
    pub secondary: String,
}

impl Default for FontPair {
    fn default() -> Self {
        Self {
            primary: "Roboto".to_string(),
            secondary: "Lato".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptions {
    pub primary: String,
    pub secondary: String,
}

impl Default for ImageDescriptions {
    fn default() -> Self {
        Self {
            primary: "cover shot".to_string(),
            secondary: "interior shot".to_string(),
        }
    }
}

/// Every user-editable value of a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFields {
    pub title: String,
    pub headline: String,
    pub subheadline: String,
    pub mockup_style: Option<MockupStyle>,
    pub testimonials: String,
    pub prompt: String,
    pub size: String,
    pub palette: ColorPalette,
    pub fonts: FontPair,
    pub layout: String,
    pub images: ImageDescriptions,
    pub tags: Vec<String>,
    pub alignment: String,
}

impl ModuleFields {
    /// Form defaults for a new module; the banner size depends on its position.
    pub fn defaults_for(id: ModuleId) -> Self {
        let size = match id {
            1 => "970x600px Standard Image Header With Text",
            2 | 4 => "970x300px Standard Image & Light Text Overlay",
            3 => "4x220x220px Standard Four Images & Text",
            _ => "",
        };
        Self {
            title: String::new(),
            headline: String::new(),
            subheadline: String::new(),
            mockup_style: None,
            testimonials: String::new(),
            prompt: "Improve this part".to_string(),
            size: size.to_string(),
            palette: ColorPalette::default(),
            fonts: FontPair::default(),
            layout: "Grid-based, two-column layout".to_string(),
            images: ImageDescriptions::default(),
            tags: parse_tags("C++, Programming"),
            alignment: "centered".to_string(),
        }
    }

    /// Prompt sent during parallel population.
    pub fn population_prompt(&self) -> String {
        format!("{} Size: {}.", self.prompt, self.size)
    }

    /// "N / 100" counter shown beside the headline.
    pub fn headline_counter(&self) -> String {
        let length = self.headline.chars().count();
        if length > HEADLINE_SOFT_LIMIT {
            format!("{}/{} (Too long!)", length, HEADLINE_SOFT_LIMIT)
        } else {
            format!("{} / {}", length, HEADLINE_SOFT_LIMIT)
        }
    }

    /// Soft warnings; none of them block anything.
    pub fn advisories(&self) -> Vec<FieldAdvisory> {
        let mut advisories = Vec::new();
        if self.title.trim().is_empty() {
            advisories.push(FieldAdvisory::EmptyTitle);
        }
        let length = self.headline.chars().count();
        if length > HEADLINE_SOFT_LIMIT {
            advisories.push(FieldAdvisory::HeadlineTooLong { length });
        }
        advisories
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAdvisory {
    EmptyTitle,
    HeadlineTooLong { length: usize },
}

impl fmt::Display for FieldAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldAdvisory::EmptyTitle => f.write_str("Title cannot be empty."),
            FieldAdvisory::HeadlineTooLong { length } => {
                write!(f, "{}/{} (Too long!)", length, HEADLINE_SOFT_LIMIT)
            }
        }
    }
}

/// Split comma-separated input; entries are trimmed and blanks dropped.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn format_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// A live module in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub id: ModuleId,
    pub fields: ModuleFields,
    /// Set by population or manual execution; empty until then
    pub execution_output: String,
}

impl ModuleEntry {
    pub fn new(id: ModuleId, fields: ModuleFields) -> Self {
        Self {
            id,
            fields,
            execution_output: String::new(),
        }
    }

    pub fn snapshot(&self) -> ModuleSnapshot {
        ModuleSnapshot {
            id: self.id,
            fields: self.fields.clone(),
        }
    }
}

/// Value copy of a removed module, replayed on undo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSnapshot {
    pub id: ModuleId,
    pub fields: ModuleFields,
}

/// Extra module offered when the bonus step is enabled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusModule {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prompt: String,
}
