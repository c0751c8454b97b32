//! Content modules: entry values, the ordered registry with undo, and module sheets.

pub mod entry;
pub mod registry;
pub mod sheet;

pub use entry::{
    format_tags, parse_tags, BonusModule, ColorPalette, FieldAdvisory, FontPair, HexColor,
    ImageDescriptions, MockupStyle, ModuleEntry, ModuleFields, ModuleId, ModuleSnapshot,
    HEADLINE_SOFT_LIMIT,
};
pub use registry::ModuleRegistry;
pub use sheet::{ModuleDraft, ModuleSheet};
