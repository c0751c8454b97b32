//! Module registry: ordered in-memory collection with a LIFO undo stack for removals.

use crate::module::entry::{ModuleEntry, ModuleFields, ModuleId, ModuleSnapshot};
use tracing::{debug, warn};

/// Owns the wizard's modules in insertion order.
///
/// Ids come from a high-water mark, so a removed id is never handed to a different
/// module; only undo (which replays the removed module's snapshot) brings it back.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleEntry>,
    removed: Vec<ModuleSnapshot>,
    highest_id: ModuleId,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-filled with `count` default modules.
    pub fn with_defaults(count: usize) -> Self {
        let mut registry = Self::new();
        for _ in 0..count {
            registry.add_module(None);
        }
        registry
    }

    /// Append a module. With `prefill` the snapshot's values and id are reused;
    /// otherwise the module gets form defaults and a fresh id.
    pub fn add_module(&mut self, prefill: Option<ModuleSnapshot>) -> &ModuleEntry {
        let entry = match prefill {
            Some(snapshot) if !self.contains(snapshot.id) && snapshot.id > 0 => {
                self.highest_id = self.highest_id.max(snapshot.id);
                ModuleEntry::new(snapshot.id, snapshot.fields)
            }
            Some(snapshot) => {
                warn!(
                    module_id = snapshot.id,
                    "Prefill id already live; assigning a fresh id"
                );
                let id = self.next_id();
                ModuleEntry::new(id, snapshot.fields)
            }
            None => {
                let id = self.next_id();
                ModuleEntry::new(id, ModuleFields::defaults_for(id))
            }
        };
        self.push(entry)
    }

    /// Append a module with the given values and a fresh id.
    pub fn add_with_fields(&mut self, fields: ModuleFields) -> &ModuleEntry {
        let id = self.next_id();
        self.push(ModuleEntry::new(id, fields))
    }

    /// Remove a module, keeping a snapshot for undo. Unknown ids are ignored.
    /// Returns whether anything was removed.
    pub fn remove_module(&mut self, id: ModuleId) -> bool {
        let Some(position) = self.modules.iter().position(|m| m.id == id) else {
            debug!(module_id = id, "Remove ignored: module not found");
            return false;
        };
        let entry = self.modules.remove(position);
        self.removed.push(entry.snapshot());
        debug!(module_id = id, undo_depth = self.removed.len(), "Module removed");
        true
    }

    /// Restore the most recently removed module. `None` when there is nothing to undo.
    pub fn undo_last_removal(&mut self) -> Option<&ModuleEntry> {
        let snapshot = self.removed.pop()?;
        Some(self.add_module(Some(snapshot)))
    }

    /// Modules in insertion order
    pub fn list_modules(&self) -> &[ModuleEntry] {
        &self.modules
    }

    /// Mutable view for a population run; the set of modules cannot change meanwhile.
    pub fn modules_mut(&mut self) -> &mut [ModuleEntry] {
        &mut self.modules
    }

    pub fn get(&self, id: ModuleId) -> Option<&ModuleEntry> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn get_mut(&mut self, id: ModuleId) -> Option<&mut ModuleEntry> {
        self.modules.iter_mut().find(|m| m.id == id)
    }

    pub fn contains(&self, id: ModuleId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Number of removals that can still be undone
    pub fn undo_depth(&self) -> usize {
        self.removed.len()
    }

    fn next_id(&mut self) -> ModuleId {
        let live_max = self.modules.iter().map(|m| m.id).max().unwrap_or(0);
        self.highest_id = self.highest_id.max(live_max) + 1;
        self.highest_id
    }

    fn push(&mut self, entry: ModuleEntry) -> &ModuleEntry {
        debug!(module_id = entry.id, "Module added");
        self.modules.push(entry);
        &self.modules[self.modules.len() - 1]
    }
}
