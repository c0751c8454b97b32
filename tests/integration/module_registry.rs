//! Module registry behavior: ids, removal, undo.

use aplus::module::{ModuleFields, ModuleRegistry, MockupStyle};

fn ids(registry: &ModuleRegistry) -> Vec<u32> {
    registry.list_modules().iter().map(|m| m.id).collect()
}

#[test]
fn test_remove_then_undo_restores_values_and_id() {
    let mut registry = ModuleRegistry::with_defaults(4);
    {
        let module = registry.get_mut(2).unwrap();
        module.fields.title = "Second".to_string();
        module.fields.headline = "A headline".to_string();
        module.fields.mockup_style = Some(MockupStyle::ClosedBook);
    }
    let before = registry.get(2).unwrap().fields.clone();

    assert!(registry.remove_module(2));
    assert_eq!(ids(&registry), vec![1, 3, 4]);

    let restored = registry.undo_last_removal().unwrap();
    assert_eq!(restored.id, 2);
    assert_eq!(restored.fields, before);
    assert_eq!(ids(&registry), vec![1, 3, 4, 2]);
}

#[test]
fn test_undo_is_lifo() {
    let mut registry = ModuleRegistry::with_defaults(3);
    registry.remove_module(1);
    registry.remove_module(3);
    assert_eq!(registry.undo_last_removal().unwrap().id, 3);
    assert_eq!(registry.undo_last_removal().unwrap().id, 1);
    assert!(registry.undo_last_removal().is_none());
}

#[test]
fn test_undo_on_empty_stack() {
    let mut registry = ModuleRegistry::new();
    assert!(registry.undo_last_removal().is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_removed_id_is_not_reissued() {
    let mut registry = ModuleRegistry::with_defaults(3);
    registry.remove_module(3);
    let fresh = registry.add_module(None).id;
    assert_eq!(fresh, 4);

    let restored = registry.undo_last_removal().unwrap().id;
    assert_eq!(restored, 3);
    assert_eq!(ids(&registry), vec![1, 2, 4, 3]);
}

#[test]
fn test_remove_unknown_id_is_silent() {
    let mut registry = ModuleRegistry::with_defaults(2);
    assert!(!registry.remove_module(9));
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.undo_depth(), 0);
}

#[test]
fn test_add_with_fields_gets_fresh_id() {
    let mut registry = ModuleRegistry::with_defaults(1);
    let mut fields = ModuleFields::defaults_for(99);
    fields.title = "Custom".to_string();
    let entry = registry.add_with_fields(fields);
    assert_eq!(entry.id, 2);
    assert_eq!(entry.fields.title, "Custom");
}
