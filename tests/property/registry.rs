//! Registry id and undo properties over random operation sequences

use aplus::module::ModuleRegistry;
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Add,
    Remove(usize),
    Undo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        (0usize..8).prop_map(Op::Remove),
        Just(Op::Undo),
    ]
}

/// Live ids stay unique, fresh ids are always new, and undo mirrors a stack.
#[test]
fn test_registry_ids_and_undo_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(0usize..5, prop::collection::vec(op_strategy(), 0..40)),
            |(initial, ops)| {
                let mut registry = ModuleRegistry::with_defaults(initial);
                let mut issued: HashSet<u32> =
                    registry.list_modules().iter().map(|m| m.id).collect();
                let mut model_stack: Vec<u32> = Vec::new();

                for op in ops {
                    match op {
                        Op::Add => {
                            let id = registry.add_module(None).id;
                            prop_assert!(issued.insert(id), "id {} issued twice", id);
                        }
                        Op::Remove(index) => {
                            let target = registry.list_modules().get(index).map(|m| m.id);
                            let removed = registry.remove_module(target.unwrap_or(u32::MAX));
                            prop_assert_eq!(removed, target.is_some());
                            if let Some(id) = target {
                                model_stack.push(id);
                            }
                        }
                        Op::Undo => {
                            let restored = registry.undo_last_removal().map(|m| m.id);
                            prop_assert_eq!(restored, model_stack.pop());
                        }
                    }

                    let ids: Vec<u32> = registry.list_modules().iter().map(|m| m.id).collect();
                    let unique: HashSet<u32> = ids.iter().copied().collect();
                    prop_assert_eq!(unique.len(), ids.len());
                    prop_assert!(ids.iter().all(|id| *id > 0));
                    prop_assert_eq!(registry.undo_depth(), model_stack.len());
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Removing a module and undoing right away restores its values.
#[test]
fn test_remove_undo_restores_fields_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(1usize..6, "[a-zA-Z ]{0,30}"), |(count, title)| {
            let mut registry = ModuleRegistry::with_defaults(count);
            let id = count as u32;
            registry.get_mut(id).unwrap().fields.title = title.clone();
            let before = registry.get(id).unwrap().fields.clone();

            prop_assert!(registry.remove_module(id));
            let restored = registry.undo_last_removal().unwrap();
            prop_assert_eq!(restored.id, id);
            prop_assert_eq!(&restored.fields, &before);
            Ok(())
        })
        .unwrap();
}
