//! Wizard navigation properties

use aplus::wizard::{apply, SetupReadiness, WizardCommand, WizardState, WizardStep};
use proptest::prelude::*;

const READY: SetupReadiness<'static> = SetupReadiness {
    credential_set: true,
    directory: "/books",
    subfolders: &[],
};

fn command_strategy() -> impl Strategy<Value = WizardCommand> {
    prop_oneof![
        Just(WizardCommand::Next),
        Just(WizardCommand::Back),
        any::<bool>().prop_map(WizardCommand::SetBonus),
    ]
}

/// Steps stay in range, the bonus step is only ever occupied with bonus on, and a
/// forward move is always undone by one back move.
#[test]
fn test_navigation_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(command_strategy(), 0..50), |commands| {
            let mut state = WizardState::new();
            for command in commands {
                let before = state;
                state = apply(state, command, &READY).state;

                prop_assert!((1..=5).contains(&state.step.number()));
                if state.step == WizardStep::Bonus {
                    prop_assert!(state.bonus_enabled);
                }

                if matches!(command, WizardCommand::Next) && state != before {
                    let back = apply(state, WizardCommand::Back, &READY).state;
                    prop_assert_eq!(back, before);
                }
            }
            Ok(())
        })
        .unwrap();
}

/// Without setup inputs no command sequence leaves step one.
#[test]
fn test_gate_holds_property() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let blocked = SetupReadiness {
        credential_set: false,
        ..READY
    };

    runner
        .run(&prop::collection::vec(command_strategy(), 0..30), |commands| {
            let mut state = WizardState::new();
            for command in commands {
                state = apply(state, command, &blocked).state;
                prop_assert_eq!(state.step, WizardStep::Setup);
            }
            Ok(())
        })
        .unwrap();
}
