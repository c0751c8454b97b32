//! Wizard commands and their outcomes.

use crate::wizard::setup::SetupReadiness;
use crate::wizard::state::{WizardState, WizardStep};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardCommand {
    Next,
    Back,
    SetBonus(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A message for the user, shown next to whatever triggered it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotifyLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotifyLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotifyLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotifyLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotifyLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotifyLevel::Error, message)
    }
}

/// Side effects the caller is expected to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Notification),
    /// Entered content generation; run parallel population
    PopulateModules,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub state: WizardState,
    pub effects: Vec<Effect>,
}

impl Outcome {
    fn unchanged(state: WizardState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.effects.iter().filter_map(|effect| match effect {
            Effect::Notify(notification) => Some(notification),
            Effect::PopulateModules => None,
        })
    }

    pub fn wants_population(&self) -> bool {
        self.effects.contains(&Effect::PopulateModules)
    }
}

/// Apply `command` to `state`. Never fails; a blocked transition keeps the state and
/// reports the blocker as an error notification.
///
/// The bonus flag only changes on the setup and structure steps; elsewhere `SetBonus`
/// is ignored so the current step always lies on the path the flag describes.
pub fn apply(
    state: WizardState,
    command: WizardCommand,
    readiness: &SetupReadiness<'_>,
) -> Outcome {
    match command {
        WizardCommand::SetBonus(enabled) => match state.step {
            WizardStep::Setup | WizardStep::Structure => {
                Outcome::unchanged(state.with_bonus(enabled))
            }
            _ => Outcome::unchanged(state),
        },
        WizardCommand::Back => Outcome::unchanged(state.backward()),
        WizardCommand::Next => match state.forward(readiness) {
            Err(blocker) => Outcome {
                state,
                effects: vec![Effect::Notify(Notification::error(blocker.to_string()))],
            },
            Ok(next) if next == state => Outcome::unchanged(state),
            Ok(next) => {
                let mut effects = Vec::new();
                if next.step == WizardStep::Generation {
                    effects.push(Effect::PopulateModules);
                }
                Outcome {
                    state: next,
                    effects,
                }
            }
        },
    }
}
