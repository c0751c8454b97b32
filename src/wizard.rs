//! Wizard domain: step state machine, setup gate, and command outcomes.
//! Commands are pure: they return the next state plus effects for the caller to run.

pub mod command;
pub mod setup;
pub mod state;

pub use command::{apply, Effect, Notification, NotifyLevel, Outcome, WizardCommand};
pub use setup::{BookGenre, SetupReadiness, StructureType};
pub use state::{WizardState, WizardStep};
