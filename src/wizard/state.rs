//! Wizard steps and transitions.

use crate::error::SetupBlocker;
use crate::wizard::setup::SetupReadiness;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WizardStep {
    #[default]
    Setup,
    Structure,
    Bonus,
    Generation,
    Output,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Setup => 1,
            WizardStep::Structure => 2,
            WizardStep::Bonus => 3,
            WizardStep::Generation => 4,
            WizardStep::Output => 5,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(WizardStep::Setup),
            2 => Some(WizardStep::Structure),
            3 => Some(WizardStep::Bonus),
            4 => Some(WizardStep::Generation),
            5 => Some(WizardStep::Output),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Setup => "Basic Setup",
            WizardStep::Structure => "Module Structure & Type",
            WizardStep::Bonus => "Bonus Modules",
            WizardStep::Generation => "Content Generation & Refining",
            WizardStep::Output => "Final Output",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}: {}", self.number(), self.title())
    }
}

/// Current step plus the bonus flag that decides the 2 → 3/4 fork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    pub bonus_enabled: bool,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bonus(self, bonus_enabled: bool) -> Self {
        Self {
            bonus_enabled,
            ..self
        }
    }

    /// Forward target, ignoring the setup gate. `None` at the last step.
    pub fn next_step(self) -> Option<WizardStep> {
        match self.step {
            WizardStep::Setup => Some(WizardStep::Structure),
            WizardStep::Structure if self.bonus_enabled => Some(WizardStep::Bonus),
            WizardStep::Structure => Some(WizardStep::Generation),
            WizardStep::Bonus => Some(WizardStep::Generation),
            WizardStep::Generation => Some(WizardStep::Output),
            WizardStep::Output => None,
        }
    }

    /// Backward target, mirroring [`next_step`](Self::next_step). `None` at the first step.
    pub fn previous_step(self) -> Option<WizardStep> {
        match self.step {
            WizardStep::Setup => None,
            WizardStep::Structure => Some(WizardStep::Setup),
            WizardStep::Bonus => Some(WizardStep::Structure),
            WizardStep::Generation if self.bonus_enabled => Some(WizardStep::Bonus),
            WizardStep::Generation => Some(WizardStep::Structure),
            WizardStep::Output => Some(WizardStep::Generation),
        }
    }

    /// Move forward. Leaving setup requires `readiness` to pass; the last step stays put.
    pub fn forward(self, readiness: &SetupReadiness<'_>) -> Result<Self, SetupBlocker> {
        if self.step == WizardStep::Setup {
            readiness.check()?;
        }
        Ok(match self.next_step() {
            Some(step) => Self { step, ..self },
            None => self,
        })
    }

    /// Move back; the first step stays put.
    pub fn backward(self) -> Self {
        match self.previous_step() {
            Some(step) => Self { step, ..self },
            None => self,
        }
    }
}
