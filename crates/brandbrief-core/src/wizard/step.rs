//! Wizard step sequence.

use strum::EnumIter;

/// The ordered steps of the profile intake wizard, indexed 0..3.
///
/// There is no terminal step: the wizard is re-enterable indefinitely and
/// re-editable after save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum WizardStep {
    Basics,
    Offerings,
    AudienceVoice,
    Policies,
}

impl WizardStep {
    /// The step a fresh wizard session starts on.
    pub const FIRST: WizardStep = WizardStep::Basics;

    pub fn index(self) -> usize {
        match self {
            WizardStep::Basics => 0,
            WizardStep::Offerings => 1,
            WizardStep::AudienceVoice => 2,
            WizardStep::Policies => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(WizardStep::Basics),
            1 => Some(WizardStep::Offerings),
            2 => Some(WizardStep::AudienceVoice),
            3 => Some(WizardStep::Policies),
            _ => None,
        }
    }

    /// The following step, `None` at the end of the sequence.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The preceding step, `None` at the start of the sequence.
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Display label for step indicators.
    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Basics => "Basics",
            WizardStep::Offerings => "Products & Pricing (optional)",
            WizardStep::AudienceVoice => "Audience & Voice",
            WizardStep::Policies => "Policies (optional)",
        }
    }
}
