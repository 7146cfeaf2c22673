//! Profile intake wizard: the ordered four-step editing flow over a profile.

pub mod session;
pub mod step;

pub use session::{MAX_OFFERS, WizardSession};
pub use step::WizardStep;
