pub mod prompt;
pub mod wizard;

pub use prompt::run_intake;
pub use wizard::{IntakeDraft, IntakeError, IntakeWizard, Step};
