//! Plan draft checks and the validated save path

pub mod invariants;
pub mod validation;

pub use validation::{save_plan_draft, validate_plan_phases, PlanDraft, SaveOutcome};
