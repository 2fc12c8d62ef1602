use serde::{Deserialize, Serialize};

use super::invariants;
use crate::errors::{FieldViolation, Result, TrackerError};
use crate::model::{NewPlan, PlanPatch, PlanPhases, PlanStatus, PlanType};
use crate::ops::{plan_ops, Store};
use crate::queries::latest_plan;

/// A complete plan as submitted from a plan form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDraft {
    pub capability_id: String,
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    #[serde(default)]
    pub status: PlanStatus,
    pub phases: PlanPhases,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No plan of this type existed; a new version-1 draft was added
    Created(String),
    /// The latest plan of this type was updated in place
    Updated(String),
}

impl SaveOutcome {
    pub fn plan_id(&self) -> &str {
        match self {
            SaveOutcome::Created(id) | SaveOutcome::Updated(id) => id,
        }
    }
}

/// Check the phases a plan type requires
///
/// Runs every rule and returns all violations together: missing dates
/// first, then inverted ranges, then sequencing. An empty result means the
/// phases are valid.
pub fn validate_plan_phases(plan_type: PlanType, phases: &PlanPhases) -> Vec<FieldViolation> {
    let required = plan_type.required_phases();

    let mut violations = invariants::find_missing_dates(required, phases);
    violations.extend(invariants::find_inverted_ranges(required, phases));
    violations.extend(invariants::find_sequence_breaks(required, phases));
    violations
}

/// Validate a draft and save it as the latest plan of its type
///
/// Updates the latest existing plan for the capability and type, or adds a
/// new one. Status is only applied on update; new plans start as drafts.
///
/// # Errors
///
/// * `PlanValidation` - With every violation found; nothing is saved
/// * `Serialization` - If the update history cannot be recorded
pub fn save_plan_draft(store: &mut Store, draft: PlanDraft) -> Result<SaveOutcome> {
    let violations = validate_plan_phases(draft.plan_type, &draft.phases);
    if !violations.is_empty() {
        return Err(TrackerError::PlanValidation { violations });
    }

    let existing = latest_plan(store, &draft.capability_id, draft.plan_type).map(|p| p.id.clone());

    match existing {
        Some(plan_id) => {
            let patch = PlanPatch {
                capability_id: Some(draft.capability_id),
                plan_type: Some(draft.plan_type),
                status: Some(draft.status),
                phases: Some(draft.phases),
                ..Default::default()
            };
            plan_ops::update_plan(store, &plan_id, patch)?;
            Ok(SaveOutcome::Updated(plan_id))
        }
        None => {
            let plan_id = plan_ops::add_plan(
                store,
                NewPlan {
                    capability_id: draft.capability_id,
                    plan_type: draft.plan_type,
                    phases: draft.phases,
                },
            );
            Ok(SaveOutcome::Created(plan_id))
        }
    }
}
