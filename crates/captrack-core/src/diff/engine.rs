//! Phase-level plan diff

use super::model::{PhaseField, PlanComparison};
use crate::model::{PhaseName, PlanPhase, PlanPhases};
use crate::ops::Store;

fn field_differs(a: &PlanPhase, b: &PlanPhase, field: PhaseField) -> bool {
    match field {
        PhaseField::StartDate => a.start_date != b.start_date,
        PhaseField::EndDate => a.end_date != b.end_date,
        PhaseField::Status => a.status != b.status,
    }
}

/// Diff two phase sets, `a` being the baseline
pub fn compare_phases(a: &PlanPhases, b: &PlanPhases) -> PlanComparison {
    let mut comparison = PlanComparison::default();

    for phase in PhaseName::ALL {
        match (a.get(phase), b.get(phase)) {
            (None, Some(_)) => comparison.added.push(phase.to_string()),
            (Some(_), None) => comparison.removed.push(phase.to_string()),
            (Some(old), Some(new)) => {
                for field in PhaseField::ALL {
                    if field_differs(old, new, field) {
                        comparison.push_changed(phase, field);
                    }
                }
            }
            (None, None) => {}
        }
    }

    comparison
}

/// Compare two stored plans by ID
///
/// Returns three empty lists when either plan is missing.
pub fn compare_plans(store: &Store, plan_id_1: &str, plan_id_2: &str) -> PlanComparison {
    match (store.get_plan(plan_id_1), store.get_plan(plan_id_2)) {
        (Some(a), Some(b)) => compare_phases(&a.phases, &b.phases),
        _ => {
            tracing::debug!(plan_id_1, plan_id_2, "comparison skipped: plan not found");
            PlanComparison::default()
        }
    }
}
