//! Plan lookups by capability and version

use serde::Serialize;

use crate::model::{Plan, PlanHistoryEntry, PlanType};
use crate::ops::Store;

/// Name shown for history entries whose capability no longer exists
pub const UNKNOWN_PLAN_NAME: &str = "Unknown Plan";

/// A history entry labelled with the owning plan and capability name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedHistoryEntry {
    pub plan_id: String,
    pub plan_name: String,
    #[serde(flatten)]
    pub entry: PlanHistoryEntry,
}

/// All plans owned by a capability, in collection order
pub fn capability_plans<'a>(store: &'a Store, capability_id: &str) -> Vec<&'a Plan> {
    store
        .plans()
        .iter()
        .filter(|p| p.capability_id == capability_id)
        .collect()
}

/// The latest plan of a type for a capability
///
/// Highest `version` wins. Equal versions fall back to the most recent
/// `created_at`, then to the later position in the collection.
pub fn latest_plan<'a>(store: &'a Store, capability_id: &str, plan_type: PlanType) -> Option<&'a Plan> {
    store
        .plans()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.capability_id == capability_id && p.plan_type == plan_type)
        .max_by_key(|(position, p)| (p.version, p.created_at, *position))
        .map(|(_, p)| p)
}

pub(crate) fn plan_display_name(store: &Store, plan: &Plan) -> String {
    store
        .get_capability(&plan.capability_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| UNKNOWN_PLAN_NAME.to_string())
}

/// A plan's history in recorded order, labelled with the capability name
///
/// Empty when the plan does not exist.
pub fn plan_history(store: &Store, plan_id: &str) -> Vec<AnnotatedHistoryEntry> {
    let Some(plan) = store.get_plan(plan_id) else {
        return Vec::new();
    };
    let plan_name = plan_display_name(store, plan);

    plan.history
        .iter()
        .map(|entry| AnnotatedHistoryEntry {
            plan_id: plan.id.clone(),
            plan_name: plan_name.clone(),
            entry: entry.clone(),
        })
        .collect()
}
