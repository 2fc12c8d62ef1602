use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::store::Store;
use crate::errors::{Result, TrackerError};
use crate::model::{
    FieldChange, HistoryAction, NewPlan, PhaseName, PhasePatch, Plan, PlanApproval,
    PlanHistoryEntry, PlanMetadata, PlanPatch, PlanStatus,
};

fn history_entry(
    action: HistoryAction,
    actor: &str,
    changes: Vec<FieldChange>,
    now: DateTime<Utc>,
) -> PlanHistoryEntry {
    PlanHistoryEntry {
        id: Uuid::new_v4().to_string(),
        timestamp: now,
        action,
        user_id: actor.to_string(),
        changes,
    }
}

/// Create a new plan for a capability
///
/// Stamps `created_at = updated_at = now`, version 1, status draft, an
/// empty history, and the store's current user as creator and last
/// updater. The capability ID is not checked.
///
/// # Returns
/// The ID of the newly created plan
pub fn add_plan(store: &mut Store, draft: NewPlan) -> String {
    let id = Uuid::new_v4().to_string();
    let plan = Plan::from_new(id.clone(), draft, store.current_user(), Utc::now());
    tracing::debug!(plan_id = %id, capability_id = %plan.capability_id, "adding plan");
    store.insert_plan(plan);
    id
}

/// Merge a partial update into a plan and record it in the plan history
///
/// Appends exactly one `updated` entry whose changes list every field set in
/// the patch (whole-value snapshots). Bumps `updated_at` and sets
/// `metadata.last_updated_by` to the current user. An unknown ID is a
/// silent no-op.
///
/// # Errors
/// * `VersionRegression` - If the patch sets a version below the current one
/// * `Serialization` - If a changed value cannot be snapshotted as JSON
pub fn update_plan(store: &mut Store, id: &str, patch: PlanPatch) -> Result<bool> {
    let actor = store.current_user().to_string();
    let Some(plan) = store.get_plan_mut(id) else {
        tracing::debug!(plan_id = %id, "update skipped: plan not found");
        return Ok(false);
    };

    if let Some(requested) = patch.version {
        if requested < plan.version {
            return Err(TrackerError::VersionRegression {
                plan_id: id.to_string(),
                current: plan.version,
                requested,
            });
        }
    }

    let changes = patch.changes_against(plan)?;
    let now = Utc::now();

    patch.merge_into(plan);
    plan.updated_at = now;
    plan.metadata.last_updated_by = actor.clone();
    plan.history
        .push(history_entry(HistoryAction::Updated, &actor, changes, now));

    Ok(true)
}

/// Remove a plan by ID (idempotent, no notifications)
pub fn delete_plan(store: &mut Store, id: &str) -> bool {
    let before = store.plans.len();
    store.plans.retain(|p| p.id != id);
    before != store.plans.len()
}

/// Approve a plan
///
/// Sets status to `active`, stamps the approval block and appends one
/// `approved` entry recording the status change, attributed to the
/// approver. An unknown ID is a silent no-op.
///
/// # Errors
/// * `Serialization` - If the status snapshot cannot be encoded
pub fn approve_plan(
    store: &mut Store,
    id: &str,
    approver_id: &str,
    comments: Option<String>,
) -> Result<bool> {
    let Some(plan) = store.get_plan_mut(id) else {
        return Ok(false);
    };

    let now = Utc::now();
    let change = FieldChange::new(
        "status",
        serde_json::to_value(plan.status)?,
        serde_json::to_value(PlanStatus::Active)?,
    );

    plan.status = PlanStatus::Active;
    plan.updated_at = now;
    plan.approval = Some(PlanApproval {
        approved_by: approver_id.to_string(),
        approved_at: now,
        comments,
    });
    plan.history.push(history_entry(
        HistoryAction::Approved,
        approver_id,
        vec![change],
        now,
    ));

    Ok(true)
}

/// Move a plan to a new status, recording a `status-changed` entry
///
/// # Errors
/// * `Serialization` - If the status snapshot cannot be encoded
pub fn set_plan_status(store: &mut Store, id: &str, status: PlanStatus) -> Result<bool> {
    let actor = store.current_user().to_string();
    let Some(plan) = store.get_plan_mut(id) else {
        return Ok(false);
    };

    let now = Utc::now();
    let change = FieldChange::new(
        "status",
        serde_json::to_value(plan.status)?,
        serde_json::to_value(status)?,
    );

    plan.status = status;
    plan.updated_at = now;
    plan.metadata.last_updated_by = actor.clone();
    plan.history.push(history_entry(
        HistoryAction::StatusChanged,
        &actor,
        vec![change],
        now,
    ));

    Ok(true)
}

/// Merge updates into one phase of a plan
///
/// Only `phases.<phase>` changes; a missing phase starts from
/// `PlanPhase::default()`. Appends one `updated` entry for field
/// `phases.<phase>` holding the whole old (or null) and new phase.
///
/// # Errors
/// * `InvalidProgress` - If the patch sets progress above 100
/// * `Serialization` - If a phase snapshot cannot be encoded
pub fn update_plan_phase(
    store: &mut Store,
    plan_id: &str,
    phase: PhaseName,
    updates: PhasePatch,
) -> Result<bool> {
    if let Some(progress) = updates.progress {
        if progress > 100 {
            return Err(TrackerError::InvalidProgress {
                phase: phase.to_string(),
                progress,
            });
        }
    }

    let actor = store.current_user().to_string();
    let Some(plan) = store.get_plan_mut(plan_id) else {
        return Ok(false);
    };

    let old = plan.phases.get(phase).cloned();
    let mut merged = old.clone().unwrap_or_default();
    merged.apply_patch(updates);

    let now = Utc::now();
    let change = FieldChange::new(
        format!("phases.{}", phase),
        serde_json::to_value(&old)?,
        serde_json::to_value(&merged)?,
    );

    plan.phases.set(phase, merged);
    plan.updated_at = now;
    plan.history
        .push(history_entry(HistoryAction::Updated, &actor, vec![change], now));

    Ok(true)
}

/// Copy a plan into a new draft version
///
/// The new version is one above the highest version among plans of the
/// same capability and type. Phases are copied; approval is not. The new
/// plan's history starts with one `created` entry recording the version.
///
/// # Returns
/// The new plan's ID, or `None` if the source plan does not exist
///
/// # Errors
/// * `VersionOverflow` - If the highest version is already `u32::MAX`
/// * `Serialization` - If the version snapshot cannot be encoded
pub fn revise_plan(store: &mut Store, id: &str) -> Result<Option<String>> {
    let Some(source) = store.get_plan(id) else {
        return Ok(None);
    };

    let highest = store
        .plans()
        .iter()
        .filter(|p| p.capability_id == source.capability_id && p.plan_type == source.plan_type)
        .map(|p| p.version)
        .max()
        .unwrap_or(source.version);
    let next_version = highest
        .checked_add(1)
        .ok_or_else(|| TrackerError::VersionOverflow {
            plan_id: id.to_string(),
            current: highest,
        })?;

    let actor = store.current_user().to_string();
    let now = Utc::now();
    let new_id = Uuid::new_v4().to_string();
    let change = FieldChange::new(
        "version",
        serde_json::to_value(source.version)?,
        serde_json::to_value(next_version)?,
    );

    let revision = Plan {
        id: new_id.clone(),
        capability_id: source.capability_id.clone(),
        plan_type: source.plan_type,
        version: next_version,
        created_at: now,
        updated_at: now,
        status: PlanStatus::Draft,
        phases: source.phases.clone(),
        metadata: PlanMetadata {
            created_by: actor.clone(),
            last_updated_by: actor.clone(),
        },
        approval: None,
        history: vec![history_entry(HistoryAction::Created, &actor, vec![change], now)],
    };

    tracing::debug!(plan_id = %new_id, version = next_version, "revised plan");
    store.insert_plan(revision);
    Ok(Some(new_id))
}
