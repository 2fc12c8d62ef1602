use uuid::Uuid;

use super::store::Store;
use crate::errors::{Result, TrackerError};
use crate::model::{Capability, CapabilityPatch, MilestoneRef, MilestoneType, NewCapability};

/// Create a new capability
///
/// Assigns a fresh UUID and appends the capability to the collection.
/// Names are not required to be unique.
///
/// # Returns
/// The ID of the newly created capability
pub fn add_capability(store: &mut Store, draft: NewCapability) -> String {
    let id = Uuid::new_v4().to_string();
    tracing::debug!(capability_id = %id, name = %draft.name, "adding capability");
    store.insert_capability(Capability::from_new(id.clone(), draft));
    id
}

/// Merge a partial update into a capability
///
/// An unknown ID is a silent no-op.
///
/// # Returns
/// `true` if a capability with this ID existed
pub fn update_capability(store: &mut Store, id: &str, patch: CapabilityPatch) -> bool {
    match store.get_capability_mut(id) {
        Some(capability) => {
            capability.apply_patch(patch);
            true
        }
        None => {
            tracing::debug!(capability_id = %id, "update skipped: capability not found");
            false
        }
    }
}

/// Remove a capability by ID (idempotent)
///
/// Plans owned by the capability are left in place.
///
/// # Returns
/// `true` if something was removed
pub fn delete_capability(store: &mut Store, id: &str) -> bool {
    let before = store.capabilities.len();
    store.capabilities.retain(|c| c.id != id);
    before != store.capabilities.len()
}

/// Copy a milestone snapshot into the matching slot of a capability
///
/// The slot (technical or business) follows the milestone's type. The copy
/// is taken now; later edits to the milestone are not reflected. An unknown
/// capability ID is a silent no-op.
///
/// # Errors
/// * `MilestoneNotFound` - If no milestone has this ID
pub fn assign_milestone(store: &mut Store, capability_id: &str, milestone_id: &str) -> Result<bool> {
    let milestone = store
        .get_milestone(milestone_id)
        .ok_or_else(|| TrackerError::MilestoneNotFound {
            milestone_id: milestone_id.to_string(),
        })?;
    let snapshot = MilestoneRef::from(milestone);
    let milestone_type = milestone.milestone_type;

    let Some(capability) = store.get_capability_mut(capability_id) else {
        return Ok(false);
    };

    match milestone_type {
        MilestoneType::Technical => capability.technical_milestone = Some(snapshot),
        MilestoneType::Business => capability.business_milestone = Some(snapshot),
    }
    Ok(true)
}

/// Empty one milestone slot of a capability
pub fn clear_milestone(store: &mut Store, capability_id: &str, slot: MilestoneType) -> bool {
    let Some(capability) = store.get_capability_mut(capability_id) else {
        return false;
    };
    match slot {
        MilestoneType::Technical => capability.technical_milestone = None,
        MilestoneType::Business => capability.business_milestone = None,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MilestonePatch, NewMilestone, Rag};
    use crate::ops::milestone_ops;
    use chrono::NaiveDate;

    fn draft(name: &str) -> NewCapability {
        NewCapability {
            name: name.to_string(),
            workstream: "Backend Services".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_capability_appends_with_unique_id() {
        let mut store = Store::new();
        let id1 = add_capability(&mut store, draft("X"));
        let id2 = add_capability(&mut store, draft("X"));

        assert_ne!(id1, id2);
        assert_eq!(store.capabilities().len(), 2);
        assert_eq!(store.capabilities()[0].id, id1);
    }

    #[test]
    fn test_update_unknown_capability_is_silent() {
        let mut store = Store::new();
        add_capability(&mut store, draft("X"));
        let before = store.clone();

        let found = update_capability(
            &mut store,
            "missing",
            CapabilityPatch {
                rag: Some(Rag::Red),
                ..Default::default()
            },
        );

        assert!(!found);
        assert_eq!(store, before);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = Store::new();
        let id = add_capability(&mut store, draft("X"));

        assert!(delete_capability(&mut store, &id));
        assert!(!delete_capability(&mut store, &id));
        assert!(store.capabilities().is_empty());
    }

    #[test]
    fn test_assign_milestone_copies_snapshot() {
        let mut store = Store::new();
        let cap_id = add_capability(&mut store, draft("X"));
        let milestone_id = milestone_ops::add_milestone(
            &mut store,
            NewMilestone {
                name: "User Acceptance".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 2, 15).unwrap(),
                milestone_type: MilestoneType::Business,
                description: String::new(),
                status: String::new(),
            },
        );

        assert!(assign_milestone(&mut store, &cap_id, &milestone_id).unwrap());
        milestone_ops::update_milestone(
            &mut store,
            &milestone_id,
            MilestonePatch {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        );

        let cap = store.get_capability(&cap_id).unwrap();
        let snapshot = cap.business_milestone.as_ref().unwrap();
        assert_eq!(snapshot.name, "User Acceptance");
        assert!(cap.technical_milestone.is_none());
    }

    #[test]
    fn test_assign_unknown_milestone_fails() {
        let mut store = Store::new();
        let cap_id = add_capability(&mut store, draft("X"));

        let result = assign_milestone(&mut store, &cap_id, "nope");
        assert!(matches!(
            result,
            Err(TrackerError::MilestoneNotFound { .. })
        ));
    }
}
