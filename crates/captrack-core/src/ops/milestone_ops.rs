use uuid::Uuid;

use super::store::Store;
use crate::model::{Milestone, MilestonePatch, NewMilestone};

/// Create a new milestone and return its ID
pub fn add_milestone(store: &mut Store, draft: NewMilestone) -> String {
    let id = Uuid::new_v4().to_string();
    tracing::debug!(milestone_id = %id, name = %draft.name, "adding milestone");
    store.insert_milestone(Milestone::from_new(id.clone(), draft));
    id
}

/// Merge a partial update into a milestone (silent no-op when absent)
///
/// Snapshots already copied onto capabilities are not touched.
pub fn update_milestone(store: &mut Store, id: &str, patch: MilestonePatch) -> bool {
    match store.get_milestone_mut(id) {
        Some(milestone) => {
            milestone.apply_patch(patch);
            true
        }
        None => false,
    }
}

/// Remove a milestone by ID (idempotent)
///
/// Capabilities keep their snapshot copies.
pub fn delete_milestone(store: &mut Store, id: &str) -> bool {
    let before = store.milestones.len();
    store.milestones.retain(|m| m.id != id);
    before != store.milestones.len()
}
