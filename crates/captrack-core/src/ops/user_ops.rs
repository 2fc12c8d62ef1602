use uuid::Uuid;

use super::store::Store;
use crate::model::{NewUser, User, UserPatch};

pub fn add_user(store: &mut Store, draft: NewUser) -> String {
    let id = Uuid::new_v4().to_string();
    store.insert_user(User::from_new(id.clone(), draft));
    id
}

/// Merge a partial update into a user (silent no-op when absent)
pub fn update_user(store: &mut Store, id: &str, patch: UserPatch) -> bool {
    match store.get_user_mut(id) {
        Some(user) => {
            user.apply_patch(patch);
            true
        }
        None => false,
    }
}

/// Remove a user by ID (idempotent)
///
/// Phase assignments and history entries keep the old user ID.
pub fn delete_user(store: &mut Store, id: &str) -> bool {
    let before = store.users.len();
    store.users.retain(|u| u.id != id);
    before != store.users.len()
}
