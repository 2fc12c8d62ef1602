use chrono::Utc;
use uuid::Uuid;

use super::store::Store;
use crate::model::{NewNotification, Notification};

/// Record a new unread notification at the head of the list
pub fn add_notification(store: &mut Store, draft: NewNotification) -> String {
    let id = Uuid::new_v4().to_string();
    store.insert_notification(Notification::from_new(id.clone(), draft, Utc::now()));
    id
}

/// Mark one notification read (silent no-op when absent)
pub fn mark_notification_read(store: &mut Store, id: &str) -> bool {
    match store.notifications.iter_mut().find(|n| n.id == id) {
        Some(notification) => {
            notification.read = true;
            true
        }
        None => false,
    }
}

/// Mark every notification read
///
/// # Returns
/// How many notifications were unread before the call
pub fn mark_all_notifications_read(store: &mut Store) -> usize {
    let mut flipped = 0;
    for notification in store.notifications.iter_mut().filter(|n| !n.read) {
        notification.read = true;
        flipped += 1;
    }
    flipped
}
