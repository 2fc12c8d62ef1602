use serde::{Deserialize, Serialize};

use crate::model::{Capability, Milestone, Notification, Plan, User};

/// Acting user when none is configured
pub const DEFAULT_CURRENT_USER: &str = "1";

/// In-memory state container for every CapTrack entity
///
/// Collections are `Vec`s so that natural insertion order is preserved for
/// queries. Not thread-safe (no Arc/RwLock) - designed for single-threaded
/// use; pass it explicitly to the functions in `ops`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub(crate) capabilities: Vec<Capability>,
    pub(crate) milestones: Vec<Milestone>,
    pub(crate) plans: Vec<Plan>,
    pub(crate) users: Vec<User>,
    /// Newest first
    pub(crate) notifications: Vec<Notification>,
    /// User recorded as actor on plan mutations
    pub(crate) current_user: String,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create a new empty Store acting as the default user
    pub fn new() -> Self {
        Self::with_current_user(DEFAULT_CURRENT_USER)
    }

    /// Create a new empty Store acting as `user_id`
    pub fn with_current_user(user_id: impl Into<String>) -> Self {
        Self {
            capabilities: Vec::new(),
            milestones: Vec::new(),
            plans: Vec::new(),
            users: Vec::new(),
            notifications: Vec::new(),
            current_user: user_id.into(),
        }
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    pub fn set_current_user(&mut self, user_id: impl Into<String>) {
        self.current_user = user_id.into();
    }

    pub fn get_capability(&self, id: &str) -> Option<&Capability> {
        self.capabilities.iter().find(|c| c.id == id)
    }

    pub fn get_capability_mut(&mut self, id: &str) -> Option<&mut Capability> {
        self.capabilities.iter_mut().find(|c| c.id == id)
    }

    pub fn get_milestone(&self, id: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    pub fn get_milestone_mut(&mut self, id: &str) -> Option<&mut Milestone> {
        self.milestones.iter_mut().find(|m| m.id == id)
    }

    pub fn get_plan(&self, id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn get_plan_mut(&mut self, id: &str) -> Option<&mut Plan> {
        self.plans.iter_mut().find(|p| p.id == id)
    }

    pub fn get_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn get_user_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Append a capability as-is
    ///
    /// Used by CRUD operations, seed import and test helpers.
    pub fn insert_capability(&mut self, capability: Capability) {
        self.capabilities.push(capability);
    }

    pub fn insert_milestone(&mut self, milestone: Milestone) {
        self.milestones.push(milestone);
    }

    pub fn insert_plan(&mut self, plan: Plan) {
        self.plans.push(plan);
    }

    pub fn insert_user(&mut self, user: User) {
        self.users.push(user);
    }

    /// Prepend a notification (newest first)
    pub fn insert_notification(&mut self, notification: Notification) {
        self.notifications.insert(0, notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewCapability, WorkstreamLead};

    #[test]
    fn test_new_store() {
        let store = Store::new();
        assert!(store.capabilities().is_empty());
        assert!(store.plans().is_empty());
        assert_eq!(store.current_user(), DEFAULT_CURRENT_USER);
    }

    #[test]
    fn test_insert_and_get_capability() {
        let mut store = Store::new();
        let cap = Capability::from_new(
            "cap-1".to_string(),
            NewCapability {
                name: "Test".to_string(),
                workstream: "Backend Services".to_string(),
                workstream_lead: WorkstreamLead::named("Lead"),
                ..Default::default()
            },
        );

        store.insert_capability(cap);

        let retrieved = store.get_capability("cap-1").unwrap();
        assert_eq!(retrieved.name, "Test");
        assert!(store.get_capability("nonexistent").is_none());
    }

    #[test]
    fn test_snapshot_serde_round_trip() {
        let mut store = Store::with_current_user("u-9");
        store.insert_capability(Capability::from_new(
            "cap-1".to_string(),
            NewCapability {
                name: "Test".to_string(),
                workstream: "Data".to_string(),
                ..Default::default()
            },
        ));

        let json = serde_json::to_string(&store).unwrap();
        let restored: Store = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, store);
        assert_eq!(restored.current_user(), "u-9");
    }
}
