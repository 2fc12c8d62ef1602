pub mod capability;
pub mod history;
pub mod milestone;
pub mod notification;
pub mod phase;
pub mod plan;
pub mod user;

pub use capability::{
    Capability, CapabilityPatch, CapabilityStatus, NewCapability, Rag, WorkstreamLead,
};
pub use history::{FieldChange, HistoryAction, PlanHistoryEntry};
pub use milestone::{Milestone, MilestonePatch, MilestoneRef, MilestoneType, NewMilestone};
pub use notification::{NewNotification, Notification, NotificationKind, NotificationMetadata};
pub use phase::{PhaseName, PhasePatch, PhaseStatus, PlanPhase, PlanPhases};
pub use plan::{NewPlan, Plan, PlanApproval, PlanMetadata, PlanPatch, PlanStatus, PlanType};
pub use user::{NewUser, User, UserPatch, UserRole};
