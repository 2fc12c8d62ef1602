//! Command inventory for the `apply()` boundary
//!
//! Every mutation the store supports has one variant here. Drafts and
//! patches are carried whole; `apply()` routes each variant to its op.

use crate::model::{
    CapabilityPatch, MilestonePatch, MilestoneType, NewCapability, NewMilestone, NewNotification,
    NewPlan, NewUser, PhaseName, PhasePatch, PlanPatch, PlanStatus, UserPatch,
};
use crate::rules::PlanDraft;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CapabilityAdd { draft: NewCapability },
    CapabilityUpdate { capability_id: String, patch: CapabilityPatch },
    CapabilityDelete { capability_id: String },
    /// Copy a milestone snapshot into the slot matching its type
    CapabilityAssignMilestone { capability_id: String, milestone_id: String },
    CapabilityClearMilestone { capability_id: String, slot: MilestoneType },

    MilestoneAdd { draft: NewMilestone },
    MilestoneUpdate { milestone_id: String, patch: MilestonePatch },
    MilestoneDelete { milestone_id: String },

    PlanAdd { draft: NewPlan },
    PlanUpdate { plan_id: String, patch: PlanPatch },
    PlanDelete { plan_id: String },
    PlanApprove {
        plan_id: String,
        approver_id: String,
        comments: Option<String>,
    },
    PlanUpdatePhase {
        plan_id: String,
        phase: PhaseName,
        patch: PhasePatch,
    },
    PlanSetStatus { plan_id: String, status: PlanStatus },
    /// Copy a plan into the next draft version
    PlanRevise { plan_id: String },
    /// Validate, then update the latest plan of the type or add one
    PlanSaveDraft { draft: PlanDraft },

    UserAdd { draft: NewUser },
    UserUpdate { user_id: String, patch: UserPatch },
    UserDelete { user_id: String },
    SetCurrentUser { user_id: String },

    NotificationAdd { draft: NewNotification },
    NotificationMarkRead { notification_id: String },
    NotificationMarkAllRead,
}

impl Command {
    /// Operation name used in lifecycle log events
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::CapabilityAdd { .. } => "capability_add",
            Command::CapabilityUpdate { .. } => "capability_update",
            Command::CapabilityDelete { .. } => "capability_delete",
            Command::CapabilityAssignMilestone { .. } => "capability_assign_milestone",
            Command::CapabilityClearMilestone { .. } => "capability_clear_milestone",
            Command::MilestoneAdd { .. } => "milestone_add",
            Command::MilestoneUpdate { .. } => "milestone_update",
            Command::MilestoneDelete { .. } => "milestone_delete",
            Command::PlanAdd { .. } => "plan_add",
            Command::PlanUpdate { .. } => "plan_update",
            Command::PlanDelete { .. } => "plan_delete",
            Command::PlanApprove { .. } => "plan_approve",
            Command::PlanUpdatePhase { .. } => "plan_update_phase",
            Command::PlanSetStatus { .. } => "plan_set_status",
            Command::PlanRevise { .. } => "plan_revise",
            Command::PlanSaveDraft { .. } => "plan_save_draft",
            Command::UserAdd { .. } => "user_add",
            Command::UserUpdate { .. } => "user_update",
            Command::UserDelete { .. } => "user_delete",
            Command::SetCurrentUser { .. } => "set_current_user",
            Command::NotificationAdd { .. } => "notification_add",
            Command::NotificationMarkRead { .. } => "notification_mark_read",
            Command::NotificationMarkAllRead => "notification_mark_all_read",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_names_are_snake_case() {
        let cmd = Command::PlanUpdatePhase {
            plan_id: "p1".to_string(),
            phase: PhaseName::Uat,
            patch: PhasePatch::default(),
        };
        assert_eq!(cmd.op_name(), "plan_update_phase");
        assert_eq!(Command::NotificationMarkAllRead.op_name(), "notification_mark_all_read");
    }

    #[test]
    fn test_command_clone() {
        let cmd = Command::PlanApprove {
            plan_id: "p1".to_string(),
            approver_id: "2".to_string(),
            comments: None,
        };
        assert_eq!(cmd.clone(), cmd);
    }
}
