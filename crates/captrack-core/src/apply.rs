//! Functional-boundary apply
//!
//! `apply()` takes the store by value, runs one command and hands back the
//! new store. Every op checks its preconditions before touching state, so
//! on `Err` nothing was half-applied; callers that need the old state
//! afterwards clone it before calling.
//!
//! This is the single owner of lifecycle logging: one `start` event, then
//! exactly one `end` or `end_error` event per command.
//!
//! ```
//! use captrack_core::{apply, Command, Store};
//! use captrack_core::model::NewCapability;
//!
//! let cmd = Command::CapabilityAdd {
//!     draft: NewCapability {
//!         name: "Customer Portal".to_string(),
//!         workstream: "Frontend Development".to_string(),
//!         ..Default::default()
//!     },
//! };
//!
//! let store = apply(Store::new(), cmd).unwrap();
//! assert_eq!(store.capabilities().len(), 1);
//! ```

use std::time::Instant;

use crate::commands::Command;
use crate::errors::Result;
use crate::ops::{capability_ops, milestone_ops, notification_ops, plan_ops, user_ops, Store};
use crate::rules::{self, SaveOutcome};
use crate::{log_op_end, log_op_error, log_op_start};

/// What a successfully applied command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A new entity with this ID was added
    Created(String),
    /// An update or delete ran; `false` when the target did not exist
    Changed(bool),
    /// A plan revision; `None` when the source plan did not exist
    Revised(Option<String>),
    Saved(SaveOutcome),
    /// Number of notifications flipped to read
    MarkedRead(usize),
}

/// Apply a command, discarding its outcome
///
/// # Errors
///
/// Returns the command's `TrackerError`; see `apply_with_outcome`.
pub fn apply(state: Store, cmd: Command) -> Result<Store> {
    apply_with_outcome(state, cmd).map(|(state, _)| state)
}

/// Apply a command and report what it produced
///
/// # Errors
///
/// * `MilestoneNotFound` - Assigning an unknown milestone
/// * `VersionRegression` - A plan patch lowering the version
/// * `VersionOverflow` - Revising a plan already at the highest version
/// * `InvalidProgress` - A phase patch with progress above 100
/// * `PlanValidation` - A plan draft failing validation
/// * `Serialization` - A history snapshot could not be encoded
pub fn apply_with_outcome(mut state: Store, cmd: Command) -> Result<(Store, CommandOutcome)> {
    let op = cmd.op_name();
    log_op_start!(op);
    let start = Instant::now();

    match execute(&mut state, cmd) {
        Ok(outcome) => {
            log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
            Ok((state, outcome))
        }
        Err(err) => {
            log_op_error!(op, err.clone(), duration_ms = start.elapsed().as_millis() as u64);
            Err(err)
        }
    }
}

fn execute(state: &mut Store, cmd: Command) -> Result<CommandOutcome> {
    use CommandOutcome::{Changed, Created};

    let outcome = match cmd {
        Command::CapabilityAdd { draft } => Created(capability_ops::add_capability(state, draft)),
        Command::CapabilityUpdate {
            capability_id,
            patch,
        } => Changed(capability_ops::update_capability(state, &capability_id, patch)),
        Command::CapabilityDelete { capability_id } => {
            Changed(capability_ops::delete_capability(state, &capability_id))
        }
        Command::CapabilityAssignMilestone {
            capability_id,
            milestone_id,
        } => Changed(capability_ops::assign_milestone(
            state,
            &capability_id,
            &milestone_id,
        )?),
        Command::CapabilityClearMilestone {
            capability_id,
            slot,
        } => Changed(capability_ops::clear_milestone(state, &capability_id, slot)),

        Command::MilestoneAdd { draft } => Created(milestone_ops::add_milestone(state, draft)),
        Command::MilestoneUpdate {
            milestone_id,
            patch,
        } => Changed(milestone_ops::update_milestone(state, &milestone_id, patch)),
        Command::MilestoneDelete { milestone_id } => {
            Changed(milestone_ops::delete_milestone(state, &milestone_id))
        }

        Command::PlanAdd { draft } => Created(plan_ops::add_plan(state, draft)),
        Command::PlanUpdate { plan_id, patch } => {
            Changed(plan_ops::update_plan(state, &plan_id, patch)?)
        }
        Command::PlanDelete { plan_id } => Changed(plan_ops::delete_plan(state, &plan_id)),
        Command::PlanApprove {
            plan_id,
            approver_id,
            comments,
        } => Changed(plan_ops::approve_plan(state, &plan_id, &approver_id, comments)?),
        Command::PlanUpdatePhase {
            plan_id,
            phase,
            patch,
        } => Changed(plan_ops::update_plan_phase(state, &plan_id, phase, patch)?),
        Command::PlanSetStatus { plan_id, status } => {
            Changed(plan_ops::set_plan_status(state, &plan_id, status)?)
        }
        Command::PlanRevise { plan_id } => {
            CommandOutcome::Revised(plan_ops::revise_plan(state, &plan_id)?)
        }
        Command::PlanSaveDraft { draft } => {
            CommandOutcome::Saved(rules::save_plan_draft(state, draft)?)
        }

        Command::UserAdd { draft } => Created(user_ops::add_user(state, draft)),
        Command::UserUpdate { user_id, patch } => {
            Changed(user_ops::update_user(state, &user_id, patch))
        }
        Command::UserDelete { user_id } => Changed(user_ops::delete_user(state, &user_id)),
        Command::SetCurrentUser { user_id } => {
            state.set_current_user(user_id);
            Changed(true)
        }

        Command::NotificationAdd { draft } => {
            Created(notification_ops::add_notification(state, draft))
        }
        Command::NotificationMarkRead { notification_id } => Changed(
            notification_ops::mark_notification_read(state, &notification_id),
        ),
        Command::NotificationMarkAllRead => {
            CommandOutcome::MarkedRead(notification_ops::mark_all_notifications_read(state))
        }
    };

    Ok(outcome)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::errors::TrackerError;
    use crate::model::{NewPlan, PhaseName, PhasePatch, PlanPhases, PlanType};

    fn with_plan() -> (Store, String) {
        let (state, outcome) = apply_with_outcome(
            Store::new(),
            Command::PlanAdd {
                draft: NewPlan {
                    capability_id: "c1".to_string(),
                    plan_type: PlanType::Implementation,
                    phases: PlanPhases::default(),
                },
            },
        )
        .unwrap();
        match outcome {
            CommandOutcome::Created(id) => (state, id),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_apply_plan_add_reports_id() {
        let (state, id) = with_plan();
        assert_eq!(state.get_plan(&id).unwrap().version, 1);
    }

    #[test]
    fn test_apply_failure_leaves_cloned_state_valid() {
        let (state, id) = with_plan();
        let before = state.clone();

        let err = apply(
            state,
            Command::PlanUpdatePhase {
                plan_id: id.clone(),
                phase: PhaseName::Uat,
                patch: PhasePatch {
                    progress: Some(150),
                    ..Default::default()
                },
            },
        )
        .unwrap_err();

        assert!(matches!(err, TrackerError::InvalidProgress { progress: 150, .. }));
        assert!(before.get_plan(&id).unwrap().history.is_empty());
    }

    #[test]
    fn test_apply_missing_target_is_not_an_error() {
        let (_, outcome) = apply_with_outcome(
            Store::new(),
            Command::CapabilityDelete {
                capability_id: "missing".to_string(),
            },
        )
        .unwrap();
        assert_eq!(outcome, CommandOutcome::Changed(false));
    }

    #[test]
    fn test_apply_set_current_user_stamps_later_plans() {
        let state = apply(
            Store::new(),
            Command::SetCurrentUser {
                user_id: "7".to_string(),
            },
        )
        .unwrap();
        let state = apply(
            state,
            Command::PlanAdd {
                draft: NewPlan {
                    capability_id: "c1".to_string(),
                    plan_type: PlanType::Aspirational,
                    phases: PlanPhases::default(),
                },
            },
        )
        .unwrap();
        assert_eq!(state.plans()[0].metadata.created_by, "7");
    }
}
