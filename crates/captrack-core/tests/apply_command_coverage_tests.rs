//! Every command routed through `apply()`

mod common;

use captrack_core::model::{
    CapabilityPatch, MilestonePatch, MilestoneType, NewNotification, NewUser, NotificationKind,
    NotificationMetadata, PhaseName, PhasePatch, PlanPatch, PlanStatus, PlanType, Rag, UserPatch,
    UserRole,
};
use captrack_core::rules::{PlanDraft, SaveOutcome};
use captrack_core::{apply, apply_with_outcome, Command, CommandOutcome, Store, TrackerError};
use common::*;

fn created(state: Store, cmd: Command) -> (Store, String) {
    match apply_with_outcome(state, cmd).unwrap() {
        (state, CommandOutcome::Created(id)) => (state, id),
        (_, other) => panic!("expected Created, got {other:?}"),
    }
}

#[test]
fn test_capability_commands() {
    let mut state = new_store();
    let cap = add_capability(&mut state, "Customer Portal", "Frontend");
    let milestone = add_milestone(&mut state, "API Complete", MilestoneType::Technical);

    let state = apply(
        state,
        Command::CapabilityUpdate {
            capability_id: cap.clone(),
            patch: CapabilityPatch {
                rag: Some(Rag::Amber),
                notes: Some(Some("Vendor delay".to_string())),
                ..Default::default()
            },
        },
    )
    .unwrap();
    let state = apply(
        state,
        Command::CapabilityAssignMilestone {
            capability_id: cap.clone(),
            milestone_id: milestone.clone(),
        },
    )
    .unwrap();

    let capability = state.get_capability(&cap).unwrap();
    assert_eq!(capability.rag, Rag::Amber);
    assert_eq!(capability.notes.as_deref(), Some("Vendor delay"));
    assert_eq!(capability.technical_milestone.as_ref().unwrap().id, milestone);

    let state = apply(
        state,
        Command::CapabilityClearMilestone {
            capability_id: cap.clone(),
            slot: MilestoneType::Technical,
        },
    )
    .unwrap();
    assert!(state.get_capability(&cap).unwrap().technical_milestone.is_none());

    let state = apply(state, Command::CapabilityDelete { capability_id: cap }).unwrap();
    assert!(state.capabilities().is_empty());
}

#[test]
fn test_milestone_commands() {
    let mut state = new_store();
    let id = add_milestone(&mut state, "UAT Sign-off", MilestoneType::Business);

    let state = apply(
        state,
        Command::MilestoneUpdate {
            milestone_id: id.clone(),
            patch: MilestonePatch {
                status: Some("Done".to_string()),
                ..Default::default()
            },
        },
    )
    .unwrap();
    assert_eq!(state.get_milestone(&id).unwrap().status, "Done");

    let state = apply(state, Command::MilestoneDelete { milestone_id: id }).unwrap();
    assert!(state.milestones().is_empty());
}

#[test]
fn test_plan_commands() {
    let mut state = new_store();
    let cap = add_capability(&mut state, "Payments", "Backend");
    let plan = add_plan(&mut state, &cap, PlanType::Implementation);

    let state = apply(
        state,
        Command::PlanUpdatePhase {
            plan_id: plan.clone(),
            phase: PhaseName::Development,
            patch: PhasePatch {
                progress: Some(60),
                ..Default::default()
            },
        },
    )
    .unwrap();
    let state = apply(
        state,
        Command::PlanApprove {
            plan_id: plan.clone(),
            approver_id: "2".to_string(),
            comments: None,
        },
    )
    .unwrap();
    let state = apply(
        state,
        Command::PlanSetStatus {
            plan_id: plan.clone(),
            status: PlanStatus::Completed,
        },
    )
    .unwrap();

    let (state, outcome) = apply_with_outcome(
        state,
        Command::PlanRevise {
            plan_id: plan.clone(),
        },
    )
    .unwrap();
    let CommandOutcome::Revised(Some(revision)) = outcome else {
        panic!("expected a revision");
    };

    let original = state.get_plan(&plan).unwrap();
    assert_eq!(original.status, PlanStatus::Completed);
    assert_eq!(original.history.len(), 3);
    assert_eq!(state.get_plan(&revision).unwrap().version, 2);

    let state = apply(state, Command::PlanDelete { plan_id: plan.clone() }).unwrap();
    assert!(state.get_plan(&plan).is_none());
    assert_eq!(state.plans().len(), 1);
}

#[test]
fn test_plan_update_version_regression_rejected() {
    let mut state = new_store();
    let plan = add_plan(&mut state, "c1", PlanType::Aspirational);
    let state = apply(
        state,
        Command::PlanUpdate {
            plan_id: plan.clone(),
            patch: PlanPatch {
                version: Some(4),
                ..Default::default()
            },
        },
    )
    .unwrap();

    let err = apply(
        state,
        Command::PlanUpdate {
            plan_id: plan,
            patch: PlanPatch {
                version: Some(3),
                ..Default::default()
            },
        },
    )
    .unwrap_err();
    assert!(matches!(err, TrackerError::VersionRegression { current: 4, requested: 3, .. }));
}

#[test]
fn test_plan_revise_past_max_version_rejected() {
    let mut state = new_store();
    let plan = add_plan(&mut state, "c1", PlanType::Aspirational);
    let state = apply(
        state,
        Command::PlanUpdate {
            plan_id: plan.clone(),
            patch: PlanPatch {
                version: Some(u32::MAX),
                ..Default::default()
            },
        },
    )
    .unwrap();

    let err = apply(state, Command::PlanRevise { plan_id: plan }).unwrap_err();
    assert!(matches!(err, TrackerError::VersionOverflow { current: u32::MAX, .. }));
}

#[test]
fn test_plan_save_draft_command() {
    let draft = PlanDraft {
        capability_id: "c1".to_string(),
        plan_type: PlanType::Aspirational,
        status: PlanStatus::Draft,
        phases: scheduled_phases(PlanType::Aspirational),
    };

    let (state, outcome) = apply_with_outcome(
        new_store(),
        Command::PlanSaveDraft {
            draft: draft.clone(),
        },
    )
    .unwrap();
    assert!(matches!(outcome, CommandOutcome::Saved(SaveOutcome::Created(_))));

    let (_, outcome) = apply_with_outcome(state, Command::PlanSaveDraft { draft }).unwrap();
    assert!(matches!(outcome, CommandOutcome::Saved(SaveOutcome::Updated(_))));
}

#[test]
fn test_user_and_notification_commands() {
    let (state, user) = created(
        new_store(),
        Command::UserAdd {
            draft: NewUser {
                name: "Lisa Wong".to_string(),
                email: "lisa.wong@example.com".to_string(),
                role: UserRole::Manager,
                avatar: None,
            },
        },
    );
    let state = apply(
        state,
        Command::UserUpdate {
            user_id: user.clone(),
            patch: UserPatch {
                role: Some(UserRole::Admin),
                ..Default::default()
            },
        },
    )
    .unwrap();
    assert_eq!(state.get_user(&user).unwrap().role, UserRole::Admin);

    let (state, note) = created(
        state,
        Command::NotificationAdd {
            draft: NewNotification {
                kind: NotificationKind::PlanApproved,
                title: "Plan approved".to_string(),
                message: "Payments implementation plan approved".to_string(),
                metadata: NotificationMetadata::default(),
            },
        },
    );
    let (state, _) = created(
        state,
        Command::NotificationAdd {
            draft: NewNotification {
                kind: NotificationKind::PhaseStarted,
                title: "Phase started".to_string(),
                message: String::new(),
                metadata: NotificationMetadata::default(),
            },
        },
    );

    let state = apply(
        state,
        Command::NotificationMarkRead {
            notification_id: note,
        },
    )
    .unwrap();
    let (state, outcome) = apply_with_outcome(state, Command::NotificationMarkAllRead).unwrap();
    assert_eq!(outcome, CommandOutcome::MarkedRead(1));

    let state = apply(state, Command::UserDelete { user_id: user }).unwrap();
    assert!(state.users().is_empty());
}
