//! Apply API demonstration
//!
//! Threads a store through a handful of commands: create a capability and
//! a milestone, plan the delivery, approve it and revise it.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use captrack_core::diff::{compare_plans, render_comparison_summary};
use captrack_core::model::{
    MilestoneType, NewCapability, NewMilestone, NewPlan, PhaseName, PhasePatch, PlanPhase,
    PlanPhases, PlanType, WorkstreamLead,
};
use captrack_core::{apply_with_outcome, Command, CommandOutcome, Store};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn created(outcome: CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Created(id) => id,
        CommandOutcome::Revised(Some(id)) => id,
        other => panic!("unexpected outcome {other:?}"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== CapTrack Apply Demo ===\n");

    let (state, outcome) = apply_with_outcome(
        Store::new(),
        Command::CapabilityAdd {
            draft: NewCapability {
                name: "Customer Portal".to_string(),
                workstream: "Frontend Development".to_string(),
                workstream_lead: WorkstreamLead::named("Sarah Chen"),
                ..Default::default()
            },
        },
    )?;
    let capability_id = created(outcome);
    println!("Created capability {capability_id}");

    let (state, outcome) = apply_with_outcome(
        state,
        Command::MilestoneAdd {
            draft: NewMilestone {
                name: "API Complete".to_string(),
                date: date(2025, 3, 1),
                milestone_type: MilestoneType::Technical,
                description: "All public APIs frozen".to_string(),
                status: "Planned".to_string(),
            },
        },
    )?;
    let milestone_id = created(outcome);

    let (state, _) = apply_with_outcome(
        state,
        Command::CapabilityAssignMilestone {
            capability_id: capability_id.clone(),
            milestone_id,
        },
    )?;

    let (state, outcome) = apply_with_outcome(
        state,
        Command::PlanAdd {
            draft: NewPlan {
                capability_id: capability_id.clone(),
                plan_type: PlanType::Implementation,
                phases: PlanPhases::default()
                    .with(PhaseName::Development, PlanPhase::scheduled(date(2025, 1, 6), date(2025, 2, 28)))
                    .with(PhaseName::Cst, PlanPhase::scheduled(date(2025, 3, 3), date(2025, 3, 28)))
                    .with(PhaseName::Uat, PlanPhase::scheduled(date(2025, 3, 31), date(2025, 4, 25))),
            },
        },
    )?;
    let v1 = created(outcome);
    println!("Planned delivery as {v1}");

    let (state, _) = apply_with_outcome(
        state,
        Command::PlanApprove {
            plan_id: v1.clone(),
            approver_id: "2".to_string(),
            comments: Some("Approved at steering".to_string()),
        },
    )?;

    let (state, outcome) = apply_with_outcome(state, Command::PlanRevise { plan_id: v1.clone() })?;
    let v2 = created(outcome);

    let (state, _) = apply_with_outcome(
        state,
        Command::PlanUpdatePhase {
            plan_id: v2.clone(),
            phase: PhaseName::Uat,
            patch: PhasePatch {
                end_date: Some(date(2025, 5, 9)),
                ..Default::default()
            },
        },
    )?;

    let comparison = compare_plans(&state, &v1, &v2);
    let (Some(a), Some(b)) = (state.get_plan(&v1), state.get_plan(&v2)) else {
        return Err("plans vanished".into());
    };
    println!("\n{}", render_comparison_summary(a, b, &comparison));

    Ok(())
}
