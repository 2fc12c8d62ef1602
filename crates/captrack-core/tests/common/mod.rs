#![allow(dead_code)]

use captrack_core::model::{
    CapabilityStatus, MilestoneType, NewCapability, NewMilestone, NewPlan, PhaseName, PlanPhase,
    PlanPhases, PlanType, Rag, WorkstreamLead,
};
use captrack_core::ops::{capability_ops, milestone_ops, plan_ops};
use captrack_core::Store;
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn new_store() -> Store {
    Store::new()
}

pub fn add_capability(store: &mut Store, name: &str, workstream: &str) -> String {
    capability_ops::add_capability(
        store,
        NewCapability {
            name: name.to_string(),
            workstream: workstream.to_string(),
            workstream_lead: WorkstreamLead::named("Sarah Chen"),
            sme: "John Smith".to_string(),
            ba: "Emily Johnson".to_string(),
            status: CapabilityStatus::InProgress,
            rag: Rag::Green,
            ..Default::default()
        },
    )
}

pub fn add_milestone(store: &mut Store, name: &str, milestone_type: MilestoneType) -> String {
    milestone_ops::add_milestone(
        store,
        NewMilestone {
            name: name.to_string(),
            date: date(2025, 3, 1),
            milestone_type,
            description: format!("{} description", name),
            status: "Planned".to_string(),
        },
    )
}

/// Back-to-back monthly phases for every required phase of the type,
/// starting January 2025
pub fn scheduled_phases(plan_type: PlanType) -> PlanPhases {
    let mut phases = PlanPhases::default();
    for (i, &phase) in plan_type.required_phases().iter().enumerate() {
        let month = i as u32 + 1;
        phases.set(
            phase,
            PlanPhase::scheduled(date(2025, month, 1), date(2025, month, 28)),
        );
    }
    phases
}

pub fn add_plan(store: &mut Store, capability_id: &str, plan_type: PlanType) -> String {
    plan_ops::add_plan(
        store,
        NewPlan {
            capability_id: capability_id.to_string(),
            plan_type,
            phases: scheduled_phases(plan_type),
        },
    )
}

pub fn phase(phases: &PlanPhases, name: PhaseName) -> &PlanPhase {
    phases.get(name).unwrap()
}
