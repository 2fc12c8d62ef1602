#![allow(dead_code)]

use std::path::PathBuf;

use captrack_core::model::{
    NewCapability, NewPlan, PlanPhase, PlanPhases, PlanType, Rag, WorkstreamLead,
};
use captrack_core::ops::{capability_ops, plan_ops};
use captrack_core::Store;
use chrono::NaiveDate;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn add_capability(store: &mut Store, name: &str, workstream: &str) -> String {
    capability_ops::add_capability(
        store,
        NewCapability {
            name: name.to_string(),
            workstream: workstream.to_string(),
            workstream_lead: WorkstreamLead::named("Sarah Chen"),
            rag: Rag::Green,
            ..Default::default()
        },
    )
}

/// Back-to-back monthly phases for the plan type, starting in `first_month`
/// of 2025
pub fn phases_from(plan_type: PlanType, first_month: u32) -> PlanPhases {
    let mut phases = PlanPhases::default();
    for (i, &phase) in plan_type.required_phases().iter().enumerate() {
        let month = first_month + i as u32;
        phases.set(
            phase,
            PlanPhase::scheduled(date(2025, month, 1), date(2025, month, 28)),
        );
    }
    phases
}

pub fn add_plan(store: &mut Store, capability_id: &str, plan_type: PlanType, first_month: u32) -> String {
    plan_ops::add_plan(
        store,
        NewPlan {
            capability_id: capability_id.to_string(),
            plan_type,
            phases: phases_from(plan_type, first_month),
        },
    )
}
