//! Derived views for dashboards, timelines and the CLI

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::plan_queries::{plan_display_name, AnnotatedHistoryEntry};
use crate::model::{
    Capability, CapabilityStatus, Milestone, MilestoneType, Notification, PhaseName, PhaseStatus,
    Rag,
};
use crate::ops::Store;

/// Headline capability counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStats {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub at_risk: usize,
}

/// Dashboard counts for an optional workstream
///
/// `overdue` counts capabilities whose RAG is red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub in_progress: usize,
    pub at_risk: usize,
    pub overdue: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingDelivery {
    /// `<plan id>-<phase>`
    pub id: String,
    pub plan_id: String,
    pub capability: String,
    pub phase: PhaseName,
    pub due_date: NaiveDate,
    /// Empty when unassigned
    pub assigned_to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedPhase {
    pub plan_id: String,
    pub capability_id: String,
    pub phase: PhaseName,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: PhaseStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttPhase {
    pub phase: PhaseName,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub progress: u8,
    pub status: PhaseStatus,
}

/// One timeline row: a plan and its present phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttRow {
    pub id: String,
    pub capability: String,
    pub phases: Vec<GanttPhase>,
}

fn count_status<'a>(caps: impl Iterator<Item = &'a Capability>, status: CapabilityStatus) -> usize {
    caps.filter(|c| c.status == status).count()
}

pub fn capabilities_stats(store: &Store) -> CapabilityStats {
    let caps = store.capabilities();
    CapabilityStats {
        total: caps.len(),
        in_progress: count_status(caps.iter(), CapabilityStatus::InProgress),
        completed: count_status(caps.iter(), CapabilityStatus::Completed),
        at_risk: count_status(caps.iter(), CapabilityStatus::AtRisk),
    }
}

/// Counts over all capabilities, or those of one workstream (exact match)
pub fn dashboard_stats(store: &Store, workstream: Option<&str>) -> DashboardStats {
    let scoped: Vec<&Capability> = store
        .capabilities()
        .iter()
        .filter(|c| workstream.map_or(true, |w| c.workstream == w))
        .collect();

    DashboardStats {
        total: scoped.len(),
        in_progress: count_status(scoped.iter().copied(), CapabilityStatus::InProgress),
        at_risk: count_status(scoped.iter().copied(), CapabilityStatus::AtRisk),
        overdue: scoped.iter().filter(|c| c.rag == Rag::Red).count(),
        completed: count_status(scoped.iter().copied(), CapabilityStatus::Completed),
    }
}

/// Every history entry of every plan, newest first
///
/// Entries with equal timestamps keep their collection order.
pub fn recent_activity(store: &Store) -> Vec<AnnotatedHistoryEntry> {
    let mut entries: Vec<AnnotatedHistoryEntry> = store
        .plans()
        .iter()
        .flat_map(|plan| {
            let plan_name = plan_display_name(store, plan);
            plan.history.iter().map(move |entry| AnnotatedHistoryEntry {
                plan_id: plan.id.clone(),
                plan_name: plan_name.clone(),
                entry: entry.clone(),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.entry.timestamp.cmp(&a.entry.timestamp));
    entries
}

/// Phases ending today or later, soonest first
///
/// Plans whose capability is gone and phases without an end date are
/// left out.
pub fn upcoming_deliveries(store: &Store, now: DateTime<Utc>) -> Vec<UpcomingDelivery> {
    let today = now.date_naive();
    let mut deliveries = Vec::new();

    for plan in store.plans() {
        let Some(capability) = store.get_capability(&plan.capability_id) else {
            continue;
        };
        for (phase, data) in plan.phases.iter() {
            let Some(due_date) = data.end_date else {
                continue;
            };
            if due_date < today {
                continue;
            }
            deliveries.push(UpcomingDelivery {
                id: format!("{}-{}", plan.id, phase),
                plan_id: plan.id.clone(),
                capability: capability.name.clone(),
                phase,
                due_date,
                assigned_to: data.assigned_to.clone().unwrap_or_default(),
            });
        }
    }

    deliveries.sort_by_key(|d| d.due_date);
    deliveries
}

/// Phases assigned to a user across plans with a live capability
pub fn assigned_phases(store: &Store, user_id: &str) -> Vec<AssignedPhase> {
    store
        .plans()
        .iter()
        .filter(|plan| store.get_capability(&plan.capability_id).is_some())
        .flat_map(|plan| {
            plan.phases
                .iter()
                .filter(|(_, data)| data.assigned_to.as_deref() == Some(user_id))
                .map(|(phase, data)| AssignedPhase {
                    plan_id: plan.id.clone(),
                    capability_id: plan.capability_id.clone(),
                    phase,
                    start_date: data.start_date,
                    end_date: data.end_date,
                    status: data.status,
                })
        })
        .collect()
}

pub fn unread_notifications(store: &Store) -> Vec<&Notification> {
    store.notifications().iter().filter(|n| !n.read).collect()
}

/// Number of capabilities holding a snapshot of this milestone
pub fn usage_count(store: &Store, milestone_id: &str) -> usize {
    store
        .capabilities()
        .iter()
        .filter(|c| c.references_milestone(milestone_id))
        .count()
}

pub fn milestones_by_type(store: &Store, milestone_type: MilestoneType) -> Vec<&Milestone> {
    store
        .milestones()
        .iter()
        .filter(|m| m.milestone_type == milestone_type)
        .collect()
}

/// Timeline rows for every plan whose capability still exists
pub fn gantt_rows(store: &Store) -> Vec<GanttRow> {
    store
        .plans()
        .iter()
        .filter_map(|plan| {
            let capability = store.get_capability(&plan.capability_id)?;
            Some(GanttRow {
                id: plan.id.clone(),
                capability: capability.name.clone(),
                phases: plan
                    .phases
                    .iter()
                    .map(|(phase, data)| GanttPhase {
                        phase,
                        start: data.start_date,
                        end: data.end_date,
                        progress: data.progress,
                        status: data.status,
                    })
                    .collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        NewCapability, NewMilestone, NewPlan, PhasePatch, PlanPhase, PlanPhases, PlanType,
    };
    use crate::ops::{capability_ops, milestone_ops, plan_ops};
    use chrono::TimeZone;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn capability(store: &mut Store, name: &str, workstream: &str, status: CapabilityStatus, rag: Rag) -> String {
        capability_ops::add_capability(
            store,
            NewCapability {
                name: name.to_string(),
                workstream: workstream.to_string(),
                status,
                rag,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_dashboard_stats_scoped_by_workstream() {
        let mut store = Store::new();
        capability(&mut store, "A", "Backend", CapabilityStatus::InProgress, Rag::Red);
        capability(&mut store, "B", "Backend", CapabilityStatus::AtRisk, Rag::Amber);
        capability(&mut store, "C", "Frontend", CapabilityStatus::Completed, Rag::Red);

        let all = dashboard_stats(&store, None);
        assert_eq!(all.total, 3);
        assert_eq!(all.overdue, 2);

        let backend = dashboard_stats(&store, Some("Backend"));
        assert_eq!(
            backend,
            DashboardStats {
                total: 2,
                in_progress: 1,
                at_risk: 1,
                overdue: 1,
                completed: 0,
            }
        );

        let stats = capabilities_stats(&store);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.at_risk, 1);
    }

    #[test]
    fn test_upcoming_deliveries_skip_past_and_orphaned() {
        let mut store = Store::new();
        let cap = capability(&mut store, "A", "Backend", CapabilityStatus::NotStarted, Rag::Blue);
        plan_ops::add_plan(
            &mut store,
            NewPlan {
                capability_id: cap,
                plan_type: PlanType::Implementation,
                phases: PlanPhases::default()
                    .with(PhaseName::Development, PlanPhase::scheduled(d(2025, 1, 1), d(2025, 2, 1)))
                    .with(PhaseName::Cst, PlanPhase::scheduled(d(2025, 2, 2), d(2025, 4, 1)))
                    .with(PhaseName::Uat, PlanPhase::scheduled(d(2025, 4, 2), d(2025, 3, 10))),
            },
        );
        plan_ops::add_plan(
            &mut store,
            NewPlan {
                capability_id: "gone".to_string(),
                plan_type: PlanType::Implementation,
                phases: PlanPhases::default()
                    .with(PhaseName::Uat, PlanPhase::scheduled(d(2025, 4, 2), d(2025, 5, 1))),
            },
        );

        let now = Utc.with_ymd_and_hms(2025, 3, 10, 15, 0, 0).unwrap();
        let deliveries = upcoming_deliveries(&store, now);

        let phases: Vec<_> = deliveries.iter().map(|d| d.phase).collect();
        assert_eq!(phases, vec![PhaseName::Uat, PhaseName::Cst]);
        assert_eq!(deliveries[0].assigned_to, "");
    }

    #[test]
    fn test_assigned_phases_and_gantt_rows() {
        let mut store = Store::new();
        let cap = capability(&mut store, "A", "Backend", CapabilityStatus::NotStarted, Rag::Blue);
        let plan_id = plan_ops::add_plan(
            &mut store,
            NewPlan {
                capability_id: cap,
                plan_type: PlanType::Implementation,
                phases: PlanPhases::default()
                    .with(PhaseName::Development, PlanPhase::scheduled(d(2025, 1, 1), d(2025, 2, 1))),
            },
        );
        plan_ops::update_plan_phase(
            &mut store,
            &plan_id,
            PhaseName::Development,
            PhasePatch {
                assigned_to: Some("u2".to_string()),
                progress: Some(40),
                ..Default::default()
            },
        )
        .unwrap();

        let assigned = assigned_phases(&store, "u2");
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].phase, PhaseName::Development);
        assert!(assigned_phases(&store, "u3").is_empty());

        let rows = gantt_rows(&store);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].capability, "A");
        assert_eq!(rows[0].phases[0].progress, 40);
    }

    #[test]
    fn test_usage_count_and_milestones_by_type() {
        let mut store = Store::new();
        let cap = capability(&mut store, "A", "Backend", CapabilityStatus::NotStarted, Rag::Blue);
        let m = milestone_ops::add_milestone(
            &mut store,
            NewMilestone {
                name: "API Complete".to_string(),
                date: d(2025, 2, 1),
                milestone_type: MilestoneType::Technical,
                description: String::new(),
                status: String::new(),
            },
        );
        capability_ops::assign_milestone(&mut store, &cap, &m).unwrap();

        assert_eq!(usage_count(&store, &m), 1);
        assert_eq!(usage_count(&store, "other"), 0);
        assert_eq!(milestones_by_type(&store, MilestoneType::Technical).len(), 1);
        assert!(milestones_by_type(&store, MilestoneType::Business).is_empty());
    }
}
