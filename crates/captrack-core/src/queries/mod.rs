//! Read-only views over a `Store`
//!
//! Queries never mutate. Results borrow from the store where possible and
//! are ordered deterministically (collection order unless stated).

pub mod capability_filter;
pub mod plan_queries;
pub mod selectors;

pub use capability_filter::CapabilityFilter;
pub use plan_queries::{capability_plans, latest_plan, plan_history, AnnotatedHistoryEntry};
pub use selectors::{
    assigned_phases, capabilities_stats, dashboard_stats, gantt_rows, milestones_by_type,
    recent_activity, unread_notifications, upcoming_deliveries, usage_count, AssignedPhase,
    CapabilityStats, DashboardStats, GanttPhase, GanttRow, UpcomingDelivery,
};
