//! Dashboard command
//!
//! Usage: captrack dashboard [--workstream <NAME>] [--limit <N>]

use chrono::Utc;
use clap::Args;

use captrack_core::queries::{
    assigned_phases, dashboard_stats, recent_activity, unread_notifications, upcoming_deliveries,
};

use super::{CmdResult, Context};

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Restrict the counters to one workstream
    #[arg(long)]
    pub workstream: Option<String>,

    /// Rows shown per list
    #[arg(long, default_value_t = 5)]
    pub limit: usize,
}

/// Execute dashboard command
pub fn execute(args: DashboardArgs, ctx: &Context) -> CmdResult {
    let workspace = ctx.open()?;
    let store = workspace.store();

    let stats = dashboard_stats(store, args.workstream.as_deref());
    match &args.workstream {
        Some(workstream) => println!("Capabilities in {}", workstream),
        None => println!("Capabilities"),
    }
    println!("  Total:       {}", stats.total);
    println!("  In progress: {}", stats.in_progress);
    println!("  At risk:     {}", stats.at_risk);
    println!("  Overdue:     {}", stats.overdue);
    println!("  Completed:   {}", stats.completed);

    println!();
    println!("Upcoming deliveries");
    let deliveries = upcoming_deliveries(store, Utc::now());
    if deliveries.is_empty() {
        println!("  none");
    }
    for delivery in deliveries.iter().take(args.limit) {
        println!(
            "  {}  {}  {}  ({})",
            delivery.due_date, delivery.capability, delivery.phase, delivery.assigned_to
        );
    }

    println!();
    println!("Recent activity");
    let activity = recent_activity(store);
    if activity.is_empty() {
        println!("  none");
    }
    for annotated in activity.iter().take(args.limit) {
        println!(
            "  {}  {}  {}  by {}",
            annotated.entry.timestamp.format("%Y-%m-%d %H:%M"),
            annotated.entry.action,
            annotated.plan_name,
            annotated.entry.user_id
        );
    }

    let user_id = store.current_user();
    let assigned = assigned_phases(store, user_id);
    println!();
    println!("Assigned to {} ({} phases)", user_id, assigned.len());
    for phase in assigned.iter().take(args.limit) {
        let due = phase
            .end_date
            .map_or_else(|| "no end date".to_string(), |d| d.to_string());
        println!(
            "  {}  {}  {}  {}",
            phase.capability_id, phase.phase, phase.status, due
        );
    }

    println!();
    println!("Unread notifications: {}", unread_notifications(store).len());
    Ok(())
}
