//! Plan commands
//!
//! Usage: captrack plan <add|save|update-phase|approve|status|revise|delete|
//! list|latest|history|compare|export>
//!
//! Phases are passed as `--phase <name>=<start>..<end>`, for example
//! `--phase development=2025-03-01..2025-04-15`.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use captrack_core::diff::{compare_plans, render_comparison_summary};
use captrack_core::model::{
    NewPlan, PhaseName, PhasePatch, PhaseStatus, PlanPhase, PlanPhases, PlanStatus, PlanType,
};
use captrack_core::queries::{
    capability_plans, latest_plan, plan_history, recent_activity, AnnotatedHistoryEntry,
};
use captrack_core::rules::{PlanDraft, SaveOutcome};
use captrack_core::{Command, CommandOutcome};
use captrack_store::{export_plans, ExportFormat};

use super::{created_id, not_found, write_output, CmdResult, Context};

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(subcommand)]
    pub command: PlanCommand,
}

#[derive(Debug, Subcommand)]
pub enum PlanCommand {
    /// Add a version-1 draft plan without validation
    Add(AddArgs),
    /// Validate phases, then update the latest plan of the type or add one
    Save(SaveArgs),
    /// Change one phase of a plan
    UpdatePhase(UpdatePhaseArgs),
    /// Approve a plan as the current user
    Approve(ApproveArgs),
    /// Set a plan's status
    Status(StatusArgs),
    /// Copy a plan into the next draft version
    Revise(PlanIdArgs),
    /// Delete a plan
    Delete(PlanIdArgs),
    /// List plans
    List(ListArgs),
    /// Show the latest plan of a type for a capability
    Latest(LatestArgs),
    /// Show plan history, or recent activity across all plans
    History(HistoryArgs),
    /// Compare the phases of two plans
    Compare(CompareArgs),
    /// Export the latest plans of every capability
    Export(ExportArgs),
}

/// `<phase>=<start>..<end>` phase schedule argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSpec {
    pub name: PhaseName,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FromStr for PhaseSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, range) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <phase>=<start>..<end>, got '{}'", s))?;
        let (start, end) = range
            .split_once("..")
            .ok_or_else(|| format!("expected <start>..<end>, got '{}'", range))?;

        let name = name.parse::<PhaseName>().map_err(|e| e.to_string())?;
        let parse_date = |value: &str| {
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map_err(|e| format!("invalid date '{}': {}", value, e))
        };

        Ok(Self {
            name,
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }
}

fn phases_from(specs: Vec<PhaseSpec>) -> PlanPhases {
    specs.into_iter().fold(PlanPhases::default(), |phases, spec| {
        phases.with(spec.name, PlanPhase::scheduled(spec.start, spec.end))
    })
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub capability_id: String,

    /// aspirational or implementation
    #[arg(long = "type")]
    pub plan_type: PlanType,

    #[arg(long = "phase")]
    pub phases: Vec<PhaseSpec>,
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    pub capability_id: String,

    #[arg(long = "type")]
    pub plan_type: PlanType,

    #[arg(long, default_value_t = PlanStatus::default())]
    pub status: PlanStatus,

    #[arg(long = "phase")]
    pub phases: Vec<PhaseSpec>,
}

#[derive(Debug, Args)]
pub struct UpdatePhaseArgs {
    pub plan_id: String,

    pub phase: PhaseName,

    #[arg(long)]
    pub start: Option<NaiveDate>,

    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// not-started, in-progress, completed or delayed
    #[arg(long)]
    pub status: Option<PhaseStatus>,

    /// 0 to 100
    #[arg(long)]
    pub progress: Option<u8>,

    #[arg(long)]
    pub notes: Option<String>,

    /// User id to assign the phase to
    #[arg(long)]
    pub assign: Option<String>,
}

#[derive(Debug, Args)]
pub struct ApproveArgs {
    pub plan_id: String,

    #[arg(long)]
    pub comments: Option<String>,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    pub plan_id: String,

    /// draft, active or completed
    pub status: PlanStatus,
}

#[derive(Debug, Args)]
pub struct PlanIdArgs {
    pub plan_id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub capability: Option<String>,

    #[arg(long = "type")]
    pub plan_type: Option<PlanType>,
}

#[derive(Debug, Args)]
pub struct LatestArgs {
    pub capability_id: String,

    #[arg(long = "type")]
    pub plan_type: PlanType,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Plan to show; all plans when omitted
    pub plan_id: Option<String>,

    /// Show at most this many entries
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    pub plan_id_1: String,
    pub plan_id_2: String,

    /// Print the raw comparison as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// json or csv
    #[arg(long, default_value_t = ExportFormat::default())]
    pub format: ExportFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute plan command
pub fn execute(args: PlanArgs, ctx: &Context) -> CmdResult {
    match args.command {
        PlanCommand::Add(add_args) => execute_add(add_args, ctx),
        PlanCommand::Save(save_args) => execute_save(save_args, ctx),
        PlanCommand::UpdatePhase(phase_args) => execute_update_phase(phase_args, ctx),
        PlanCommand::Approve(approve_args) => execute_approve(approve_args, ctx),
        PlanCommand::Status(status_args) => execute_status(status_args, ctx),
        PlanCommand::Revise(id_args) => execute_revise(id_args, ctx),
        PlanCommand::Delete(id_args) => execute_delete(id_args, ctx),
        PlanCommand::List(list_args) => execute_list(list_args, ctx),
        PlanCommand::Latest(latest_args) => execute_latest(latest_args, ctx),
        PlanCommand::History(history_args) => execute_history(history_args, ctx),
        PlanCommand::Compare(compare_args) => execute_compare(compare_args, ctx),
        PlanCommand::Export(export_args) => execute_export(export_args, ctx),
    }
}

fn execute_add(args: AddArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    if workspace.store().get_capability(&args.capability_id).is_none() {
        return Err(not_found("Capability", &args.capability_id).into());
    }

    let outcome = workspace.run(Command::PlanAdd {
        draft: NewPlan {
            capability_id: args.capability_id,
            plan_type: args.plan_type,
            phases: phases_from(args.phases),
        },
    })?;
    let id = created_id(outcome)?;

    workspace.save()?;
    println!("✓ Added plan {}", id);
    Ok(())
}

fn execute_save(args: SaveArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    if workspace.store().get_capability(&args.capability_id).is_none() {
        return Err(not_found("Capability", &args.capability_id).into());
    }

    let outcome = workspace.run(Command::PlanSaveDraft {
        draft: PlanDraft {
            capability_id: args.capability_id,
            plan_type: args.plan_type,
            status: args.status,
            phases: phases_from(args.phases),
        },
    })?;

    workspace.save()?;
    match outcome {
        CommandOutcome::Saved(SaveOutcome::Created(id)) => println!("✓ Created plan {}", id),
        CommandOutcome::Saved(SaveOutcome::Updated(id)) => println!("✓ Updated plan {}", id),
        other => tracing::warn!(outcome = ?other, "unexpected save outcome"),
    }
    Ok(())
}

fn execute_update_phase(args: UpdatePhaseArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    workspace.run_on(
        "Plan",
        &args.plan_id,
        Command::PlanUpdatePhase {
            plan_id: args.plan_id.clone(),
            phase: args.phase,
            patch: PhasePatch {
                start_date: args.start,
                end_date: args.end,
                status: args.status,
                progress: args.progress,
                notes: args.notes,
                assigned_to: args.assign,
            },
        },
    )?;

    workspace.save()?;
    println!("✓ Updated {} phase of plan {}", args.phase, args.plan_id);
    Ok(())
}

fn execute_approve(args: ApproveArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;
    let approver_id = workspace.store().current_user().to_string();

    workspace.run_on(
        "Plan",
        &args.plan_id,
        Command::PlanApprove {
            plan_id: args.plan_id.clone(),
            approver_id: approver_id.clone(),
            comments: args.comments,
        },
    )?;

    workspace.save()?;
    println!("✓ Approved plan {} as user {}", args.plan_id, approver_id);
    Ok(())
}

fn execute_status(args: StatusArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    workspace.run_on(
        "Plan",
        &args.plan_id,
        Command::PlanSetStatus {
            plan_id: args.plan_id.clone(),
            status: args.status,
        },
    )?;

    workspace.save()?;
    println!("✓ Plan {} is now {}", args.plan_id, args.status);
    Ok(())
}

fn execute_revise(args: PlanIdArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    let outcome = workspace.run(Command::PlanRevise {
        plan_id: args.plan_id.clone(),
    })?;
    let CommandOutcome::Revised(Some(new_id)) = outcome else {
        return Err(not_found("Plan", &args.plan_id).into());
    };
    let version = workspace
        .store()
        .get_plan(&new_id)
        .map(|plan| plan.version)
        .unwrap_or_default();

    workspace.save()?;
    println!("✓ Revised plan {} into {} (v{})", args.plan_id, new_id, version);
    Ok(())
}

fn execute_delete(args: PlanIdArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    workspace.run_on(
        "Plan",
        &args.plan_id,
        Command::PlanDelete {
            plan_id: args.plan_id.clone(),
        },
    )?;

    workspace.save()?;
    println!("✓ Deleted plan {}", args.plan_id);
    Ok(())
}

fn execute_list(args: ListArgs, ctx: &Context) -> CmdResult {
    let workspace = ctx.open()?;
    let store = workspace.store();

    let plans: Vec<_> = match &args.capability {
        Some(capability_id) => capability_plans(store, capability_id),
        None => store.plans().iter().collect(),
    };
    let plans: Vec<_> = plans
        .into_iter()
        .filter(|plan| args.plan_type.map_or(true, |t| plan.plan_type == t))
        .collect();

    if plans.is_empty() {
        println!("No plans found");
        return Ok(());
    }
    for plan in plans {
        let capability = store
            .get_capability(&plan.capability_id)
            .map_or(plan.capability_id.as_str(), |c| c.name.as_str());
        println!(
            "{}  {}  {} v{}  {}",
            plan.id, capability, plan.plan_type, plan.version, plan.status
        );
    }
    Ok(())
}

fn execute_latest(args: LatestArgs, ctx: &Context) -> CmdResult {
    let workspace = ctx.open()?;

    let plan = latest_plan(workspace.store(), &args.capability_id, args.plan_type).ok_or_else(
        || {
            not_found(
                &format!("{} plan", args.plan_type),
                &args.capability_id,
            )
        },
    )?;

    println!("{}", serde_json::to_string_pretty(plan)?);
    Ok(())
}

fn print_history(entries: &[AnnotatedHistoryEntry]) {
    for annotated in entries {
        let entry = &annotated.entry;
        let fields: Vec<&str> = entry.changes.iter().map(|c| c.field.as_str()).collect();
        println!(
            "{}  {}  {} ({})  by {}  [{}]",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.action,
            annotated.plan_name,
            annotated.plan_id,
            entry.user_id,
            fields.join(", ")
        );
    }
}

fn execute_history(args: HistoryArgs, ctx: &Context) -> CmdResult {
    let workspace = ctx.open()?;
    let store = workspace.store();

    let mut entries = match &args.plan_id {
        Some(plan_id) => {
            if store.get_plan(plan_id).is_none() {
                return Err(not_found("Plan", plan_id).into());
            }
            plan_history(store, plan_id)
        }
        None => recent_activity(store),
    };
    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }

    if entries.is_empty() {
        println!("No history recorded");
    } else {
        print_history(&entries);
    }
    Ok(())
}

fn execute_compare(args: CompareArgs, ctx: &Context) -> CmdResult {
    let workspace = ctx.open()?;
    let store = workspace.store();

    let plan1 = store
        .get_plan(&args.plan_id_1)
        .ok_or_else(|| not_found("Plan", &args.plan_id_1))?;
    let plan2 = store
        .get_plan(&args.plan_id_2)
        .ok_or_else(|| not_found("Plan", &args.plan_id_2))?;

    let comparison = compare_plans(store, &plan1.id, &plan2.id);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        print!("{}", render_comparison_summary(plan1, plan2, &comparison));
    }
    Ok(())
}

pub(crate) fn execute_export(args: ExportArgs, ctx: &Context) -> CmdResult {
    let workspace = ctx.open()?;
    let content = export_plans(workspace.store(), args.format)?;
    write_output(&content, args.output.as_deref())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_spec_parses() {
        let spec: PhaseSpec = "development=2025-03-01..2025-04-15".parse().unwrap();

        assert_eq!(spec.name, PhaseName::Development);
        assert_eq!(spec.start, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(spec.end, NaiveDate::from_ymd_opt(2025, 4, 15).unwrap());
    }

    #[test]
    fn test_phase_spec_rejects_missing_range() {
        assert!("uat=2025-03-01".parse::<PhaseSpec>().is_err());
        assert!("2025-03-01..2025-04-15".parse::<PhaseSpec>().is_err());
        assert!("launch=2025-03-01..2025-04-15".parse::<PhaseSpec>().is_err());
    }

    #[test]
    fn test_phases_from_keeps_unlisted_phases_empty() {
        let phases = phases_from(vec!["cst=2025-05-01..2025-05-20".parse().unwrap()]);

        assert!(phases.get(PhaseName::Cst).is_some());
        assert!(phases.get(PhaseName::Uat).is_none());
    }
}
