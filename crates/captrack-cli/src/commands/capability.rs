//! Capability commands
//!
//! Usage: captrack capability <add|update|delete|list|show|stats|assign-milestone|clear-milestone>

use clap::{Args, Subcommand};

use captrack_core::model::{
    CapabilityPatch, CapabilityStatus, MilestoneType, NewCapability, Rag, WorkstreamLead,
};
use captrack_core::queries::capability_filter::workstreams;
use captrack_core::queries::{capabilities_stats, capability_plans, CapabilityFilter};
use captrack_core::Command;

use super::{created_id, not_found, CmdResult, Context};

#[derive(Debug, Args)]
pub struct CapabilityArgs {
    #[command(subcommand)]
    pub command: CapabilityCommand,
}

#[derive(Debug, Subcommand)]
pub enum CapabilityCommand {
    /// Add a capability
    Add(AddArgs),
    /// Change fields of a capability
    Update(UpdateArgs),
    /// Delete a capability
    Delete(IdArgs),
    /// List capabilities, optionally filtered
    List(ListArgs),
    /// Show one capability with its plans as JSON
    Show(IdArgs),
    /// Headline counts and the known workstreams
    Stats,
    /// Copy a milestone into the capability's matching slot
    AssignMilestone(AssignArgs),
    /// Empty the technical or business milestone slot
    ClearMilestone(ClearArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub workstream: String,

    /// Workstream lead name
    #[arg(long, default_value = "")]
    pub lead: String,

    #[arg(long, default_value = "")]
    pub sme: String,

    #[arg(long, default_value = "")]
    pub ba: String,

    /// e.g. "Not Started", "In Progress", "At Risk"
    #[arg(long, default_value_t = CapabilityStatus::default())]
    pub status: CapabilityStatus,

    #[arg(long, default_value_t = Rag::default())]
    pub rag: Rag,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub workstream: Option<String>,

    #[arg(long)]
    pub lead: Option<String>,

    #[arg(long)]
    pub sme: Option<String>,

    #[arg(long)]
    pub ba: Option<String>,

    #[arg(long)]
    pub status: Option<CapabilityStatus>,

    #[arg(long)]
    pub rag: Option<Rag>,

    #[arg(long, conflicts_with = "clear_notes")]
    pub notes: Option<String>,

    #[arg(long)]
    pub clear_notes: bool,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive match on name, workstream or lead
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub workstream: Option<String>,

    #[arg(long)]
    pub status: Option<CapabilityStatus>,

    #[arg(long)]
    pub rag: Option<Rag>,

    /// Print the matches as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct AssignArgs {
    pub id: String,
    pub milestone_id: String,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    pub id: String,

    /// technical or business
    #[arg(long = "type")]
    pub slot: MilestoneType,
}

/// Execute capability command
pub fn execute(args: CapabilityArgs, ctx: &Context) -> CmdResult {
    match args.command {
        CapabilityCommand::Add(add_args) => execute_add(add_args, ctx),
        CapabilityCommand::Update(update_args) => execute_update(update_args, ctx),
        CapabilityCommand::Delete(id_args) => execute_delete(id_args, ctx),
        CapabilityCommand::List(list_args) => execute_list(list_args, ctx),
        CapabilityCommand::Show(id_args) => execute_show(id_args, ctx),
        CapabilityCommand::Stats => execute_stats(ctx),
        CapabilityCommand::AssignMilestone(assign_args) => execute_assign(assign_args, ctx),
        CapabilityCommand::ClearMilestone(clear_args) => execute_clear(clear_args, ctx),
    }
}

fn execute_add(args: AddArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    let outcome = workspace.run(Command::CapabilityAdd {
        draft: NewCapability {
            name: args.name,
            workstream: args.workstream,
            workstream_lead: WorkstreamLead::named(args.lead),
            sme: args.sme,
            ba: args.ba,
            status: args.status,
            rag: args.rag,
            notes: args.notes,
            ..Default::default()
        },
    })?;
    let id = created_id(outcome)?;

    workspace.save()?;
    println!("✓ Added capability {}", id);
    Ok(())
}

fn execute_update(args: UpdateArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    let notes = if args.clear_notes {
        Some(None)
    } else {
        args.notes.map(Some)
    };
    let patch = CapabilityPatch {
        name: args.name,
        workstream: args.workstream,
        workstream_lead: args.lead.map(WorkstreamLead::named),
        sme: args.sme,
        ba: args.ba,
        status: args.status,
        rag: args.rag,
        notes,
        ..Default::default()
    };

    workspace.run_on(
        "Capability",
        &args.id,
        Command::CapabilityUpdate {
            capability_id: args.id.clone(),
            patch,
        },
    )?;

    workspace.save()?;
    println!("✓ Updated capability {}", args.id);
    Ok(())
}

fn execute_delete(args: IdArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    workspace.run_on(
        "Capability",
        &args.id,
        Command::CapabilityDelete {
            capability_id: args.id.clone(),
        },
    )?;

    workspace.save()?;
    println!("✓ Deleted capability {}", args.id);
    Ok(())
}

fn execute_list(args: ListArgs, ctx: &Context) -> CmdResult {
    let workspace = ctx.open()?;

    let filter = CapabilityFilter {
        search: args.search,
        workstream: args.workstream,
        status: args.status,
        rag: args.rag,
    };
    let matches = filter.apply(workspace.store());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No capabilities found");
        return Ok(());
    }
    for cap in matches {
        println!(
            "{}  {}  [{}]  {}  {}",
            cap.id, cap.name, cap.workstream, cap.status, cap.rag
        );
    }
    Ok(())
}

fn execute_show(args: IdArgs, ctx: &Context) -> CmdResult {
    let workspace = ctx.open()?;
    let store = workspace.store();

    let capability = store
        .get_capability(&args.id)
        .ok_or_else(|| not_found("Capability", &args.id))?;
    let plans = capability_plans(store, &args.id);

    let view = serde_json::json!({
        "capability": capability,
        "plans": plans,
    });
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn execute_stats(ctx: &Context) -> CmdResult {
    let workspace = ctx.open()?;
    let store = workspace.store();

    let stats = capabilities_stats(store);
    println!("Total:       {}", stats.total);
    println!("In progress: {}", stats.in_progress);
    println!("Completed:   {}", stats.completed);
    println!("At risk:     {}", stats.at_risk);

    let known = workstreams(store);
    if !known.is_empty() {
        println!("Workstreams: {}", known.join(", "));
    }
    Ok(())
}

fn execute_assign(args: AssignArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    workspace.run_on(
        "Capability",
        &args.id,
        Command::CapabilityAssignMilestone {
            capability_id: args.id.clone(),
            milestone_id: args.milestone_id.clone(),
        },
    )?;

    workspace.save()?;
    println!(
        "✓ Assigned milestone {} to capability {}",
        args.milestone_id, args.id
    );
    Ok(())
}

fn execute_clear(args: ClearArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    workspace.run_on(
        "Capability",
        &args.id,
        Command::CapabilityClearMilestone {
            capability_id: args.id.clone(),
            slot: args.slot,
        },
    )?;

    workspace.save()?;
    println!("✓ Cleared {} milestone of capability {}", args.slot, args.id);
    Ok(())
}
