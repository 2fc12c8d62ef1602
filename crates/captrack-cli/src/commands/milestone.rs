//! Milestone commands
//!
//! Usage: captrack milestone <add|update|delete|list|export>

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use captrack_core::model::{MilestonePatch, MilestoneType, NewMilestone};
use captrack_core::queries::{milestones_by_type, usage_count};
use captrack_core::Command;
use captrack_store::export_milestones;

use super::{created_id, write_output, CmdResult, Context};

#[derive(Debug, Args)]
pub struct MilestoneArgs {
    #[command(subcommand)]
    pub command: MilestoneCommand,
}

#[derive(Debug, Subcommand)]
pub enum MilestoneCommand {
    /// Add a milestone
    Add(AddArgs),
    /// Change fields of a milestone
    Update(UpdateArgs),
    /// Delete a milestone (capability snapshots are kept)
    Delete(DeleteArgs),
    /// List milestones with their usage count
    List(ListArgs),
    /// Export milestones as CSV
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    /// Target date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// technical or business
    #[arg(long = "type")]
    pub milestone_type: MilestoneType,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "")]
    pub status: String,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long = "type")]
    pub milestone_type: Option<MilestoneType>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only milestones of this type
    #[arg(long = "type")]
    pub milestone_type: Option<MilestoneType>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute milestone command
pub fn execute(args: MilestoneArgs, ctx: &Context) -> CmdResult {
    match args.command {
        MilestoneCommand::Add(add_args) => execute_add(add_args, ctx),
        MilestoneCommand::Update(update_args) => execute_update(update_args, ctx),
        MilestoneCommand::Delete(delete_args) => execute_delete(delete_args, ctx),
        MilestoneCommand::List(list_args) => execute_list(list_args, ctx),
        MilestoneCommand::Export(export_args) => execute_export(export_args, ctx),
    }
}

fn execute_add(args: AddArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    let outcome = workspace.run(Command::MilestoneAdd {
        draft: NewMilestone {
            name: args.name,
            date: args.date,
            milestone_type: args.milestone_type,
            description: args.description,
            status: args.status,
        },
    })?;
    let id = created_id(outcome)?;

    workspace.save()?;
    println!("✓ Added milestone {}", id);
    Ok(())
}

fn execute_update(args: UpdateArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    workspace.run_on(
        "Milestone",
        &args.id,
        Command::MilestoneUpdate {
            milestone_id: args.id.clone(),
            patch: MilestonePatch {
                name: args.name,
                date: args.date,
                milestone_type: args.milestone_type,
                description: args.description,
                status: args.status,
            },
        },
    )?;

    workspace.save()?;
    println!("✓ Updated milestone {}", args.id);
    Ok(())
}

fn execute_delete(args: DeleteArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    workspace.run_on(
        "Milestone",
        &args.id,
        Command::MilestoneDelete {
            milestone_id: args.id.clone(),
        },
    )?;

    workspace.save()?;
    println!("✓ Deleted milestone {}", args.id);
    Ok(())
}

fn execute_list(args: ListArgs, ctx: &Context) -> CmdResult {
    let workspace = ctx.open()?;
    let store = workspace.store();

    let milestones = match args.milestone_type {
        Some(milestone_type) => milestones_by_type(store, milestone_type),
        None => store.milestones().iter().collect(),
    };

    if milestones.is_empty() {
        println!("No milestones found");
        return Ok(());
    }
    for milestone in milestones {
        println!(
            "{}  {}  {}  {}  used by {}",
            milestone.id,
            milestone.date,
            milestone.milestone_type,
            milestone.name,
            usage_count(store, &milestone.id)
        );
    }
    Ok(())
}

pub(crate) fn execute_export(args: ExportArgs, ctx: &Context) -> CmdResult {
    let workspace = ctx.open()?;
    write_output(&export_milestones(workspace.store()), args.output.as_deref())
}
