//! Import command
//!
//! Usage: captrack import capabilities <CSV>

use std::path::PathBuf;

use clap::{Args, Subcommand};

use captrack_store::import_capabilities;

use super::{CmdResult, Context};

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[command(subcommand)]
    pub command: ImportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ImportCommand {
    /// Import capabilities from a CSV file
    Capabilities(CapabilitiesArgs),
}

#[derive(Debug, Args)]
pub struct CapabilitiesArgs {
    /// CSV file with at least the Name, Workstream, Lead, SME, BA, Status and RAG columns
    pub path: PathBuf,
}

/// Execute import command
pub fn execute(args: ImportArgs, ctx: &Context) -> CmdResult {
    match args.command {
        ImportCommand::Capabilities(csv_args) => execute_capabilities(csv_args, ctx),
    }
}

fn execute_capabilities(args: CapabilitiesArgs, ctx: &Context) -> CmdResult {
    let text = std::fs::read_to_string(&args.path)?;
    let mut workspace = ctx.open()?;

    let report = import_capabilities(workspace.store_mut(), &text)?;

    workspace.save()?;
    println!(
        "✓ Imported {} capabilities ({} rows skipped)",
        report.imported, report.skipped
    );
    Ok(())
}
