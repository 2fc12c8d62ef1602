//! Export command
//!
//! Usage: captrack export <capabilities|milestones|plans> [--output <FILE>]

use std::path::PathBuf;

use clap::{Args, Subcommand};

use captrack_store::export_capabilities;

use super::{milestone, plan, write_output, CmdResult, Context};

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(subcommand)]
    pub command: ExportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ExportCommand {
    /// Export capabilities as CSV
    Capabilities(CapabilitiesArgs),
    /// Export milestones as CSV
    Milestones(milestone::ExportArgs),
    /// Export the latest plans as JSON or CSV
    Plans(plan::ExportArgs),
}

#[derive(Debug, Args)]
pub struct CapabilitiesArgs {
    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute export command
pub fn execute(args: ExportArgs, ctx: &Context) -> CmdResult {
    match args.command {
        ExportCommand::Capabilities(csv_args) => {
            let workspace = ctx.open()?;
            write_output(
                &export_capabilities(workspace.store()),
                csv_args.output.as_deref(),
            )
        }
        ExportCommand::Milestones(export_args) => milestone::execute_export(export_args, ctx),
        ExportCommand::Plans(export_args) => plan::execute_export(export_args, ctx),
    }
}
