//! Seed import command
//!
//! Usage: captrack seed import <PATH>

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use captrack_store::seed::import_seed;

use super::{CmdResult, Context};

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file into the workspace
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to seed YAML file or directory
    pub path: PathBuf,
}

/// Execute seed command
pub fn execute(args: SeedArgs, ctx: &Context) -> CmdResult {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(import_args, ctx),
    }
}

fn seed_files(path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    // Sorted for determinism
    let mut files: Vec<PathBuf> = std::fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext == "yaml" || ext == "yml")
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Execute seed import
///
/// A directory is imported file by file; the workspace is saved only when
/// every file went in.
fn execute_import(args: ImportArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    for seed_file in seed_files(&args.path)? {
        println!("Importing {}...", seed_file.display());
        let summary = import_seed(&seed_file, workspace.store_mut())?;
        println!(
            "✓ Imported {} capabilities, {} milestones, {} users, {} plans (digest: {})",
            summary.capabilities,
            summary.milestones,
            summary.users,
            summary.plan_ids.len(),
            summary.digest
        );
    }

    workspace.save()?;
    Ok(())
}
