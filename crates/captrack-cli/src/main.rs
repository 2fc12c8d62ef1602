//! CapTrack CLI
//!
//! Command-line interface for CapTrack. Every invocation loads the
//! workspace snapshot, runs one command and writes the snapshot back.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use captrack_core::logging_facility;

mod commands;
mod settings;

use commands::{CmdResult, Context};

#[derive(Debug, Parser)]
#[command(name = "captrack")]
#[command(about = "CapTrack - Capability and delivery plan tracking", long_about = None)]
struct Cli {
    /// Configuration file (default: ./captrack.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Workspace snapshot file, overriding the configured one
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Act as this user for this invocation only
    #[arg(long, global = true)]
    actor: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create an empty workspace
    Init(commands::init::InitArgs),
    /// Capability operations
    Capability(commands::capability::CapabilityArgs),
    /// Milestone operations
    Milestone(commands::milestone::MilestoneArgs),
    /// User operations
    User(commands::user::UserArgs),
    /// Plan operations
    Plan(commands::plan::PlanArgs),
    /// Import data files
    Import(commands::import::ImportArgs),
    /// Export data files
    Export(commands::export::ExportArgs),
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
    /// Show plans as a text Gantt chart
    Timeline(commands::timeline::TimelineArgs),
    /// Show summary counters and upcoming work
    Dashboard(commands::dashboard::DashboardArgs),
    /// Notification operations
    Notification(commands::notification::NotificationArgs),
}

fn run(cli: Cli) -> CmdResult {
    let mut config = settings::load(cli.config.as_deref())?;
    if let Some(data_file) = cli.data {
        config.data_file = data_file;
    }
    logging_facility::init(config.profile()?);
    tracing::debug!(data_file = %config.data_file.display(), "configuration loaded");

    let ctx = Context {
        config,
        config_path: cli.config,
        actor: cli.actor,
    };

    match cli.command {
        Commands::Init(args) => commands::init::execute(args, &ctx),
        Commands::Capability(args) => commands::capability::execute(args, &ctx),
        Commands::Milestone(args) => commands::milestone::execute(args, &ctx),
        Commands::User(args) => commands::user::execute(args, &ctx),
        Commands::Plan(args) => commands::plan::execute(args, &ctx),
        Commands::Import(args) => commands::import::execute(args, &ctx),
        Commands::Export(args) => commands::export::execute(args, &ctx),
        Commands::Seed(args) => commands::seed::execute(args, &ctx),
        Commands::Timeline(args) => commands::timeline::execute(args, &ctx),
        Commands::Dashboard(args) => commands::dashboard::execute(args, &ctx),
        Commands::Notification(args) => commands::notification::execute(args, &ctx),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
