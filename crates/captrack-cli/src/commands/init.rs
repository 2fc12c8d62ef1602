//! Init command
//!
//! Usage: captrack init [--force] [--write-config]

use clap::Args;

use captrack_core::Store;
use captrack_store::save_workspace;

use crate::settings::DEFAULT_CONFIG_FILE;

use super::{CmdResult, Context};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Replace an existing workspace with an empty one
    #[arg(long)]
    pub force: bool,

    /// Also write the effective configuration to the config file
    #[arg(long)]
    pub write_config: bool,
}

/// Execute init command
pub fn execute(args: InitArgs, ctx: &Context) -> CmdResult {
    let data_file = ctx.data_file();
    if data_file.exists() && !args.force {
        return Err(format!(
            "Workspace already exists at {} (use --force to replace it)",
            data_file.display()
        )
        .into());
    }

    let acting_user = ctx
        .actor
        .clone()
        .unwrap_or_else(|| ctx.config.current_user.clone());
    save_workspace(data_file, &Store::with_current_user(acting_user))?;
    println!("✓ Initialized workspace at {}", data_file.display());

    if args.write_config {
        let config_path = ctx
            .config_path
            .clone()
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.into());
        std::fs::write(&config_path, ctx.config.to_toml()?)?;
        println!("✓ Wrote configuration to {}", config_path.display());
    }

    Ok(())
}
