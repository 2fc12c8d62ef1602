//! User commands
//!
//! Usage: captrack user <add|list|switch>

use clap::{Args, Subcommand};

use captrack_core::model::{NewUser, UserRole};
use captrack_core::Command;

use super::{created_id, not_found, CmdResult, Context};

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Add a user
    Add(AddArgs),
    /// List users, marking the current one
    List,
    /// Make a user the persisted current user
    Switch(SwitchArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// admin, manager or user
    #[arg(long, default_value_t = UserRole::default())]
    pub role: UserRole,

    #[arg(long)]
    pub avatar: Option<String>,
}

#[derive(Debug, Args)]
pub struct SwitchArgs {
    pub id: String,
}

/// Execute user command
pub fn execute(args: UserArgs, ctx: &Context) -> CmdResult {
    match args.command {
        UserCommand::Add(add_args) => execute_add(add_args, ctx),
        UserCommand::List => execute_list(ctx),
        UserCommand::Switch(switch_args) => execute_switch(switch_args, ctx),
    }
}

fn execute_add(args: AddArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    let outcome = workspace.run(Command::UserAdd {
        draft: NewUser {
            name: args.name,
            email: args.email,
            role: args.role,
            avatar: args.avatar,
        },
    })?;
    let id = created_id(outcome)?;

    workspace.save()?;
    println!("✓ Added user {}", id);
    Ok(())
}

fn execute_list(ctx: &Context) -> CmdResult {
    let workspace = ctx.open()?;
    let store = workspace.store();

    if store.users().is_empty() {
        println!("No users found");
        return Ok(());
    }
    for user in store.users() {
        let marker = if user.id == store.current_user() { "*" } else { " " };
        println!(
            "{} {}  {}  <{}>  {}",
            marker, user.id, user.name, user.email, user.role
        );
    }
    Ok(())
}

fn execute_switch(args: SwitchArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    if workspace.store().get_user(&args.id).is_none() {
        return Err(not_found("User", &args.id).into());
    }
    workspace.run(Command::SetCurrentUser {
        user_id: args.id.clone(),
    })?;
    workspace.persist_current_user(&args.id);

    workspace.save()?;
    println!("✓ Current user is now {}", args.id);
    Ok(())
}
