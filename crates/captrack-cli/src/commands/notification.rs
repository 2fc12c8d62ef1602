//! Notification commands
//!
//! Usage: captrack notification <add|list|read|read-all>

use clap::{Args, Subcommand};

use captrack_core::model::{NewNotification, NotificationKind, NotificationMetadata, PhaseName};
use captrack_core::queries::unread_notifications;
use captrack_core::{Command, CommandOutcome};

use super::{created_id, CmdResult, Context};

#[derive(Debug, Args)]
pub struct NotificationArgs {
    #[command(subcommand)]
    pub command: NotificationCommand,
}

#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// Add a notification
    Add(AddArgs),
    /// List notifications, newest first
    List(ListArgs),
    /// Mark one notification as read
    Read(ReadArgs),
    /// Mark every notification as read
    ReadAll,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// plan-created, plan-updated, plan-approved, phase-started or phase-completed
    #[arg(long = "type")]
    pub kind: NotificationKind,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub message: String,

    #[arg(long)]
    pub plan: Option<String>,

    #[arg(long)]
    pub capability: Option<String>,

    #[arg(long)]
    pub phase: Option<PhaseName>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only unread notifications
    #[arg(long)]
    pub unread: bool,
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    pub id: String,
}

/// Execute notification command
pub fn execute(args: NotificationArgs, ctx: &Context) -> CmdResult {
    match args.command {
        NotificationCommand::Add(add_args) => execute_add(add_args, ctx),
        NotificationCommand::List(list_args) => execute_list(list_args, ctx),
        NotificationCommand::Read(read_args) => execute_read(read_args, ctx),
        NotificationCommand::ReadAll => execute_read_all(ctx),
    }
}

fn execute_add(args: AddArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    let outcome = workspace.run(Command::NotificationAdd {
        draft: NewNotification {
            kind: args.kind,
            title: args.title,
            message: args.message,
            metadata: NotificationMetadata {
                plan_id: args.plan,
                capability_id: args.capability,
                phase: args.phase,
            },
        },
    })?;
    let id = created_id(outcome)?;

    workspace.save()?;
    println!("✓ Added notification {}", id);
    Ok(())
}

fn execute_list(args: ListArgs, ctx: &Context) -> CmdResult {
    let workspace = ctx.open()?;
    let store = workspace.store();

    let notifications = if args.unread {
        unread_notifications(store)
    } else {
        store.notifications().iter().collect()
    };

    if notifications.is_empty() {
        println!("No notifications");
        return Ok(());
    }
    for notification in notifications {
        let marker = if notification.read { " " } else { "•" };
        println!(
            "{} {}  {}  {}  {}: {}",
            marker,
            notification.id,
            notification.created_at.format("%Y-%m-%d %H:%M"),
            notification.kind,
            notification.title,
            notification.message
        );
    }
    Ok(())
}

fn execute_read(args: ReadArgs, ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    workspace.run_on(
        "Notification",
        &args.id,
        Command::NotificationMarkRead {
            notification_id: args.id.clone(),
        },
    )?;

    workspace.save()?;
    println!("✓ Marked notification {} as read", args.id);
    Ok(())
}

fn execute_read_all(ctx: &Context) -> CmdResult {
    let mut workspace = ctx.open()?;

    let marked = match workspace.run(Command::NotificationMarkAllRead)? {
        CommandOutcome::MarkedRead(count) => count,
        _ => 0,
    };

    workspace.save()?;
    println!("✓ Marked {} notifications as read", marked);
    Ok(())
}
