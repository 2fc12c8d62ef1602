//! CLI subcommands
//!
//! Each subcommand loads the workspace snapshot, runs one or more core
//! commands through `apply_with_outcome`, and saves the snapshot back when
//! something changed.

use std::path::{Path, PathBuf};

use captrack_core::errors::{ExError, ExErrorKind};
use captrack_core::{apply_with_outcome, Command, CommandOutcome, Store};
use captrack_store::{load_workspace, save_workspace};

use crate::settings::TrackerConfig;

pub mod capability;
pub mod dashboard;
pub mod export;
pub mod import;
pub mod init;
pub mod milestone;
pub mod notification;
pub mod plan;
pub mod seed;
pub mod timeline;
pub mod user;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Settings resolved from the config layers and the global flags
#[derive(Debug, Clone)]
pub struct Context {
    pub config: TrackerConfig,
    /// Explicit `--config` path, if any
    pub config_path: Option<PathBuf>,
    pub actor: Option<String>,
}

impl Context {
    pub fn data_file(&self) -> &Path {
        &self.config.data_file
    }

    /// Load the workspace snapshot, applying the `--actor` override
    pub fn open(&self) -> Result<Workspace, ExError> {
        let mut store = load_workspace(self.data_file()).map_err(|err| {
            if err.kind() == ExErrorKind::NotFound {
                ExError::new(ExErrorKind::NotFound)
                    .with_op("workspace_load")
                    .with_entity_id(self.data_file().display().to_string())
                    .with_message("No workspace found, run `captrack init` first")
            } else {
                err
            }
        })?;

        let persisted_user = self.actor.as_ref().map(|actor| {
            let persisted = store.current_user().to_string();
            store.set_current_user(actor.clone());
            persisted
        });

        Ok(Workspace {
            path: self.data_file().to_path_buf(),
            store,
            persisted_user,
        })
    }
}

/// A loaded workspace snapshot
pub struct Workspace {
    path: PathBuf,
    store: Store,
    /// Current user to write back when `--actor` overrode it
    persisted_user: Option<String>,
}

impl Workspace {
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Run one core command; on error the loaded state is kept as it was
    pub fn run(&mut self, cmd: Command) -> Result<CommandOutcome, ExError> {
        let (store, outcome) = apply_with_outcome(self.store.clone(), cmd)?;
        self.store = store;
        Ok(outcome)
    }

    /// Run a command that targets an existing entity
    ///
    /// The core treats a missing target as a no-op; the CLI reports it.
    pub fn run_on(&mut self, kind: &str, id: &str, cmd: Command) -> Result<(), ExError> {
        match self.run(cmd)? {
            CommandOutcome::Changed(false) | CommandOutcome::Revised(None) => {
                Err(not_found(kind, id))
            }
            _ => Ok(()),
        }
    }

    /// Make `user_id` the persisted current user, not just this run's actor
    pub fn persist_current_user(&mut self, user_id: &str) {
        self.persisted_user = None;
        self.store.set_current_user(user_id);
    }

    pub fn save(mut self) -> Result<(), ExError> {
        if let Some(user_id) = self.persisted_user.take() {
            self.store.set_current_user(user_id);
        }
        save_workspace(&self.path, &self.store)
    }
}

pub fn not_found(kind: &str, id: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_entity_id(id)
        .with_message(format!("{} not found", kind))
}

/// Id of the entity a `Created` outcome reports
pub fn created_id(outcome: CommandOutcome) -> Result<String, ExError> {
    match outcome {
        CommandOutcome::Created(id) => Ok(id),
        other => Err(ExError::new(ExErrorKind::Internal)
            .with_message(format!("Expected a created id, got {:?}", other))),
    }
}

/// Write `content` to `output`, or to stdout when no path is given
pub fn write_output(content: &str, output: Option<&Path>) -> CmdResult {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, content)?;
            println!("✓ Written to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
