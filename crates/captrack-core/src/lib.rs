//! CapTrack Core - in-memory capability and delivery-plan tracker
//!
//! This crate holds the domain model and everything that operates on it:
//! - Capabilities, milestones, versioned plans, users and notifications
//! - The `Store` state container and the `ops::*` mutation functions
//! - The `apply()` command boundary with lifecycle logging
//! - Read-only queries and dashboard selectors
//! - Plan comparison and plan draft validation
//! - Timeline (Gantt) layout
//!
//! Persistence and file formats live in `captrack-store`.

pub mod apply;
pub mod commands;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod queries;
pub mod rules;
pub mod timeline;

pub use apply::{apply, apply_with_outcome, CommandOutcome};
pub use commands::Command;
pub use errors::{ExError, ExErrorKind, FieldViolation, Result, TrackerError};
pub use ops::Store;
