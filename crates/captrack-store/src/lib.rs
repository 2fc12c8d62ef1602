//! CapTrack Store - interchange and workspace persistence
//!
//! Provides:
//! - Capability CSV import/export
//! - Milestone CSV export
//! - Plan export as JSON or CSV
//! - Seed Format v0 parser and importer
//! - JSON workspace snapshot files

pub mod capability_csv;
pub mod csv_codec;
pub mod errors;
pub mod milestone_csv;
pub mod plan_export;
pub mod seed;
pub mod workspace;

// Re-export key types
pub use capability_csv::{export_capabilities, import_capabilities, ImportReport};
pub use errors::Result;
pub use milestone_csv::export_milestones;
pub use plan_export::{export_plans, ExportFormat};
pub use workspace::{load_workspace, save_workspace};
