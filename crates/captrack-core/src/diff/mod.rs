//! Plan comparison
//!
//! Diffs the phase data of two plans into added, removed and changed lists
//! and renders a reviewer-facing summary.
//!
//! ```ignore
//! use captrack_core::diff::{compare_plans, render_comparison_summary};
//!
//! let comparison = compare_plans(&store, &v1_id, &v2_id);
//! let text = render_comparison_summary(v1, v2, &comparison);
//! ```
//!
//! Only `startDate`, `endDate` and `status` are compared per phase.
//! Progress, notes and assignee never count as a change.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{compare_phases, compare_plans};
pub use human_summary::render_comparison_summary;
pub use model::{PhaseField, PlanComparison};
