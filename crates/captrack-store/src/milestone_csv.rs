//! Milestone CSV export

use captrack_core::ops::Store;
use captrack_core::queries::selectors::usage_count;

use crate::csv_codec::{escape, quote};

pub const EXPORT_HEADER: &str = "Milestone Name,Target Date,Type,Description,Status,Usage Count";

/// Render every milestone as CSV text, header first
///
/// The description is always quoted; other values are quoted only when
/// they contain a separator. Usage count is computed at export time.
pub fn export_milestones(store: &Store) -> String {
    let mut lines = vec![EXPORT_HEADER.to_string()];
    lines.extend(store.milestones().iter().map(|m| {
        format!(
            "{},{},{},{},{},{}",
            escape(&m.name),
            m.date,
            m.milestone_type,
            quote(&m.description),
            escape(&m.status),
            usage_count(store, &m.id)
        )
    }));
    lines.join("\n")
}
