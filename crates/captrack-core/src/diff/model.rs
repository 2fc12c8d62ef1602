//! Comparison output types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::PhaseName;

/// Phase attributes that take part in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhaseField {
    StartDate,
    EndDate,
    Status,
}

impl PhaseField {
    pub const ALL: [PhaseField; 3] = [PhaseField::StartDate, PhaseField::EndDate, PhaseField::Status];

    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseField::StartDate => "startDate",
            PhaseField::EndDate => "endDate",
            PhaseField::Status => "status",
        }
    }
}

impl fmt::Display for PhaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of comparing plan 1 against plan 2
///
/// `added` and `removed` hold phase names; `changed` holds
/// `<phase>.<field>` paths. Lists follow delivery order, and within a
/// phase the field order of `PhaseField::ALL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanComparison {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub changed: Vec<String>,
}

impl PlanComparison {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    pub(crate) fn push_changed(&mut self, phase: PhaseName, field: PhaseField) {
        self.changed.push(format!("{}.{}", phase, field));
    }
}
