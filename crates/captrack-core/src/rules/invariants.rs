//! Individual phase schedule checks
//!
//! Each `find_*` function reports every violation of one rule for the
//! phases a plan type requires. Violation keys follow `<phase><Check>`.

use crate::errors::FieldViolation;
use crate::model::{PhaseName, PlanPhases};

/// Required phases lacking a start or end date
pub fn find_missing_dates(required: &[PhaseName], phases: &PlanPhases) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    for &phase in required {
        let data = phases.get(phase);
        if data.and_then(|p| p.start_date).is_none() {
            violations.push(FieldViolation::new(
                format!("{}Start", phase),
                format!("{} start date is required", phase),
            ));
        }
        if data.and_then(|p| p.end_date).is_none() {
            violations.push(FieldViolation::new(
                format!("{}End", phase),
                format!("{} end date is required", phase),
            ));
        }
    }
    violations
}

/// Required phases whose start falls after their end
pub fn find_inverted_ranges(required: &[PhaseName], phases: &PlanPhases) -> Vec<FieldViolation> {
    required
        .iter()
        .filter_map(|&phase| {
            let (start, end) = phases.get(phase)?.date_range()?;
            (start > end).then(|| {
                FieldViolation::new(
                    format!("{}Dates", phase),
                    format!("{} end date must be after start date", phase),
                )
            })
        })
        .collect()
}

/// Adjacent required phases that overlap
///
/// A phase may start on the day its predecessor ends. Pairs with either
/// date unset are not checked.
pub fn find_sequence_breaks(required: &[PhaseName], phases: &PlanPhases) -> Vec<FieldViolation> {
    required
        .windows(2)
        .filter_map(|pair| {
            let (previous, current) = (pair[0], pair[1]);
            let previous_end = phases.get(previous)?.end_date?;
            let current_start = phases.get(current)?.start_date?;
            (current_start < previous_end).then(|| {
                FieldViolation::new(
                    format!("{}Sequence", current),
                    format!("{} must start after {} ends", current, previous),
                )
            })
        })
        .collect()
}
