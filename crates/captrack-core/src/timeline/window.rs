use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::Serialize;

use crate::model::{Plan, PlanPhase};

pub const DEFAULT_PADDING_MONTHS: u32 = 6;

/// Narrowest bar drawn, in percent of the window
pub const MIN_BAR_WIDTH: f64 = 5.0;

/// The date span a timeline is drawn over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Today's date, used to highlight the current header
    pub current: NaiveDate,
}

fn shift_months(date: NaiveDate, months: u32, forward: bool) -> NaiveDate {
    let shifted = if forward {
        date.checked_add_months(Months::new(months))
    } else {
        date.checked_sub_months(Months::new(months))
    };
    shifted.unwrap_or_else(|| {
        tracing::debug!(
            date = %date,
            padding_months = months,
            forward,
            "timeline padding dropped at date range limit"
        );
        date
    })
}

impl TimelineWindow {
    /// Window spanning every fully dated phase of `plans`, padded on both
    /// sides
    ///
    /// Phases with a missing start or end date are ignored. With no dated
    /// phases the window is centred on `now`.
    pub fn from_plans<'a>(
        plans: impl IntoIterator<Item = &'a Plan>,
        now: DateTime<Utc>,
        padding_months: u32,
    ) -> Self {
        let current = now.date_naive();
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;

        for plan in plans {
            for (_, phase) in plan.phases.iter() {
                let Some((start, end)) = phase.date_range() else {
                    continue;
                };
                let (lo, hi) = (start.min(end), start.max(end));
                bounds = Some(match bounds {
                    Some((min, max)) => (min.min(lo), max.max(hi)),
                    None => (lo, hi),
                });
            }
        }

        let (min, max) = bounds.unwrap_or((current, current));
        Self {
            start: shift_months(min, padding_months, false),
            end: shift_months(max, padding_months, true),
            current,
        }
    }

    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Offset of `date` within the window, in percent
///
/// Not clamped: dates before the window are negative, dates after it
/// exceed 100. A zero-length window yields 0.
pub fn position(window: &TimelineWindow, date: NaiveDate) -> f64 {
    let total = window.total_days();
    if total == 0 {
        return 0.0;
    }
    (date - window.start).num_days() as f64 / total as f64 * 100.0
}

/// Horizontal placement of one phase bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBar {
    pub left: f64,
    /// Display width, never below `MIN_BAR_WIDTH`
    pub width: f64,
    /// Exact span of the phase
    pub raw_width: f64,
}

/// Bar for a phase, or `None` when a date is missing or the range is
/// inverted
pub fn phase_bar(window: &TimelineWindow, phase: &PlanPhase) -> Option<TimelineBar> {
    let (start, end) = phase.date_range()?;
    if end < start {
        return None;
    }
    let left = position(window, start);
    let raw_width = position(window, end) - left;
    Some(TimelineBar {
        left,
        width: raw_width.max(MIN_BAR_WIDTH),
        raw_width,
    })
}
