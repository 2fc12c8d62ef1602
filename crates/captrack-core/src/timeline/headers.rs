use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::window::TimelineWindow;
use crate::errors::TrackerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Weekly,
    #[default]
    Monthly,
    Quarterly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
            Granularity::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" | "weeks" | "week" => Ok(Granularity::Weekly),
            "monthly" | "months" | "month" => Ok(Granularity::Monthly),
            "quarterly" | "quarters" | "quarter" => Ok(Granularity::Quarterly),
            _ => Err(TrackerError::InvalidEnumValue {
                field: "granularity".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// One timeline column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineHeader {
    pub label: String,
    /// Year of the column's first day
    pub sublabel: String,
    pub is_current: bool,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

fn next_month(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

fn column(label: String, start: NaiveDate, end: NaiveDate, current: NaiveDate) -> TimelineHeader {
    TimelineHeader {
        label,
        sublabel: start.year().to_string(),
        is_current: start <= current && current <= end,
        start,
        end,
    }
}

fn weekly(window: &TimelineWindow) -> Vec<TimelineHeader> {
    let offset = i64::from(window.start.weekday().num_days_from_sunday());
    let mut week_start = window.start - Duration::days(offset);
    let mut out = Vec::new();

    while week_start <= window.end {
        let week_end = week_start + Duration::days(6);
        let label = format!("{} - {}", week_start.format("%b %-d"), week_end.format("%b %-d"));
        out.push(column(label, week_start, week_end, window.current));
        week_start += Duration::days(7);
    }
    out
}

fn stepped(
    window: &TimelineWindow,
    first: NaiveDate,
    step_months: u32,
    label: impl Fn(NaiveDate) -> String,
) -> Vec<TimelineHeader> {
    let mut out = Vec::new();
    let mut period_start = first;

    while period_start <= window.end {
        let Some(next) = next_month(period_start, step_months) else {
            break;
        };
        let period_end = next - Duration::days(1);
        out.push(column(label(period_start), period_start, period_end, window.current));
        period_start = next;
    }
    out
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn first_of_quarter(date: NaiveDate) -> NaiveDate {
    let month = (date.month0() / 3) * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
}

fn quarter_label(quarter_start: NaiveDate) -> String {
    let months: Vec<String> = (0..3)
        .filter_map(|i| next_month(quarter_start, i))
        .map(|d| d.format("%b").to_string())
        .collect();
    format!("Q{} ({})", quarter_start.month0() / 3 + 1, months.join("-"))
}

/// Columns covering the whole window at the given granularity
///
/// Weeks start on Sunday; months and quarters on their first day. The
/// first column may begin before `window.start`.
pub fn headers(window: &TimelineWindow, granularity: Granularity) -> Vec<TimelineHeader> {
    match granularity {
        Granularity::Weekly => weekly(window),
        Granularity::Monthly => stepped(window, first_of_month(window.start), 1, |d| {
            d.format("%B").to_string()
        }),
        Granularity::Quarterly => {
            stepped(window, first_of_quarter(window.start), 3, quarter_label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn window(start: NaiveDate, end: NaiveDate, current: NaiveDate) -> TimelineWindow {
        TimelineWindow { start, end, current }
    }

    #[test]
    fn test_weekly_headers_align_to_sunday() {
        // 2025-01-08 is a Wednesday
        let w = window(d(2025, 1, 8), d(2025, 1, 20), d(2025, 1, 14));
        let cols = headers(&w, Granularity::Weekly);

        let labels: Vec<_> = cols.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan 5 - Jan 11", "Jan 12 - Jan 18", "Jan 19 - Jan 25"]);
        assert_eq!(cols[0].sublabel, "2025");
        assert!(cols[1].is_current);
        assert!(!cols[0].is_current);
    }

    #[test]
    fn test_monthly_headers() {
        let w = window(d(2024, 11, 20), d(2025, 1, 3), d(2024, 12, 25));
        let cols = headers(&w, Granularity::Monthly);

        let labels: Vec<_> = cols.iter().map(|h| (h.label.as_str(), h.sublabel.as_str())).collect();
        assert_eq!(
            labels,
            vec![("November", "2024"), ("December", "2024"), ("January", "2025")]
        );
        assert!(cols[1].is_current);
        assert_eq!(cols[0].end, d(2024, 11, 30));
    }

    #[test]
    fn test_quarterly_headers() {
        let w = window(d(2025, 2, 10), d(2025, 7, 1), d(2025, 5, 1));
        let cols = headers(&w, Granularity::Quarterly);

        let labels: Vec<_> = cols.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Q1 (Jan-Feb-Mar)", "Q2 (Apr-May-Jun)", "Q3 (Jul-Aug-Sep)"]
        );
        assert!(cols[1].is_current);
        assert_eq!(cols[0].start, d(2025, 1, 1));
    }

    #[test]
    fn test_granularity_parses_view_names() {
        assert_eq!("weeks".parse::<Granularity>().unwrap(), Granularity::Weekly);
        assert_eq!("Quarterly".parse::<Granularity>().unwrap(), Granularity::Quarterly);
        assert!("daily".parse::<Granularity>().is_err());
    }
}
