use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TrackerError;

/// The fixed set of delivery phases, in delivery order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseName {
    Requirements,
    Design,
    Development,
    Cst,
    Uat,
}

impl PhaseName {
    pub const ALL: [PhaseName; 5] = [
        PhaseName::Requirements,
        PhaseName::Design,
        PhaseName::Development,
        PhaseName::Cst,
        PhaseName::Uat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseName::Requirements => "requirements",
            PhaseName::Design => "design",
            PhaseName::Development => "development",
            PhaseName::Cst => "cst",
            PhaseName::Uat => "uat",
        }
    }

    /// Short label used on timeline bars
    pub fn short_label(&self) -> &'static str {
        match self {
            PhaseName::Requirements => "REQ",
            PhaseName::Design => "DES",
            PhaseName::Development => "DEV",
            PhaseName::Cst => "CST",
            PhaseName::Uat => "UAT",
        }
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhaseName {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TrackerError::InvalidEnumValue {
                field: "phase".to_string(),
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Delayed,
}

impl PhaseStatus {
    pub const ALL: [PhaseStatus; 4] = [
        PhaseStatus::NotStarted,
        PhaseStatus::InProgress,
        PhaseStatus::Completed,
        PhaseStatus::Delayed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseStatus::NotStarted => "not-started",
            PhaseStatus::InProgress => "in-progress",
            PhaseStatus::Completed => "completed",
            PhaseStatus::Delayed => "delayed",
        }
    }
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhaseStatus {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TrackerError::InvalidEnumValue {
                field: "phase status".to_string(),
                value: s.to_string(),
            })
    }
}

/// One stage of a plan's schedule
///
/// Dates are optional because drafts are built up incrementally; plan draft
/// validation requires them for every required phase.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPhase {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: PhaseStatus,
    /// Percentage complete, 0 to 100
    #[serde(default)]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// User ID of the assignee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

impl PlanPhase {
    /// A not-started phase spanning the given dates
    pub fn scheduled(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        }
    }

    /// Both dates, when both are set
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start_date?, self.end_date?))
    }

    pub fn apply_patch(&mut self, patch: PhasePatch) {
        if let Some(start) = patch.start_date {
            self.start_date = Some(start);
        }
        if let Some(end) = patch.end_date {
            self.end_date = Some(end);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(progress) = patch.progress {
            self.progress = progress;
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        if let Some(assignee) = patch.assigned_to {
            self.assigned_to = Some(assignee);
        }
    }
}

/// Partial phase update
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhasePatch {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<PhaseStatus>,
    pub progress: Option<u8>,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
}

/// Phase slots of a plan
///
/// Aspirational plans use all five slots, implementation plans use
/// development, cst and uat. Any slot may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanPhases {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<PlanPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<PlanPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development: Option<PlanPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cst: Option<PlanPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uat: Option<PlanPhase>,
}

impl PlanPhases {
    fn slot(&self, name: PhaseName) -> &Option<PlanPhase> {
        match name {
            PhaseName::Requirements => &self.requirements,
            PhaseName::Design => &self.design,
            PhaseName::Development => &self.development,
            PhaseName::Cst => &self.cst,
            PhaseName::Uat => &self.uat,
        }
    }

    fn slot_mut(&mut self, name: PhaseName) -> &mut Option<PlanPhase> {
        match name {
            PhaseName::Requirements => &mut self.requirements,
            PhaseName::Design => &mut self.design,
            PhaseName::Development => &mut self.development,
            PhaseName::Cst => &mut self.cst,
            PhaseName::Uat => &mut self.uat,
        }
    }

    pub fn get(&self, name: PhaseName) -> Option<&PlanPhase> {
        self.slot(name).as_ref()
    }

    pub fn get_mut(&mut self, name: PhaseName) -> Option<&mut PlanPhase> {
        self.slot_mut(name).as_mut()
    }

    /// Set a phase slot, returning the previous occupant
    pub fn set(&mut self, name: PhaseName, phase: PlanPhase) -> Option<PlanPhase> {
        self.slot_mut(name).replace(phase)
    }

    /// Builder-style `set`
    pub fn with(mut self, name: PhaseName, phase: PlanPhase) -> Self {
        self.set(name, phase);
        self
    }

    /// Present phases in delivery order
    pub fn iter(&self) -> impl Iterator<Item = (PhaseName, &PlanPhase)> + '_ {
        PhaseName::ALL
            .into_iter()
            .filter_map(move |name| self.get(name).map(|phase| (name, phase)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_iter_follows_delivery_order() {
        let phases = PlanPhases::default()
            .with(PhaseName::Uat, PlanPhase::scheduled(d(2025, 5, 1), d(2025, 5, 30)))
            .with(
                PhaseName::Requirements,
                PlanPhase::scheduled(d(2025, 1, 1), d(2025, 1, 10)),
            );

        let names: Vec<_> = phases.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec![PhaseName::Requirements, PhaseName::Uat]);
    }

    #[test]
    fn test_phase_status_serializes_kebab_case() {
        let json = serde_json::to_string(&PhaseStatus::NotStarted).unwrap();
        assert_eq!(json, "\"not-started\"");
    }

    #[test]
    fn test_phase_serializes_camel_case_dates() {
        let phase = PlanPhase::scheduled(d(2025, 1, 1), d(2025, 1, 10));
        let json = serde_json::to_value(&phase).unwrap();
        assert_eq!(json["startDate"], "2025-01-01");
        assert_eq!(json["endDate"], "2025-01-10");
        assert_eq!(json["progress"], 0);
    }

    #[test]
    fn test_apply_patch_keeps_unpatched_fields() {
        let mut phase = PlanPhase::scheduled(d(2025, 1, 1), d(2025, 1, 10));
        phase.apply_patch(PhasePatch {
            progress: Some(50),
            ..Default::default()
        });

        assert_eq!(phase.progress, 50);
        assert_eq!(phase.start_date, Some(d(2025, 1, 1)));
        assert_eq!(phase.status, PhaseStatus::NotStarted);
    }
}
