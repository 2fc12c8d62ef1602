use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TrackerError;

/// Milestone - a named target date independent of any single capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub milestone_type: MilestoneType,
    pub description: String,
    pub status: String,
}

impl Milestone {
    pub fn from_new(id: String, draft: NewMilestone) -> Self {
        Self {
            id,
            name: draft.name,
            date: draft.date,
            milestone_type: draft.milestone_type,
            description: draft.description,
            status: draft.status,
        }
    }

    pub fn apply_patch(&mut self, patch: MilestonePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(milestone_type) = patch.milestone_type {
            self.milestone_type = milestone_type;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Snapshot of a milestone copied onto a capability at assignment time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneRef {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
}

impl From<&Milestone> for MilestoneRef {
    fn from(milestone: &Milestone) -> Self {
        Self {
            id: milestone.id.clone(),
            name: milestone.name.clone(),
            date: milestone.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMilestone {
    pub name: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub milestone_type: MilestoneType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MilestonePatch {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub milestone_type: Option<MilestoneType>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneType {
    Technical,
    Business,
}

impl MilestoneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneType::Technical => "technical",
            MilestoneType::Business => "business",
        }
    }
}

impl fmt::Display for MilestoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MilestoneType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "technical" => Ok(MilestoneType::Technical),
            "business" => Ok(MilestoneType::Business),
            _ => Err(TrackerError::InvalidEnumValue {
                field: "milestone type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_is_a_copy() {
        let mut milestone = Milestone::from_new(
            "m-1".to_string(),
            NewMilestone {
                name: "API Development Complete".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 2, 15).unwrap(),
                milestone_type: MilestoneType::Technical,
                description: String::new(),
                status: "In Progress".to_string(),
            },
        );
        let snapshot = MilestoneRef::from(&milestone);

        milestone.apply_patch(MilestonePatch {
            name: Some("Renamed".to_string()),
            ..Default::default()
        });

        assert_eq!(snapshot.name, "API Development Complete");
        assert_eq!(milestone.name, "Renamed");
    }

    #[test]
    fn test_type_serializes_lowercase() {
        let json = serde_json::to_string(&MilestoneType::Business).unwrap();
        assert_eq!(json, "\"business\"");
        assert_eq!(
            "Technical".parse::<MilestoneType>().unwrap(),
            MilestoneType::Technical
        );
    }
}
