use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::milestone::MilestoneRef;
use crate::errors::TrackerError;

/// Capability - a trackable unit of project work
///
/// Milestone slots hold [`MilestoneRef`] snapshots taken when the milestone
/// was assigned. They are not updated when the source milestone changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    /// Unique identifier (UUID v4)
    pub id: String,

    pub name: String,

    /// Workstream name (free text, e.g. "Backend Services")
    pub workstream: String,

    pub workstream_lead: WorkstreamLead,

    /// Subject matter expert
    pub sme: String,

    /// Business analyst
    pub ba: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_milestone: Option<MilestoneRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_milestone: Option<MilestoneRef>,

    pub status: CapabilityStatus,

    pub rag: Rag,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Capability {
    /// Build a capability from a draft, assigning the given ID
    pub fn from_new(id: String, draft: NewCapability) -> Self {
        Self {
            id,
            name: draft.name,
            workstream: draft.workstream,
            workstream_lead: draft.workstream_lead,
            sme: draft.sme,
            ba: draft.ba,
            technical_milestone: draft.technical_milestone,
            business_milestone: draft.business_milestone,
            status: draft.status,
            rag: draft.rag,
            notes: draft.notes,
        }
    }

    /// Merge every field present in the patch into this capability
    pub fn apply_patch(&mut self, patch: CapabilityPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(workstream) = patch.workstream {
            self.workstream = workstream;
        }
        if let Some(lead) = patch.workstream_lead {
            self.workstream_lead = lead;
        }
        if let Some(sme) = patch.sme {
            self.sme = sme;
        }
        if let Some(ba) = patch.ba {
            self.ba = ba;
        }
        if let Some(milestone) = patch.technical_milestone {
            self.technical_milestone = milestone;
        }
        if let Some(milestone) = patch.business_milestone {
            self.business_milestone = milestone;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(rag) = patch.rag {
            self.rag = rag;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }

    /// Check whether either milestone slot references the given milestone
    pub fn references_milestone(&self, milestone_id: &str) -> bool {
        self.technical_milestone
            .as_ref()
            .is_some_and(|m| m.id == milestone_id)
            || self
                .business_milestone
                .as_ref()
                .is_some_and(|m| m.id == milestone_id)
    }
}

/// Workstream lead (name plus optional avatar reference)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkstreamLead {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl WorkstreamLead {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
        }
    }
}

/// Draft for a new capability (everything but the ID)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCapability {
    pub name: String,
    pub workstream: String,
    #[serde(default)]
    pub workstream_lead: WorkstreamLead,
    #[serde(default)]
    pub sme: String,
    #[serde(default)]
    pub ba: String,
    #[serde(default)]
    pub technical_milestone: Option<MilestoneRef>,
    #[serde(default)]
    pub business_milestone: Option<MilestoneRef>,
    #[serde(default)]
    pub status: CapabilityStatus,
    #[serde(default)]
    pub rag: Rag,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial capability update
///
/// `None` leaves a field untouched. Optional fields use a nested `Option`
/// so a patch can clear them (`Some(None)`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CapabilityPatch {
    pub name: Option<String>,
    pub workstream: Option<String>,
    pub workstream_lead: Option<WorkstreamLead>,
    pub sme: Option<String>,
    pub ba: Option<String>,
    pub technical_milestone: Option<Option<MilestoneRef>>,
    pub business_milestone: Option<Option<MilestoneRef>>,
    pub status: Option<CapabilityStatus>,
    pub rag: Option<Rag>,
    pub notes: Option<Option<String>>,
}

/// Delivery status of a capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CapabilityStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "At Risk")]
    AtRisk,
    #[serde(rename = "On Track")]
    OnTrack,
    #[serde(rename = "Completed")]
    Completed,
}

impl CapabilityStatus {
    pub const ALL: [CapabilityStatus; 5] = [
        CapabilityStatus::NotStarted,
        CapabilityStatus::InProgress,
        CapabilityStatus::AtRisk,
        CapabilityStatus::OnTrack,
        CapabilityStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityStatus::NotStarted => "Not Started",
            CapabilityStatus::InProgress => "In Progress",
            CapabilityStatus::AtRisk => "At Risk",
            CapabilityStatus::OnTrack => "On Track",
            CapabilityStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for CapabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CapabilityStatus {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TrackerError::InvalidEnumValue {
                field: "status".to_string(),
                value: s.to_string(),
            })
    }
}

/// Red/Amber/Green/Blue health indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rag {
    Red,
    Amber,
    Green,
    #[default]
    Blue,
}

impl Rag {
    pub const ALL: [Rag; 4] = [Rag::Red, Rag::Amber, Rag::Green, Rag::Blue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rag::Red => "Red",
            Rag::Amber => "Amber",
            Rag::Green => "Green",
            Rag::Blue => "Blue",
        }
    }
}

impl fmt::Display for Rag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rag {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rag| rag.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TrackerError::InvalidEnumValue {
                field: "rag".to_string(),
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Capability {
        Capability::from_new(
            "cap-1".to_string(),
            NewCapability {
                name: "Customer Portal".to_string(),
                workstream: "Frontend Development".to_string(),
                workstream_lead: WorkstreamLead::named("Sarah Chen"),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_defaults_are_not_started_and_blue() {
        let cap = sample();
        assert_eq!(cap.status, CapabilityStatus::NotStarted);
        assert_eq!(cap.rag, Rag::Blue);
        assert!(cap.technical_milestone.is_none());
    }

    #[test]
    fn test_apply_patch_only_touches_present_fields() {
        let mut cap = sample();
        cap.apply_patch(CapabilityPatch {
            rag: Some(Rag::Red),
            notes: Some(Some("slipping".to_string())),
            ..Default::default()
        });

        assert_eq!(cap.rag, Rag::Red);
        assert_eq!(cap.notes.as_deref(), Some("slipping"));
        assert_eq!(cap.name, "Customer Portal");
        assert_eq!(cap.status, CapabilityStatus::NotStarted);
    }

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!(
            "in progress".parse::<CapabilityStatus>().unwrap(),
            CapabilityStatus::InProgress
        );
        assert!("Sideways".parse::<CapabilityStatus>().is_err());
        assert_eq!("amber".parse::<Rag>().unwrap(), Rag::Amber);
    }

    #[test]
    fn test_serializes_with_original_labels() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["status"], "Not Started");
        assert_eq!(json["workstreamLead"]["name"], "Sarah Chen");
        assert!(json.get("technicalMilestone").is_none());
    }
}
