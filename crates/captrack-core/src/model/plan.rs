use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::history::{FieldChange, PlanHistoryEntry};
use super::phase::{PhaseName, PlanPhases};
use crate::errors::{Result, TrackerError};

/// Plan - a dated phase schedule for a capability
///
/// Several plans may exist per capability and type; the one with the
/// highest `version` is the latest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,

    /// Owning capability
    pub capability_id: String,

    #[serde(rename = "type")]
    pub plan_type: PlanType,

    /// Starts at 1, never decremented
    pub version: u32,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub status: PlanStatus,

    pub phases: PlanPhases,

    pub metadata: PlanMetadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval: Option<PlanApproval>,

    /// Append-only mutation log
    #[serde(default)]
    pub history: Vec<PlanHistoryEntry>,
}

impl Plan {
    /// Build a fresh version-1 draft plan
    pub fn from_new(id: String, draft: NewPlan, actor: &str, now: DateTime<Utc>) -> Self {
        Self {
            id,
            capability_id: draft.capability_id,
            plan_type: draft.plan_type,
            version: 1,
            created_at: now,
            updated_at: now,
            status: PlanStatus::Draft,
            phases: draft.phases,
            metadata: PlanMetadata {
                created_by: actor.to_string(),
                last_updated_by: actor.to_string(),
            },
            approval: None,
            history: Vec::new(),
        }
    }
}

/// Draft for a new plan
///
/// Identity, timestamps, version, status, metadata and history are stamped
/// by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlan {
    pub capability_id: String,
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    #[serde(default)]
    pub phases: PlanPhases,
}

/// Partial plan update
///
/// Every field set here is recorded as one history change, even when the
/// new value equals the old one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanPatch {
    pub capability_id: Option<String>,
    pub plan_type: Option<PlanType>,
    pub version: Option<u32>,
    pub status: Option<PlanStatus>,
    pub phases: Option<PlanPhases>,
    pub metadata: Option<PlanMetadata>,
    pub approval: Option<PlanApproval>,
}

impl PlanPatch {
    pub fn is_empty(&self) -> bool {
        self == &PlanPatch::default()
    }

    /// Whole-field changes this patch makes to `plan`, in field order
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if a value cannot be represented as JSON.
    pub fn changes_against(&self, plan: &Plan) -> Result<Vec<FieldChange>> {
        let mut changes = Vec::new();

        if let Some(capability_id) = &self.capability_id {
            changes.push(change("capabilityId", &plan.capability_id, capability_id)?);
        }
        if let Some(plan_type) = &self.plan_type {
            changes.push(change("type", &plan.plan_type, plan_type)?);
        }
        if let Some(version) = &self.version {
            changes.push(change("version", &plan.version, version)?);
        }
        if let Some(status) = &self.status {
            changes.push(change("status", &plan.status, status)?);
        }
        if let Some(phases) = &self.phases {
            changes.push(change("phases", &plan.phases, phases)?);
        }
        if let Some(metadata) = &self.metadata {
            changes.push(change("metadata", &plan.metadata, metadata)?);
        }
        if let Some(approval) = &self.approval {
            changes.push(change("approval", &plan.approval, approval)?);
        }

        Ok(changes)
    }

    /// Merge the patch into `plan` (no history, no timestamps)
    pub fn merge_into(self, plan: &mut Plan) {
        if let Some(capability_id) = self.capability_id {
            plan.capability_id = capability_id;
        }
        if let Some(plan_type) = self.plan_type {
            plan.plan_type = plan_type;
        }
        if let Some(version) = self.version {
            plan.version = version;
        }
        if let Some(status) = self.status {
            plan.status = status;
        }
        if let Some(phases) = self.phases {
            plan.phases = phases;
        }
        if let Some(metadata) = self.metadata {
            plan.metadata = metadata;
        }
        if let Some(approval) = self.approval {
            plan.approval = Some(approval);
        }
    }
}

fn change<O: Serialize + ?Sized, N: Serialize + ?Sized>(
    field: &str,
    old: &O,
    new: &N,
) -> Result<FieldChange> {
    Ok(FieldChange::new(
        field,
        serde_json::to_value(old)?,
        serde_json::to_value(new)?,
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    /// Target schedule
    Aspirational,
    /// Actual schedule
    Implementation,
}

impl PlanType {
    /// Phases a complete plan of this type must schedule, in order
    pub fn required_phases(&self) -> &'static [PhaseName] {
        match self {
            PlanType::Aspirational => &PhaseName::ALL,
            PlanType::Implementation => &[PhaseName::Development, PhaseName::Cst, PhaseName::Uat],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Aspirational => "aspirational",
            PlanType::Implementation => "implementation",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanType {
    type Err = TrackerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aspirational" => Ok(PlanType::Aspirational),
            "implementation" => Ok(PlanType::Implementation),
            _ => Err(TrackerError::InvalidEnumValue {
                field: "plan type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    #[default]
    Draft,
    Active,
    Completed,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Draft => "draft",
            PlanStatus::Active => "active",
            PlanStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanStatus {
    type Err = TrackerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(PlanStatus::Draft),
            "active" => Ok(PlanStatus::Active),
            "completed" => Ok(PlanStatus::Completed),
            _ => Err(TrackerError::InvalidEnumValue {
                field: "plan status".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    pub created_by: String,
    pub last_updated_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanApproval {
    pub approved_by: String,
    pub approved_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}
