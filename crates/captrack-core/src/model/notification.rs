use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::phase::PhaseName;
use crate::errors::TrackerError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    #[serde(default)]
    pub metadata: NotificationMetadata,
}

impl Notification {
    /// Stamp an unread notification from a draft
    pub fn from_new(id: String, draft: NewNotification, now: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            created_at: now,
            read: false,
            metadata: draft.metadata,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNotification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub metadata: NotificationMetadata,
}

/// Related entities of a notification
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<PhaseName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    PlanCreated,
    PlanUpdated,
    PlanApproved,
    PhaseStarted,
    PhaseCompleted,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 5] = [
        NotificationKind::PlanCreated,
        NotificationKind::PlanUpdated,
        NotificationKind::PlanApproved,
        NotificationKind::PhaseStarted,
        NotificationKind::PhaseCompleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::PlanCreated => "plan-created",
            NotificationKind::PlanUpdated => "plan-updated",
            NotificationKind::PlanApproved => "plan-approved",
            NotificationKind::PhaseStarted => "phase-started",
            NotificationKind::PhaseCompleted => "phase-completed",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TrackerError::InvalidEnumValue {
                field: "notification type".to_string(),
                value: s.to_string(),
            })
    }
}
