//! Seed Format v0 schema
//!
//! Defines the YAML structure for seeding a workspace. Seed IDs become the
//! entity IDs in the store so that references stay stable.

use captrack_core::model::{
    CapabilityStatus, MilestoneType, PlanPhases, PlanType, Rag, UserRole, WorkstreamLead,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Top-level seed file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Acting user to switch to after import
    #[serde(default)]
    pub current_user: Option<String>,

    #[serde(default)]
    pub users: Vec<SeedUser>,

    #[serde(default)]
    pub milestones: Vec<SeedMilestone>,

    #[serde(default)]
    pub capabilities: Vec<SeedCapability>,

    /// Plans are created as version-1 drafts owned by a seeded capability
    #[serde(default)]
    pub plans: Vec<SeedPlan>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedMilestone {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub milestone_type: MilestoneType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCapability {
    pub id: String,
    pub name: String,
    pub workstream: String,

    /// Lead name, or a map with `name` and optional `avatar`
    #[serde(default, deserialize_with = "deserialize_lead")]
    pub lead: WorkstreamLead,

    #[serde(default)]
    pub sme: String,
    #[serde(default)]
    pub ba: String,
    #[serde(default)]
    pub status: CapabilityStatus,
    #[serde(default)]
    pub rag: Rag,

    /// Seed ID of a technical milestone
    #[serde(default)]
    pub technical_milestone: Option<String>,

    /// Seed ID of a business milestone
    #[serde(default)]
    pub business_milestone: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPlan {
    /// Seed ID of the owning capability
    pub capability: String,
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    #[serde(default)]
    pub phases: PlanPhases,
}

/// Accept either a bare lead name or a `{name, avatar}` map
fn deserialize_lead<'de, D>(deserializer: D) -> Result<WorkstreamLead, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct LeadVisitor;

    impl<'de> Visitor<'de> for LeadVisitor {
        type Value = WorkstreamLead;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a lead name or a map with a 'name' field")
        }

        fn visit_str<E>(self, value: &str) -> Result<WorkstreamLead, E>
        where
            E: de::Error,
        {
            Ok(WorkstreamLead::named(value))
        }

        fn visit_map<M>(self, mut map: M) -> Result<WorkstreamLead, M::Error>
        where
            M: de::MapAccess<'de>,
        {
            let mut name = None;
            let mut avatar = None;
            while let Some(key) = map.next_key::<String>()? {
                match key.as_str() {
                    "name" => name = Some(map.next_value()?),
                    "avatar" => avatar = map.next_value()?,
                    _ => {
                        map.next_value::<de::IgnoredAny>()?;
                    }
                }
            }
            let name = name.ok_or_else(|| de::Error::missing_field("name"))?;
            Ok(WorkstreamLead { name, avatar })
        }
    }

    deserializer.deserialize_any(LeadVisitor)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_seed() {
        let yaml = r#"
schema_version: 0
capabilities:
  - id: cap-portal
    name: Customer Portal
    workstream: Frontend Development
"#;

        let seed: SeedV0 = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(seed.schema_version, 0);
        assert!(seed.users.is_empty());
        assert_eq!(seed.capabilities.len(), 1);
        assert_eq!(seed.capabilities[0].status, CapabilityStatus::NotStarted);
        assert_eq!(seed.capabilities[0].rag, Rag::Blue);
        assert_eq!(seed.capabilities[0].lead, WorkstreamLead::default());
    }

    #[test]
    fn test_lead_string_format() {
        let yaml = r#"
schema_version: 0
capabilities:
  - id: cap-1
    name: X
    workstream: W
    lead: Sarah Chen
    status: In Progress
    rag: Amber
"#;

        let seed: SeedV0 = serde_yaml::from_str(yaml).unwrap();
        let cap = &seed.capabilities[0];
        assert_eq!(cap.lead, WorkstreamLead::named("Sarah Chen"));
        assert_eq!(cap.status, CapabilityStatus::InProgress);
        assert_eq!(cap.rag, Rag::Amber);
    }

    #[test]
    fn test_lead_map_format() {
        let yaml = r#"
schema_version: 0
capabilities:
  - id: cap-1
    name: X
    workstream: W
    lead:
      name: Mike Johnson
      avatar: mj.png
"#;

        let seed: SeedV0 = serde_yaml::from_str(yaml).unwrap();
        let lead = &seed.capabilities[0].lead;
        assert_eq!(lead.name, "Mike Johnson");
        assert_eq!(lead.avatar.as_deref(), Some("mj.png"));
    }

    #[test]
    fn test_plan_phases_use_camel_case_dates() {
        let yaml = r#"
schema_version: 0
plans:
  - capability: cap-1
    type: implementation
    phases:
      development:
        startDate: 2025-01-01
        endDate: 2025-01-28
        status: in-progress
        progress: 40
"#;

        let seed: SeedV0 = serde_yaml::from_str(yaml).unwrap();
        let dev = seed.plans[0]
            .phases
            .get(captrack_core::model::PhaseName::Development)
            .unwrap();
        assert_eq!(dev.progress, 40);
        assert_eq!(dev.start_date, NaiveDate::from_ymd_opt(2025, 1, 1));
    }
}
