//! Seed importer orchestration
//!
//! Validates a seed against the target store, then applies it through the
//! core ops on a staged copy. The caller's store is replaced only when the
//! whole seed went in.

#![allow(clippy::result_large_err)]

use std::path::Path;
use std::time::Instant;

use captrack_core::model::{
    Capability, Milestone, MilestoneRef, NewCapability, NewMilestone, NewPlan, NewUser, User,
};
use captrack_core::ops::{plan_ops, Store};
use captrack_core::{log_op_end, log_op_error, log_op_start};

use crate::errors::{seed_validation, Result};
use crate::seed::format_v0::SeedV0;
use crate::seed::{compute_seed_digest, parse_seed_str_with_store};

const OP_SEED_IMPORT: &str = "seed_import";

/// What a seed import added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedImport {
    /// SHA256 of the canonical seed
    pub digest: String,
    pub users: usize,
    pub milestones: usize,
    pub capabilities: usize,
    /// IDs of the plans created, in seed order
    pub plan_ids: Vec<String>,
}

/// Import a seed file into `store`
///
/// Returns the import summary including the seed digest.
///
/// # Errors
///
/// Returns `InvalidInput` if the file cannot be read or the seed fails
/// validation; `store` is untouched in both cases.
pub fn import_seed(path: &Path, store: &mut Store) -> Result<SeedImport> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| seed_validation(format!("Failed to read seed file: {}", e)))?;
    import_seed_str(&content, store)
}

/// Import seed YAML text into `store`
///
/// # Errors
///
/// Returns `InvalidInput` if the seed fails validation; `store` is untouched.
pub fn import_seed_str(content: &str, store: &mut Store) -> Result<SeedImport> {
    log_op_start!(OP_SEED_IMPORT);
    let start = Instant::now();

    let result = parse_seed_str_with_store(content, Some(&*store)).and_then(|seed| {
        let digest = compute_seed_digest(&seed)?;
        Ok(apply_seed(seed, digest, store))
    });

    match result {
        Ok(summary) => {
            log_op_end!(
                OP_SEED_IMPORT,
                duration_ms = start.elapsed().as_millis() as u64,
                digest = %summary.digest,
                capabilities = summary.capabilities
            );
            Ok(summary)
        }
        Err(err) => {
            log_op_error!(
                OP_SEED_IMPORT,
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

/// Apply an already validated seed
fn apply_seed(seed: SeedV0, digest: String, store: &mut Store) -> SeedImport {
    let mut staged = store.clone();

    for user in &seed.users {
        staged.insert_user(User::from_new(
            user.id.clone(),
            NewUser {
                name: user.name.clone(),
                email: user.email.clone(),
                role: user.role,
                avatar: user.avatar.clone(),
            },
        ));
    }

    for milestone in &seed.milestones {
        staged.insert_milestone(Milestone::from_new(
            milestone.id.clone(),
            NewMilestone {
                name: milestone.name.clone(),
                date: milestone.date,
                milestone_type: milestone.milestone_type,
                description: milestone.description.clone(),
                status: milestone.status.clone(),
            },
        ));
    }

    for cap in &seed.capabilities {
        let snapshot = |reference: &Option<String>| {
            reference
                .as_deref()
                .and_then(|id| staged.get_milestone(id))
                .map(MilestoneRef::from)
        };
        let capability = Capability::from_new(
            cap.id.clone(),
            NewCapability {
                name: cap.name.clone(),
                workstream: cap.workstream.clone(),
                workstream_lead: cap.lead.clone(),
                sme: cap.sme.clone(),
                ba: cap.ba.clone(),
                technical_milestone: snapshot(&cap.technical_milestone),
                business_milestone: snapshot(&cap.business_milestone),
                status: cap.status,
                rag: cap.rag,
                notes: cap.notes.clone(),
            },
        );
        tracing::debug!(capability_id = %capability.id, "seeding capability");
        staged.insert_capability(capability);
    }

    if let Some(user_id) = &seed.current_user {
        staged.set_current_user(user_id.clone());
    }

    let plan_ids = seed
        .plans
        .into_iter()
        .map(|plan| {
            plan_ops::add_plan(
                &mut staged,
                NewPlan {
                    capability_id: plan.capability,
                    plan_type: plan.plan_type,
                    phases: plan.phases,
                },
            )
        })
        .collect();

    *store = staged;

    SeedImport {
        digest,
        users: seed.users.len(),
        milestones: seed.milestones.len(),
        capabilities: seed.capabilities.len(),
        plan_ids,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use captrack_core::model::{PlanStatus, Rag};

    const SEED: &str = r#"
schema_version: 0
current_user: "2"
users:
  - { id: "1", name: John Smith, email: john.smith@example.com, role: admin }
  - { id: "2", name: Sarah Chen, email: sarah.chen@example.com, role: manager }
milestones:
  - { id: ms-api, name: API Development Complete, date: 2025-02-15, type: technical }
capabilities:
  - id: cap-portal
    name: Customer Portal
    workstream: Frontend Development
    lead: Sarah Chen
    rag: Green
    technical_milestone: ms-api
plans:
  - capability: cap-portal
    type: aspirational
"#;

    #[test]
    fn test_import_uses_seed_ids_and_snapshots() {
        let mut store = Store::new();

        let summary = import_seed_str(SEED, &mut store).unwrap();

        assert_eq!(summary.users, 2);
        assert_eq!(summary.capabilities, 1);
        assert_eq!(summary.plan_ids.len(), 1);
        assert_eq!(store.current_user(), "2");

        let cap = store.get_capability("cap-portal").unwrap();
        assert_eq!(cap.rag, Rag::Green);
        assert_eq!(cap.technical_milestone.as_ref().unwrap().id, "ms-api");

        let plan = store.get_plan(&summary.plan_ids[0]).unwrap();
        assert_eq!(plan.version, 1);
        assert_eq!(plan.status, PlanStatus::Draft);
        assert_eq!(plan.metadata.created_by, "2");
    }

    #[test]
    fn test_reimport_is_rejected_and_store_untouched() {
        let mut store = Store::new();
        import_seed_str(SEED, &mut store).unwrap();
        let before = store.clone();

        let err = import_seed_str(SEED, &mut store).unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(store, before);
    }
}
