//! Seed parser with validation
//!
//! Parses YAML and validates schema version, ID uniqueness and milestone /
//! capability references

#![allow(clippy::result_large_err)]

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use captrack_core::model::MilestoneType;
use captrack_core::ops::Store;

use crate::errors::{seed_validation, Result};
use crate::seed::format_v0::SeedV0;

/// Parse a seed file from a path
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    parse_seed_file_with_store(path, None)
}

/// Parse a seed file, also checking references against an existing store
pub fn parse_seed_file_with_store(path: &Path, store: Option<&Store>) -> Result<SeedV0> {
    let content = fs::read_to_string(path)
        .map_err(|e| seed_validation(format!("Failed to read seed file: {}", e)))?;

    parse_seed_str_with_store(&content, store)
}

/// Parse a seed from a string
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    parse_seed_str_with_store(content, None)
}

/// Parse a seed from a string, also checking references against an
/// existing store
///
/// With a store, seed IDs must not collide with entities already present,
/// and milestone or capability references may point at existing entities.
pub fn parse_seed_str_with_store(content: &str, store: Option<&Store>) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(format!("YAML parse error: {}", e)))?;

    validate_seed(&seed, store)?;

    Ok(seed)
}

fn ensure_unique<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a String>,
    taken: impl Fn(&str) -> bool,
) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(seed_validation(format!("Empty {} id", kind)));
        }
        if !seen.insert(id) {
            return Err(seed_validation(format!("Duplicate {} id: {}", kind, id)));
        }
        if taken(id) {
            return Err(seed_validation(format!(
                "{} id already exists in workspace: {}",
                kind, id
            )));
        }
    }
    Ok(())
}

/// Validate a parsed seed
fn validate_seed(seed: &SeedV0, store: Option<&Store>) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    ensure_unique("user", seed.users.iter().map(|u| &u.id), |id| {
        store.is_some_and(|s| s.get_user(id).is_some())
    })?;
    ensure_unique("milestone", seed.milestones.iter().map(|m| &m.id), |id| {
        store.is_some_and(|s| s.get_milestone(id).is_some())
    })?;
    ensure_unique("capability", seed.capabilities.iter().map(|c| &c.id), |id| {
        store.is_some_and(|s| s.get_capability(id).is_some())
    })?;

    for user in &seed.users {
        if user.name.trim().is_empty() {
            return Err(seed_validation(format!("User {} has no name", user.id)));
        }
    }

    // Milestone types from the seed first, then the existing store
    let mut milestone_types: HashMap<&str, MilestoneType> = store
        .map(|s| {
            s.milestones()
                .iter()
                .map(|m| (m.id.as_str(), m.milestone_type))
                .collect()
        })
        .unwrap_or_default();
    milestone_types.extend(
        seed.milestones
            .iter()
            .map(|m| (m.id.as_str(), m.milestone_type)),
    );

    for cap in &seed.capabilities {
        if cap.name.trim().is_empty() || cap.workstream.trim().is_empty() {
            return Err(seed_validation(format!(
                "Capability {} needs a name and a workstream",
                cap.id
            )));
        }
        let slots = [
            (MilestoneType::Technical, &cap.technical_milestone),
            (MilestoneType::Business, &cap.business_milestone),
        ];
        for (slot, reference) in slots {
            let Some(milestone_id) = reference else {
                continue;
            };
            match milestone_types.get(milestone_id.as_str()) {
                None => {
                    return Err(seed_validation(format!(
                        "Capability {} references non-existent milestone: {}",
                        cap.id, milestone_id
                    )))
                }
                Some(actual) if *actual != slot => {
                    return Err(seed_validation(format!(
                        "Capability {} puts {} milestone {} in the {} slot",
                        cap.id, actual, milestone_id, slot
                    )))
                }
                Some(_) => {}
            }
        }
    }

    let capability_ids: HashSet<&str> = seed.capabilities.iter().map(|c| c.id.as_str()).collect();
    for plan in &seed.plans {
        let known = capability_ids.contains(plan.capability.as_str())
            || store.is_some_and(|s| s.get_capability(&plan.capability).is_some());
        if !known {
            return Err(seed_validation(format!(
                "Plan references non-existent capability: {}",
                plan.capability
            )));
        }
        for (name, phase) in plan.phases.iter() {
            if phase.progress > 100 {
                return Err(seed_validation(format!(
                    "Plan for {} has {} progress {} above 100",
                    plan.capability, name, phase.progress
                )));
            }
        }
    }

    Ok(())
}
