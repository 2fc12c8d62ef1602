//! Seed digest canonicalization
//!
//! Computes stable SHA256 digests of seeds for reproducibility

#![allow(clippy::result_large_err)]

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::{serialization_error, Result};
use crate::seed::format_v0::{SeedCapability, SeedMilestone, SeedPlan, SeedUser, SeedV0};

/// Canonical representation of a seed for digest calculation
///
/// Entity lists are sorted by ID; plans keep file order since they have no
/// ID of their own and order decides which one is created first.
#[derive(Serialize)]
struct CanonicalSeed<'a> {
    schema_version: u32,
    current_user: Option<&'a str>,
    users: Vec<&'a SeedUser>,
    milestones: Vec<&'a SeedMilestone>,
    capabilities: Vec<&'a SeedCapability>,
    plans: &'a [SeedPlan],
}

/// Compute a stable digest for a seed
///
/// Returns a SHA256 hex digest of the canonicalized seed representation.
/// YAML formatting and entity order do not affect the result.
///
/// # Errors
///
/// Returns `Serialization` if the canonical form cannot be encoded.
pub fn compute_seed_digest(seed: &SeedV0) -> Result<String> {
    let json = serde_json::to_string(&canonicalize_seed(seed))
        .map_err(|e| serialization_error("seed_digest", e))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

fn canonicalize_seed(seed: &SeedV0) -> CanonicalSeed<'_> {
    let mut users: Vec<_> = seed.users.iter().collect();
    users.sort_by(|a, b| a.id.cmp(&b.id));

    let mut milestones: Vec<_> = seed.milestones.iter().collect();
    milestones.sort_by(|a, b| a.id.cmp(&b.id));

    let mut capabilities: Vec<_> = seed.capabilities.iter().collect();
    capabilities.sort_by(|a, b| a.id.cmp(&b.id));

    CanonicalSeed {
        schema_version: seed.schema_version,
        current_user: seed.current_user.as_deref(),
        users,
        milestones,
        capabilities,
        plans: &seed.plans,
    }
}
