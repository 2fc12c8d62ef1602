//! Workspace snapshot persistence

mod common;

use captrack_core::model::{PhaseName, PhasePatch, PlanType};
use captrack_core::ops::plan_ops;
use captrack_core::Store;
use captrack_store::seed::import_seed;
use captrack_store::{load_workspace, save_workspace};
use common::*;
use tempfile::TempDir;

#[test]
fn test_saved_workspace_loads_back_equal() {
    // GIVEN a seeded store with plan history
    let mut store = Store::new();
    let summary = import_seed(&fixtures_dir().join("seed_full.yaml"), &mut store).unwrap();
    plan_ops::update_plan_phase(
        &mut store,
        &summary.plan_ids[1],
        PhaseName::Cst,
        PhasePatch {
            progress: Some(10),
            ..Default::default()
        },
    )
    .unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".captrack").join("workspace.json");

    // WHEN saving and loading
    save_workspace(&path, &store).unwrap();
    let loaded = load_workspace(&path).unwrap();

    // THEN nothing was lost
    assert_eq!(loaded, store);
    assert_eq!(loaded.get_plan(&summary.plan_ids[1]).unwrap().history.len(), 1);
}

#[test]
fn test_save_overwrites_previous_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("workspace.json");
    let mut store = Store::new();
    save_workspace(&path, &store).unwrap();

    let cap = add_capability(&mut store, "Customer Portal", "Frontend");
    add_plan(&mut store, &cap, PlanType::Aspirational, 1);
    save_workspace(&path, &store).unwrap();

    let loaded = load_workspace(&path).unwrap();
    assert_eq!(loaded.capabilities().len(), 1);
    assert_eq!(loaded.plans().len(), 1);
}
