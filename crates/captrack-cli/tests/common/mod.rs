#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// A scratch directory holding one workspace snapshot
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Workspace created with `captrack init`
    pub fn initialized() -> Self {
        let workspace = Self::new();
        workspace.ok(&["init"]);
        workspace
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_file(&self) -> PathBuf {
        self.path().join("workspace.json")
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Run the binary inside the scratch directory against its snapshot
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_captrack"))
            .current_dir(self.path())
            .env("CAPTRACK_LOG_PROFILE", "test")
            .env_remove("RUST_LOG")
            .arg("--data")
            .arg(self.data_file())
            .args(args)
            .output()
            .unwrap()
    }

    /// Run and assert success, returning stdout
    pub fn ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "captrack {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }

    /// Run and assert failure, returning stderr
    pub fn fails(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert_eq!(output.status.code(), Some(1), "captrack {:?} should fail", args);
        String::from_utf8(output.stderr).unwrap()
    }

    /// Run a creating command and return the id from its confirmation
    pub fn create(&self, args: &[&str]) -> String {
        let stdout = self.ok(args);
        last_word(&stdout)
    }

    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        serde_json::from_str(&self.ok(args)).unwrap()
    }
}

pub fn last_word(text: &str) -> String {
    text.split_whitespace().last().unwrap().to_string()
}

pub fn add_capability(workspace: &TestWorkspace, name: &str, workstream: &str) -> String {
    workspace.create(&[
        "capability",
        "add",
        "--name",
        name,
        "--workstream",
        workstream,
        "--lead",
        "Sarah Chen",
        "--rag",
        "Green",
    ])
}

pub fn add_implementation_plan(workspace: &TestWorkspace, capability_id: &str) -> String {
    workspace.create(&[
        "plan",
        "add",
        capability_id,
        "--type",
        "implementation",
        "--phase",
        "development=2025-03-01..2025-04-15",
        "--phase",
        "cst=2025-04-16..2025-05-10",
        "--phase",
        "uat=2025-05-11..2025-05-31",
    ])
}
