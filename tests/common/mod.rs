//! Shared testing utilities for monobuild CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PROJECTS: [&str; 3] = ["client", "author", "admin"];

/// A throwaway monorepo whose package manager is a shell script.
#[allow(dead_code)]
pub struct TestRepo {
    root: TempDir,
}

#[allow(dead_code)]
impl TestRepo {
    /// Create an empty repository root.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    /// Repository with all three projects and their manifests.
    pub fn with_projects() -> Self {
        let repo = Self::new();
        for name in PROJECTS {
            repo.add_project(name);
        }
        repo
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn project(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    pub fn add_project(&self, name: &str) {
        let dir = self.project(name);
        fs::create_dir_all(&dir).expect("Failed to create project dir");
        fs::write(dir.join("package.json"), format!("{{\"name\":\"{}\"}}", name))
            .expect("Failed to write manifest");
    }

    /// Write monobuild.toml with `sh -c` scripts standing in for npm.
    pub fn use_scripts(&self, install: &str, build: &str) {
        let content = format!(
            r#"[package_manager]
program = "sh"
install = ["-c", {install:?}]
build = ["-c", {build:?}]

[[projects]]
name = "client"

[[projects]]
name = "author"
required_dependencies = ["framer-motion"]

[[projects]]
name = "admin"
"#
        );
        fs::write(self.path().join("monobuild.toml"), content).expect("Failed to write config");
    }

    /// Pretend dependencies were installed for a project.
    pub fn install_deps(&self, name: &str, packages: &[&str]) {
        let deps = self.project(name).join("node_modules");
        fs::create_dir_all(&deps).expect("Failed to create node_modules");
        for package in packages {
            fs::create_dir_all(deps.join(package)).expect("Failed to create package dir");
        }
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        fs::create_dir_all(path.parent().expect("path has parent")).expect("Failed to create dir");
        fs::write(path, content).expect("Failed to write file");
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative)).expect("Failed to read file")
    }

    /// Build a command for invoking the compiled binary against this repository.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("monobuild").expect("Failed to locate monobuild binary");
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env_remove("RUST_LOG")
            .env_remove("MONOBUILD_LOG");
        cmd
    }
}
