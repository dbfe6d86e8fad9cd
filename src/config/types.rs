use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pipeline configuration (monobuild.toml at the repository root)
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PipelineConfig {
    /// Manifest file every project directory must contain
    pub manifest: String,
    /// Directory the package manager installs into
    pub dependency_dir: String,
    /// Directory each build is expected to produce
    pub build_dir: String,
    /// Unified output tree, relative to the root
    pub output_dir: String,
    /// Clear each destination before collecting into it
    pub clean: bool,
    pub package_manager: PackageManagerConfig,
    /// Environment overrides for the build command
    pub build_env: BTreeMap<String, String>,
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PackageManagerConfig {
    pub program: String,
    pub install: Vec<String>,
    pub build: Vec<String>,
}

/// One sub-application in the monorepo
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_dependencies: Vec<String>,
    /// Subdirectory name under the output tree (defaults to `name`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl ProjectEntry {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required_dependencies: Vec::new(),
            destination: None,
        }
    }

    pub fn requires(mut self, dependency: &str) -> Self {
        self.required_dependencies.push(dependency.to_string());
        self
    }

    pub fn destination(&self) -> &str {
        self.destination.as_deref().unwrap_or(&self.name)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let mut build_env = BTreeMap::new();
        build_env.insert("NODE_ENV".to_string(), "production".to_string());

        Self {
            manifest: "package.json".to_string(),
            dependency_dir: "node_modules".to_string(),
            build_dir: "dist".to_string(),
            output_dir: "public".to_string(),
            clean: false,
            package_manager: PackageManagerConfig::default(),
            build_env,
            projects: vec![
                ProjectEntry::new("client"),
                ProjectEntry::new("author").requires("framer-motion"),
                ProjectEntry::new("admin"),
            ],
        }
    }
}

impl Default for PackageManagerConfig {
    fn default() -> Self {
        Self {
            program: "npm".to_string(),
            install: vec![
                "install".to_string(),
                "--legacy-peer-deps".to_string(),
                "--no-audit".to_string(),
                "--no-fund".to_string(),
                "--prefer-offline".to_string(),
            ],
            build: vec!["run".to_string(), "build".to_string()],
        }
    }
}
