pub mod types;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::exec;
use crate::path::{validate_component, validate_relative_dir};

pub use types::{PackageManagerConfig, PipelineConfig, ProjectEntry};

pub const CONFIG_FILE: &str = "monobuild.toml";

pub struct Config {
    pub pipeline: PipelineConfig,
    /// File the configuration came from (None for built-in defaults)
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load configuration for a repository root.
    ///
    /// An explicit path must exist. Otherwise the root's monobuild.toml is
    /// tried, then ~/.config/monobuild/config.toml, then built-in defaults.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            return Self::load_file(path);
        }

        let config_paths: Vec<Option<PathBuf>> = vec![
            Some(root.join(CONFIG_FILE)),
            dirs::home_dir().map(|p| p.join(".config/monobuild/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                return Self::load_file(&path);
            }
        }

        tracing::debug!("no config file found, using built-in defaults");
        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let pipeline: PipelineConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config TOML: {}", path.display()))?;

        pipeline
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;

        tracing::debug!(path = %path.display(), projects = pipeline.projects.len(), "loaded config");

        Ok(Self {
            pipeline,
            source: Some(path.to_path_buf()),
        })
    }
}

impl PipelineConfig {
    /// Reject configurations whose paths could escape or overlap a project directory
    pub fn validate(&self) -> Result<()> {
        if self.projects.is_empty() {
            anyhow::bail!("No projects configured");
        }

        validate_component(&self.manifest).context("Invalid manifest")?;
        validate_component(&self.dependency_dir).context("Invalid dependency_dir")?;
        validate_component(&self.build_dir).context("Invalid build_dir")?;
        validate_relative_dir(&self.output_dir).context("Invalid output_dir")?;

        let program = &self.package_manager.program;
        if !exec::is_allowed(program) {
            anyhow::bail!(
                "Package manager '{}' not allowed. Allowed: {}",
                program,
                exec::allowed_commands().join(", ")
            );
        }

        let mut seen = HashSet::new();
        for project in &self.projects {
            validate_component(&project.name)
                .with_context(|| format!("Invalid project name '{}'", project.name))?;
            validate_component(project.destination())
                .with_context(|| format!("Invalid destination for project '{}'", project.name))?;
            if !seen.insert(project.name.as_str()) {
                anyhow::bail!("Project '{}' is listed more than once", project.name);
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            source: None,
        }
    }
}
