use std::path::{Path, PathBuf};

use crate::config::{PipelineConfig, ProjectEntry};
use crate::error::{PipelineError, Result};

/// A configured project resolved against the repository root
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub dir: PathBuf,
    pub manifest: PathBuf,
    pub dependency_dir: PathBuf,
    pub build_output: PathBuf,
    pub destination: String,
    pub required_dependencies: Vec<String>,
    manifest_name: String,
    dependency_dir_name: String,
    build_dir_name: String,
}

impl Project {
    fn resolve(root: &Path, config: &PipelineConfig, entry: &ProjectEntry) -> Self {
        let dir = root.join(&entry.name);

        Self {
            name: entry.name.clone(),
            manifest: dir.join(&config.manifest),
            dependency_dir: dir.join(&config.dependency_dir),
            build_output: dir.join(&config.build_dir),
            dir,
            destination: entry.destination().to_string(),
            required_dependencies: entry.required_dependencies.clone(),
            manifest_name: config.manifest.clone(),
            dependency_dir_name: config.dependency_dir.clone(),
            build_dir_name: config.build_dir.clone(),
        }
    }

    pub fn check_directory(&self) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(PipelineError::MissingProjectDirectory {
                project: self.name.clone(),
                path: self.dir.clone(),
            });
        }
        Ok(())
    }

    pub fn check_manifest(&self) -> Result<()> {
        if !self.manifest.exists() {
            return Err(PipelineError::MissingManifest {
                project: self.name.clone(),
                manifest: self.manifest_name.clone(),
            });
        }
        Ok(())
    }

    /// Directory and manifest must both be present before anything touches the project
    pub fn check_layout(&self) -> Result<()> {
        self.check_directory()?;
        self.check_manifest()
    }

    pub fn dependencies_installed(&self) -> bool {
        self.dependency_dir.is_dir()
    }

    pub fn check_dependencies(&self) -> Result<()> {
        if !self.dependencies_installed() {
            return Err(PipelineError::MissingDependencies {
                project: self.name.clone(),
                dependency_dir: self.dependency_dir_name.clone(),
            });
        }
        Ok(())
    }

    /// Required dependencies with no directory under the dependency dir
    pub fn missing_required_dependencies(&self) -> Vec<&str> {
        self.required_dependencies
            .iter()
            .filter(|dep| !self.dependency_dir.join(dep.as_str()).exists())
            .map(String::as_str)
            .collect()
    }

    pub fn check_required_dependencies(&self) -> Result<()> {
        match self.missing_required_dependencies().first() {
            Some(dependency) => Err(PipelineError::RequiredDependencyMissing {
                project: self.name.clone(),
                dependency: dependency.to_string(),
                dependency_dir: self.dependency_dir_name.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn has_build_output(&self) -> bool {
        self.build_output.is_dir()
    }

    pub fn check_build_output(&self) -> Result<()> {
        if !self.has_build_output() {
            return Err(PipelineError::MissingBuildOutput {
                project: self.name.clone(),
                build_dir: self.build_dir_name.clone(),
            });
        }
        Ok(())
    }
}

/// The closed set of projects a pipeline run operates on
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    pub fn new(root: &Path, config: &PipelineConfig) -> Self {
        let projects = config
            .projects
            .iter()
            .map(|entry| Project::resolve(root, config, entry))
            .collect();

        Self { projects }
    }

    /// Projects in configured order
    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    pub fn names(&self) -> Vec<&str> {
        self.projects.iter().map(|p| p.name.as_str()).collect()
    }

    /// Look up a project by identifier; anything outside the configured set is rejected
    pub fn find(&self, name: &str) -> Result<&Project> {
        self.projects
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| PipelineError::UnknownProject {
                name: name.to_string(),
                known: self.names().join(", "),
            })
    }
}
