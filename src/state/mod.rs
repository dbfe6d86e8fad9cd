pub mod build;

use std::path::Path;

pub use build::{BuildRecord, BuildStatus};

use crate::projects::Project;

/// Point-in-time view of one project's on-disk state
#[derive(Debug, Clone)]
pub struct ProjectState {
    pub name: String,
    pub has_directory: bool,
    pub has_manifest: bool,
    pub dependencies_installed: bool,
    pub missing_required: Vec<String>,
    pub has_build_output: bool,
    pub last_build: Option<BuildRecord>,
}

impl ProjectState {
    /// Ready to build: layout intact and every dependency present
    pub fn is_buildable(&self) -> bool {
        self.has_directory
            && self.has_manifest
            && self.dependencies_installed
            && self.missing_required.is_empty()
    }
}

/// Get the complete state for a project
pub fn get_project_state(root: &Path, project: &Project) -> ProjectState {
    let dependencies_installed = project.dependencies_installed();
    let missing_required = if dependencies_installed {
        project
            .missing_required_dependencies()
            .into_iter()
            .map(str::to_string)
            .collect()
    } else {
        project.required_dependencies.clone()
    };

    ProjectState {
        name: project.name.clone(),
        has_directory: project.dir.is_dir(),
        has_manifest: project.manifest.exists(),
        dependencies_installed,
        missing_required,
        has_build_output: project.has_build_output(),
        last_build: build::load_build_record(root, &project.name),
    }
}
