use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the install/build/collect pipeline.
///
/// Every variant is terminal: the CLI prints it once and exits with status 1.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Project name is required!\nUsage: monobuild build <project>")]
    MissingArgument,

    #[error("Unknown project '{name}'. Known projects: {known}")]
    UnknownProject { name: String, known: String },

    #[error("Directory {project} does not exist! ({})", .path.display())]
    MissingProjectDirectory { project: String, path: PathBuf },

    #[error("{manifest} not found in {project}!")]
    MissingManifest { project: String, manifest: String },

    #[error("{dependency_dir} not found in {project}!\n   Please run 'monobuild install' first.")]
    MissingDependencies {
        project: String,
        dependency_dir: String,
    },

    #[error("Failed to install dependencies for {project}: {message}")]
    InstallCommandFailed { project: String, message: String },

    #[error("Dependencies for {project} were not installed ({} missing after install)", .path.display())]
    InstallVerificationFailed { project: String, path: PathBuf },

    #[error(
        "{dependency} not found in {project}/{dependency_dir}!\n   Please run 'monobuild install' first."
    )]
    RequiredDependencyMissing {
        project: String,
        dependency: String,
        dependency_dir: String,
    },

    #[error("Failed to change to {project} directory! ({})", .path.display())]
    DirectoryChangeFailed { project: String, path: PathBuf },

    #[error("Failed to build {project}: {message}")]
    BuildCommandFailed { project: String, message: String },

    #[error("Build output ({build_dir}) not found for {project}!")]
    MissingBuildOutput { project: String, build_dir: String },

    #[error("Filesystem error at {}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    /// Wrap an I/O error with the path it happened on.
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
