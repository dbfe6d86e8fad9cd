use crate::error::{PipelineError, Result};
use crate::exec::CommandBuilder;
use crate::fs::remove_dir_forced;
use crate::projects::Project;

use super::{Pipeline, preflight};

/// Clean-install dependencies for every configured project, in order.
///
/// The layout of all projects is validated first, so a missing directory or
/// manifest anywhere aborts before any dependency directory is removed.
pub fn install_all(pipeline: &Pipeline) -> Result<()> {
    println!("📦 Installing dependencies for all projects...\n");

    let projects = pipeline.catalog().all();
    preflight::check_layout(projects)?;

    for project in projects {
        install_project(pipeline, project)?;
    }

    println!("✓ All dependencies installed successfully!");
    Ok(())
}

fn install_project(pipeline: &Pipeline, project: &Project) -> Result<()> {
    println!("📦 Installing dependencies for {}...", project.name);

    if remove_dir_forced(&project.dependency_dir)? {
        tracing::debug!(path = %project.dependency_dir.display(), "removed previous dependencies");
    }

    let package_manager = &pipeline.config().package_manager;
    CommandBuilder::new(&package_manager.program)
        .args(&package_manager.install)
        .working_dir(&project.dir)
        .execute_interactive()
        .map_err(|e| PipelineError::InstallCommandFailed {
            project: project.name.clone(),
            message: e.to_string(),
        })?;

    if !project.dependencies_installed() {
        return Err(PipelineError::InstallVerificationFailed {
            project: project.name.clone(),
            path: project.dependency_dir.clone(),
        });
    }

    project.check_required_dependencies()?;

    println!("✓ {} dependencies installed successfully\n", project.name);
    Ok(())
}
