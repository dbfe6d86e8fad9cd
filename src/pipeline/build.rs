use crate::error::{PipelineError, Result};
use crate::exec::{CommandBuilder, ExecError};
use crate::projects::Project;
use crate::state::{BuildRecord, BuildStatus, build::save_build_record};

use super::Pipeline;

/// Build one project by name.
///
/// Dependencies must already be installed. The build runs with the project
/// directory as its working directory and the configured environment overrides
/// on top of the inherited environment. A build that exits successfully but
/// leaves no output directory is a failure.
pub fn build_project(pipeline: &Pipeline, name: &str) -> Result<()> {
    let project = pipeline.catalog().find(name)?;

    project.check_layout()?;
    project.check_dependencies()?;
    project.check_required_dependencies()?;

    println!("\n🔨 Building {}...", project.name);
    println!("   Path: {}", project.dir.display());
    println!("   Dependencies: {}\n", project.dependency_dir.display());

    let result = run_build(pipeline, project).and_then(|()| project.check_build_output());

    let status = if result.is_ok() {
        BuildStatus::Success
    } else {
        BuildStatus::Failed
    };
    let record = BuildRecord::now(&project.name, status, &project.build_output);
    if let Err(e) = save_build_record(pipeline.root(), &record) {
        tracing::warn!(project = %project.name, error = ?e, "could not save build record");
    }

    result?;

    println!("\n✓ {} built successfully!", project.name);
    println!("   Output: {}\n", project.build_output.display());
    Ok(())
}

fn run_build(pipeline: &Pipeline, project: &Project) -> Result<()> {
    let config = pipeline.config();
    let package_manager = &config.package_manager;

    CommandBuilder::new(&package_manager.program)
        .args(&package_manager.build)
        .working_dir(&project.dir)
        .envs(&config.build_env)
        .execute_interactive()
        .map_err(|e| match e {
            ExecError::WorkingDirectory { path } => PipelineError::DirectoryChangeFailed {
                project: project.name.clone(),
                path,
            },
            other => PipelineError::BuildCommandFailed {
                project: project.name.clone(),
                message: other.to_string(),
            },
        })
}
