use crate::error::Result;
use crate::projects::Project;

/// Verify directory and manifest for every project before anything is mutated.
///
/// Returns the first violation in project order.
pub fn check_layout(projects: &[Project]) -> Result<()> {
    for project in projects {
        tracing::debug!(project = %project.name, dir = %project.dir.display(), "preflight");
        project.check_layout()?;
    }
    Ok(())
}
