use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use crate::error::{PipelineError, Result};
use crate::fs::{copy_tree, remove_dir_forced};

use super::Pipeline;

/// Copy every project's build output into `<root>/<output_dir>/<destination>`.
///
/// Additive by default: files removed from a project's build stay in the
/// output tree. With `clean`, every destination is cleared once before any
/// copying starts, so projects sharing a destination still end up merged.
/// Later projects overwrite earlier ones on overlapping paths.
pub fn collect_all(pipeline: &Pipeline, clean: bool) -> Result<()> {
    let output_dir = pipeline.output_dir();
    fs::create_dir_all(&output_dir).map_err(|e| PipelineError::filesystem(&output_dir, e))?;

    if clean {
        let destinations: BTreeSet<PathBuf> = pipeline
            .catalog()
            .all()
            .iter()
            .map(|project| output_dir.join(&project.destination))
            .collect();
        for dest in destinations {
            if remove_dir_forced(&dest)? {
                tracing::debug!(path = %dest.display(), "cleared destination");
            }
        }
    }

    for project in pipeline.catalog().all() {
        let dest = output_dir.join(&project.destination);
        let stats = copy_tree(&project.build_output, &dest)?;
        println!(
            "   {} → {} ({} files)",
            project.build_output.display(),
            dest.display(),
            stats.files
        );
    }

    println!("✓ All builds copied to {} directory", pipeline.config().output_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PipelineConfig, ProjectEntry};
    use std::path::Path;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn built(root: &Path) {
        write(&root.join("client/dist/index.html"), "client");
        write(&root.join("author/dist/index.html"), "author");
        write(&root.join("author/dist/assets/app.js"), "author-js");
        write(&root.join("admin/dist/admin.html"), "admin");
    }

    #[test]
    fn test_collects_each_project_under_its_name() {
        let temp = TempDir::new().unwrap();
        built(temp.path());
        let pipeline = Pipeline::new(temp.path(), PipelineConfig::default());

        collect_all(&pipeline, false).unwrap();

        let public = temp.path().join("public");
        assert_eq!(fs::read_to_string(public.join("client/index.html")).unwrap(), "client");
        assert_eq!(fs::read_to_string(public.join("author/assets/app.js")).unwrap(), "author-js");
        assert_eq!(fs::read_to_string(public.join("admin/admin.html")).unwrap(), "admin");
    }

    #[test]
    fn test_stale_files_are_kept_unless_clean() {
        let temp = TempDir::new().unwrap();
        built(temp.path());
        let stale = temp.path().join("public/client/old.js");
        write(&stale, "old");
        let pipeline = Pipeline::new(temp.path(), PipelineConfig::default());

        collect_all(&pipeline, false).unwrap();
        assert!(stale.exists());

        collect_all(&pipeline, true).unwrap();
        assert!(!stale.exists());
        assert!(temp.path().join("public/client/index.html").exists());
    }

    #[test]
    fn test_shared_destination_union_and_last_wins() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("a/dist/shared.txt"), "from a");
        write(&temp.path().join("a/dist/only-a.txt"), "a");
        write(&temp.path().join("b/dist/shared.txt"), "from b");
        write(&temp.path().join("b/dist/only-b.txt"), "b");

        let mut config = PipelineConfig::default();
        config.projects = vec![
            ProjectEntry { destination: Some("site".to_string()), ..ProjectEntry::new("a") },
            ProjectEntry { destination: Some("site".to_string()), ..ProjectEntry::new("b") },
        ];
        let pipeline = Pipeline::new(temp.path(), config);

        collect_all(&pipeline, false).unwrap();

        let site = temp.path().join("public/site");
        assert_eq!(fs::read_to_string(site.join("only-a.txt")).unwrap(), "a");
        assert_eq!(fs::read_to_string(site.join("only-b.txt")).unwrap(), "b");
        assert_eq!(fs::read_to_string(site.join("shared.txt")).unwrap(), "from b");
    }

    #[test]
    fn test_shared_destination_clean_keeps_union() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("a/dist/shared.txt"), "from a");
        write(&temp.path().join("a/dist/only-a.txt"), "a");
        write(&temp.path().join("b/dist/shared.txt"), "from b");
        write(&temp.path().join("b/dist/only-b.txt"), "b");
        let stale = temp.path().join("public/site/stale.txt");
        write(&stale, "old");

        let mut config = PipelineConfig::default();
        config.projects = vec![
            ProjectEntry { destination: Some("site".to_string()), ..ProjectEntry::new("a") },
            ProjectEntry { destination: Some("site".to_string()), ..ProjectEntry::new("b") },
        ];
        let pipeline = Pipeline::new(temp.path(), config);

        collect_all(&pipeline, true).unwrap();

        let site = temp.path().join("public/site");
        assert!(!stale.exists());
        assert_eq!(fs::read_to_string(site.join("only-a.txt")).unwrap(), "a");
        assert_eq!(fs::read_to_string(site.join("only-b.txt")).unwrap(), "b");
        assert_eq!(fs::read_to_string(site.join("shared.txt")).unwrap(), "from b");
    }

    #[test]
    fn test_missing_build_output_propagates() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("client/dist/index.html"), "client");
        let pipeline = Pipeline::new(temp.path(), PipelineConfig::default());

        let err = collect_all(&pipeline, false).unwrap_err();

        match err {
            PipelineError::Filesystem { path, .. } => {
                assert_eq!(path, temp.path().join("author/dist"));
            }
            other => panic!("unexpected error: {other}"),
        }
        // Projects before the failure were already collected
        assert!(temp.path().join("public/client/index.html").exists());
    }
}
