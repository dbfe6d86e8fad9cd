/// File system operations used by the pipeline
///
/// Responsibilities:
/// - Forced removal of dependency directories
/// - Recursive, additive copy of build output
/// - Atomic writes for build records
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{PipelineError, Result};

/// Files written by a tree copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
}

/// Remove a directory tree if present. Returns whether anything was removed.
///
/// Tolerates partially written trees; a missing directory is not an error.
pub fn remove_dir_forced(path: &Path) -> Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(path).map_err(|e| PipelineError::filesystem(path, e))?;
            Ok(true)
        }
        Ok(_) => {
            fs::remove_file(path).map_err(|e| PipelineError::filesystem(path, e))?;
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PipelineError::filesystem(path, e)),
    }
}

/// Copy `src` into `dest` depth-first, creating directories as needed.
///
/// Existing files with the same relative path are overwritten; files already
/// in `dest` that are absent from `src` are left alone. Symlinks are followed.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<CopyStats> {
    let mut stats = CopyStats::default();

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
            PipelineError::filesystem(path, source)
        })?;

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| PipelineError::filesystem(entry.path(), io::Error::other(e)))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| PipelineError::filesystem(&target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| PipelineError::filesystem(&target, e))?;
            stats.files += 1;
        }
    }

    Ok(stats)
}

/// Write file atomically (write to temp, then rename)
pub fn write_file_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PipelineError::filesystem(parent, e))?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| PipelineError::filesystem(&temp_path, e))?;

    file.write_all(content)
        .and_then(|_| file.sync_all())
        .map_err(|e| PipelineError::filesystem(&temp_path, e))?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|e| PipelineError::filesystem(path, e))?;

    Ok(())
}
