/// Repository root handling
///
/// - Tilde expansion (~/ → /home/name/)
/// - Existence validation
/// - Single-component validation so project names cannot escape the root
use anyhow::Result;
use std::path::{Component, Path, PathBuf};

/// Validated repository root directory
#[derive(Debug, Clone)]
pub struct RootDir {
    /// Expanded path with tilde replaced
    expanded: PathBuf,
}

impl RootDir {
    /// Resolve a root from user input (e.g. `--root ~/work/site`)
    ///
    /// # Examples
    /// ```
    /// use monobuild::path::RootDir;
    ///
    /// let root = RootDir::from_user_input(std::env::temp_dir().to_str().unwrap()).unwrap();
    /// assert!(root.as_path().is_dir());
    /// ```
    pub fn from_user_input(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            anyhow::bail!("Root path cannot be empty");
        }

        let expanded = PathBuf::from(shellexpand::tilde(trimmed).to_string());
        let root = Self { expanded };
        root.validate_directory()?;
        Ok(root)
    }

    /// Use the process's current directory as the root
    pub fn current() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self { expanded: cwd })
    }

    pub fn as_path(&self) -> &Path {
        &self.expanded
    }

    fn validate_directory(&self) -> Result<()> {
        if !self.expanded.exists() {
            anyhow::bail!("Path does not exist: {}", self.expanded.display());
        }

        if !self.expanded.is_dir() {
            anyhow::bail!("Path is not a directory: {}", self.expanded.display());
        }

        Ok(())
    }
}

/// Check that a name is usable as exactly one path component
pub fn validate_component(component: &str) -> Result<()> {
    if component.is_empty() {
        anyhow::bail!("Path component cannot be empty");
    }

    if component.contains('/') || component.contains('\\') {
        anyhow::bail!("Path component cannot contain separators: '{}'", component);
    }

    if component == ".." || component == "." {
        anyhow::bail!("Path component cannot be '.' or '..': '{}'", component);
    }

    Ok(())
}

/// Check that a path stays strictly below the directory it is joined onto
///
/// Accepts nested paths like `build/site`; rejects empty, absolute, `.` and `..` components.
pub fn validate_relative_dir(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        anyhow::bail!("Path cannot be empty");
    }

    for component in Path::new(path).components() {
        match component {
            Component::Normal(_) => {}
            Component::CurDir | Component::ParentDir => {
                anyhow::bail!("Path cannot contain '.' or '..': '{}'", path)
            }
            Component::RootDir | Component::Prefix(_) => {
                anyhow::bail!("Path must be relative: '{}'", path)
            }
        }
    }

    Ok(())
}

impl std::fmt::Display for RootDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expanded.display())
    }
}
