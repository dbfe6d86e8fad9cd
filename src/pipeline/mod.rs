//! Install → build → collect orchestration for the monorepo's projects.
//!
//! Each step runs projects one at a time in configured order and stops at the
//! first failure, leaving the filesystem as it was at that moment.

pub mod build;
pub mod collect;
pub mod install;
pub mod preflight;

use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::projects::Catalog;

pub use build::build_project;
pub use collect::collect_all;
pub use install::install_all;

/// Everything a pipeline step needs: the root, its configuration and the resolved projects
pub struct Pipeline {
    root: PathBuf,
    config: PipelineConfig,
    catalog: Catalog,
}

impl Pipeline {
    pub fn new(root: impl Into<PathBuf>, config: PipelineConfig) -> Self {
        let root = root.into();
        let catalog = Catalog::new(&root, &config);
        Self {
            root,
            config,
            catalog,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Unified output tree, e.g. `<root>/public`
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.output_dir)
    }

    /// Install every project, build each in order, then collect
    pub fn run_all(&self, clean: bool) -> Result<()> {
        install_all(self)?;

        for name in self.catalog.names() {
            build_project(self, name)?;
        }

        collect_all(self, clean)?;
        Ok(())
    }
}

#[cfg(all(test, unix))]
pub(crate) mod testing {
    use std::fs;
    use std::path::Path;

    use crate::config::PipelineConfig;

    /// Config whose package manager is `sh -c <script>`
    pub fn shell_config(install_script: &str, build_script: &str) -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.package_manager.program = "sh".to_string();
        config.package_manager.install = vec!["-c".to_string(), install_script.to_string()];
        config.package_manager.build = vec!["-c".to_string(), build_script.to_string()];
        config
    }

    /// Create `<root>/<name>/package.json` for each project
    pub fn scaffold(root: &Path, names: &[&str]) {
        for name in names {
            let dir = root.join(name);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("package.json"), format!("{{\"name\":\"{}\"}}", name)).unwrap();
        }
    }
}
