use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// Build status states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildStatus {
    Success,
    Failed,
}

/// Outcome of the most recent build of one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub project: String,
    pub timestamp: i64, // Unix timestamp
    pub status: BuildStatus,
    pub output: PathBuf,
}

impl BuildRecord {
    pub fn now(project: &str, status: BuildStatus, output: &Path) -> Self {
        Self {
            project: project.to_string(),
            timestamp: chrono::Utc::now().timestamp(),
            status,
            output: output.to_path_buf(),
        }
    }

    /// Local time rendering for status output
    pub fn when(&self) -> String {
        chrono::DateTime::from_timestamp(self.timestamp, 0)
            .map(|utc| {
                utc.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| "unknown".to_string())
    }
}

fn record_path(root: &Path, project: &str) -> PathBuf {
    root.join(".monobuild/state").join(format!("{}.json", project))
}

/// Load the build record from .monobuild/state/<project>.json
pub fn load_build_record(root: &Path, project: &str) -> Option<BuildRecord> {
    let state_file = record_path(root, project);

    if !state_file.exists() {
        return None;
    }

    let content = fs::read_to_string(&state_file).ok()?;
    serde_json::from_str(&content).ok()
}

/// Save the build record to .monobuild/state/<project>.json
pub fn save_build_record(root: &Path, record: &BuildRecord) -> Result<()> {
    let state_file = record_path(root, &record.project);
    let json = serde_json::to_string_pretty(record)
        .map_err(|e| PipelineError::filesystem(&state_file, e.into()))?;
    crate::fs::write_file_atomic(&state_file, json.as_bytes())
}
