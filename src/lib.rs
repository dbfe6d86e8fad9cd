pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod fs;
pub mod log;
pub mod path;
pub mod pipeline;
pub mod projects;
pub mod state;

// Re-export commonly used types
pub use config::{Config, PipelineConfig, ProjectEntry};
pub use error::PipelineError;
pub use pipeline::Pipeline;
pub use projects::{Catalog, Project};
