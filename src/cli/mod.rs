use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::PipelineError;
use crate::path::RootDir;
use crate::pipeline::{self, Pipeline};
use crate::state;

#[derive(Parser, Debug)]
#[command(author, version, about = "Install, build and collect the projects of a monorepo", long_about = None)]
pub struct Cli {
    /// Repository root (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// Config file (defaults to <root>/monobuild.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean-install dependencies for every project
    Install,

    /// Build a single project
    Build {
        /// Project name (e.g., client, author, admin)
        project: Option<String>,
    },

    /// Copy every project's build output into the output directory
    Collect {
        /// Clear each project's destination before copying
        #[arg(long)]
        clean: bool,
    },

    /// Install, build every project, then collect
    All {
        /// Clear each project's destination before copying
        #[arg(long)]
        clean: bool,
    },

    /// Show install and build state for every project
    Status,
}

pub fn run(cli: Cli) -> Result<()> {
    // Checked before anything touches the filesystem
    if let Commands::Build { project: None } = &cli.command {
        return Err(PipelineError::MissingArgument.into());
    }

    let root = match &cli.root {
        Some(input) => RootDir::from_user_input(input)?,
        None => RootDir::current()?,
    };
    let config = Config::load(root.as_path(), cli.config.as_deref())?;
    tracing::debug!(root = %root, config = ?config.source, "resolved pipeline");

    let pipeline = Pipeline::new(root.as_path(), config.pipeline);

    match cli.command {
        Commands::Install => pipeline::install_all(&pipeline)?,
        Commands::Build { project } => {
            let name = project.ok_or(PipelineError::MissingArgument)?;
            pipeline::build_project(&pipeline, &name)?;
        }
        Commands::Collect { clean } => {
            pipeline::collect_all(&pipeline, clean || pipeline.config().clean)?;
        }
        Commands::All { clean } => {
            pipeline.run_all(clean || pipeline.config().clean)?;
        }
        Commands::Status => print_status(&pipeline),
    }

    Ok(())
}

fn print_status(pipeline: &Pipeline) {
    let projects = pipeline.catalog().all();
    println!(
        "{} project{} in {}:\n",
        projects.len(),
        if projects.len() == 1 { "" } else { "s" },
        pipeline.root().display()
    );

    for project in projects {
        let state = state::get_project_state(pipeline.root(), project);
        let mark = |ok: bool| if ok { "✓" } else { "✗" };

        println!("  • {}", state.name);
        println!("      directory     {}", mark(state.has_directory));
        println!("      manifest      {}", mark(state.has_manifest));
        println!("      dependencies  {}", mark(state.dependencies_installed));
        if !state.missing_required.is_empty() {
            println!("      missing       {}", state.missing_required.join(", "));
        }
        println!("      build output  {}", mark(state.has_build_output));
        match &state.last_build {
            Some(record) => println!("      last build    {:?} at {}", record.status, record.when()),
            None => println!("      last build    never"),
        }
        println!("      ready         {}", mark(state.is_buildable()));
    }
}
