/// Child-process execution for package-manager and build commands
///
/// The working directory is always handed to the child explicitly; the
/// orchestrator's own current directory is never changed.
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

/// Programs the pipeline is allowed to launch
const ALLOWED_COMMANDS: &[&str] = &[
    "npm", "npx", "pnpm", "yarn", "bun", "node",
    "sh", "bash", // Allowed for shell mode
];

/// Whether the pipeline may launch `program`
pub fn is_allowed(program: &str) -> bool {
    ALLOWED_COMMANDS.contains(&program)
}

pub fn allowed_commands() -> &'static [&'static str] {
    ALLOWED_COMMANDS
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Command '{program}' not in whitelist. Allowed: {allowed:?}", allowed = ALLOWED_COMMANDS)]
    NotAllowed { program: String },

    #[error("Working directory is not usable: {}", .path.display())]
    WorkingDirectory { path: PathBuf },

    #[error("Failed to execute command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Command '{command}' failed with exit code: {}", .code.map_or("signal".to_string(), |c| c.to_string()))]
    Exit { command: String, code: Option<i32> },
}

/// Builder for a whitelisted command with inherited stdio
#[derive(Clone, Debug)]
pub struct CommandBuilder {
    command: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    env_vars: BTreeMap<String, String>,
}

impl CommandBuilder {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            working_dir: None,
            env_vars: BTreeMap::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set working directory
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Override environment variables; everything else is inherited
    pub fn envs<'a>(mut self, vars: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        for (key, value) in vars {
            self.env_vars.insert(key.clone(), value.clone());
        }
        self
    }

    /// Human-readable command line for progress output
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }

    fn validate(&self) -> Result<(), ExecError> {
        if !is_allowed(&self.command) {
            return Err(ExecError::NotAllowed {
                program: self.command.clone(),
            });
        }

        if let Some(dir) = &self.working_dir {
            if !dir.is_dir() {
                return Err(ExecError::WorkingDirectory { path: dir.clone() });
            }
        }

        Ok(())
    }

    /// Run the command with inherited stdin/stdout/stderr and wait for it.
    ///
    /// The user sees the child's output live; nothing is captured.
    pub fn execute_interactive(&self) -> Result<(), ExecError> {
        self.validate()?;

        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        tracing::debug!(command = %self.display(), cwd = ?self.working_dir, "spawning");

        let status = cmd.status().map_err(|source| {
            // A cwd that vanished between validation and spawn surfaces as NotFound
            match &self.working_dir {
                Some(dir) if source.kind() == io::ErrorKind::NotFound && !dir.is_dir() => {
                    ExecError::WorkingDirectory { path: dir.clone() }
                }
                _ => ExecError::Spawn {
                    command: self.display(),
                    source,
                },
            }
        })?;

        if !status.success() {
            return Err(ExecError::Exit {
                command: self.display(),
                code: status.code(),
            });
        }

        Ok(())
    }
}
