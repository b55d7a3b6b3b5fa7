use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// A builder for executing external commands with unified error handling
pub struct Cmd<'a> {
    command: &'a str,
    args: Vec<&'a str>,
    workdir: Option<&'a Path>,
}

impl<'a> Cmd<'a> {
    /// Create a new command builder
    pub fn new(command: &'a str) -> Self {
        Self {
            command,
            args: Vec::new(),
            workdir: None,
        }
    }

    /// Add multiple arguments
    pub fn args(mut self, args: &[&'a str]) -> Self {
        self.args.extend_from_slice(args);
        self
    }

    /// Set the working directory for the command
    pub fn workdir(mut self, path: &'a Path) -> Self {
        self.workdir = Some(path);
        self
    }

    /// Command line as typed, for messages
    pub fn display(&self) -> String {
        std::iter::once(self.command)
            .chain(self.args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Execute the command and return its output whatever the exit status.
    ///
    /// Stdin is closed so the child can't wait on the terminal while a
    /// spinner owns it. Only a failure to spawn is an error.
    pub fn output(&self) -> Result<Output> {
        let mut cmd = Command::new(self.command);
        if let Some(dir) = self.workdir {
            cmd.current_dir(dir);
        }
        debug!(command = %self.display(), "cmd:run");
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to execute command: {}", self.display()))
    }
}
