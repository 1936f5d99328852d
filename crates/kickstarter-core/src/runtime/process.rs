//! Shell command execution with streamed output
//!
//! Commands block the workflow until the child exits. No timeout is applied:
//! a hanging package manager hangs the install.

use crate::error::{KickstartError, Result};
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// One or more commands joined with and-then semantics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    commands: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl ShellCommand {
    pub fn new<S: Into<String>>(commands: impl IntoIterator<Item = S>) -> Self {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
            working_dir: None,
        }
    }

    /// Run the commands from `dir` instead of the current directory
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// The script handed to the shell; a failing command stops the rest
    pub fn script(&self) -> String {
        self.commands.join(" && ")
    }
}

/// Runs shell commands and reports their exit code
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, command: &ShellCommand) -> Result<i32>;
}

/// Runs commands as child processes of a system shell
#[derive(Debug, Clone, Copy)]
pub struct ProcessRunner {
    attach_terminal: bool,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner {
    /// Attach children to the terminal when one is available
    pub fn new() -> Self {
        Self {
            attach_terminal: terminal_available(),
        }
    }

    /// Always pipe and stream child output
    pub fn piped() -> Self {
        Self {
            attach_terminal: false,
        }
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &ShellCommand) -> Result<i32> {
        let script = command.script();
        println!("{} {}", "Running:".dimmed(), script.yellow());

        let spawn_error = |source: io::Error| KickstartError::Spawn {
            command: script.clone(),
            source,
        };

        let mut cmd = shell(&script);
        if let Some(dir) = command.working_dir() {
            cmd.current_dir(dir);
        }

        if self.attach_terminal {
            let status = cmd
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .await
                .map_err(spawn_error)?;
            return Ok(status.code().unwrap_or(-1));
        }

        let mut child = cmd
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| spawn_error(io::Error::other("stdout was not captured")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| spawn_error(io::Error::other("stderr was not captured")))?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();
        let (mut stdout_open, mut stderr_open) = (true, true);

        // Stream both pipes until the child closes them
        while stdout_open || stderr_open {
            tokio::select! {
                line = stdout_reader.next_line(), if stdout_open => {
                    match line {
                        Ok(Some(line)) => println!("  {}", line),
                        Ok(None) => stdout_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stdout:".red(), e);
                            stdout_open = false;
                        }
                    }
                }
                line = stderr_reader.next_line(), if stderr_open => {
                    match line {
                        Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                        Ok(None) => stderr_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stderr:".red(), e);
                            stderr_open = false;
                        }
                    }
                }
            }
        }

        let status = child.wait().await.map_err(spawn_error)?;
        Ok(status.code().unwrap_or(-1))
    }
}

#[cfg(not(windows))]
fn shell(script: &str) -> TokioCommand {
    let mut cmd = TokioCommand::new("sh");
    cmd.arg("-c").arg(script);
    cmd
}

#[cfg(windows)]
fn shell(script: &str) -> TokioCommand {
    let mut cmd = TokioCommand::new("cmd");
    cmd.arg("/C").arg(script);
    cmd
}

/// Whether children can share our terminal
fn terminal_available() -> bool {
    !cfg!(windows) && Path::new("/dev/tty").exists() && console::user_attended()
}
