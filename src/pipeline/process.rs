//! External process execution.
//!
//! Every external tool the pipeline touches (compilers, `dotnet`,
//! `signtool`, the installer packager) is invoked through the
//! [`ProcessRunner`] trait so tests can substitute scripted fakes.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;

use super::error::{Error, Result};

/// A single external tool invocation.
#[derive(Clone, Debug)]
pub struct ProcessRequest {
    /// Program to run, either a bare name resolved via `PATH` or a full path.
    pub program: PathBuf,
    /// Arguments in order.
    pub args: Vec<String>,
    /// Working directory, or inherit the current one.
    pub cwd: Option<PathBuf>,
}

impl ProcessRequest {
    /// Creates a request with no working directory override.
    pub fn new(
        program: impl Into<PathBuf>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    /// Sets the working directory for the invocation.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Full command line for log output.
    pub fn display_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Program name without directory or extension.
    pub fn program_stem(&self) -> &str {
        self.program
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
    }
}

/// Captured result of a finished process.
#[derive(Clone, Debug)]
pub struct ProcessOutput {
    /// Exit code, if the process terminated normally.
    pub exit_code: Option<i32>,
    /// Interleaved stdout and stderr.
    pub combined: String,
}

impl ProcessOutput {
    /// True when the process exited with code zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs external tools to completion.
///
/// Implementations return `Err` only when the process cannot be started;
/// a nonzero exit is a successful run with a failing [`ProcessOutput`].
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Runs the request to completion and captures its output.
    async fn run(&self, request: &ProcessRequest) -> Result<ProcessOutput>;
}

/// Runner backed by real child processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, request: &ProcessRequest) -> Result<ProcessOutput> {
        let mut command = tokio::process::Command::new(&request.program);
        command
            .args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &request.cwd {
            command.current_dir(dir);
        }

        let output = command.output().await.map_err(|source| Error::Spawn {
            program: request.program.display().to_string(),
            source,
        })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            combined,
        })
    }
}
