//! External tool invocation
//!
//! Every package manager, compiler, cloud CLI and test runner is started
//! through a [`ToolRunner`]. Invocations carry their own working directory,
//! so nothing here touches the process-wide current directory.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::ToolError;

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// `program arg1 arg2 ...` for logs and error messages
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Executes external tools
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run the invocation to completion; non-zero exit is an error
    async fn run(&self, invocation: &ToolInvocation) -> Result<(), ToolError>;
}

/// Runs tools as child processes with inherited stdio.
///
/// The call blocks until the child exits; there is no timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl ToolRunner for SystemRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<(), ToolError> {
        let command = invocation.command_line();
        info!(command = %command, cwd = ?invocation.cwd, "running tool");

        let mut cmd = tokio::process::Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .envs(&invocation.env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(ref dir) = invocation.cwd {
            cmd.current_dir(dir);
        }

        let status = cmd.status().await.map_err(|source| ToolError::Spawn {
            command: command.clone(),
            source,
        })?;

        if status.success() {
            debug!(command = %command, "tool finished");
            Ok(())
        } else {
            Err(ToolError::Failed {
                command,
                exit_code: status.code(),
            })
        }
    }
}

/// Logs invocations instead of running them
#[derive(Debug, Default)]
pub struct DryRunRunner {
    invocations: Mutex<Vec<ToolInvocation>>,
}

impl DryRunRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything that would have been run, in order
    pub fn invocations(&self) -> Vec<ToolInvocation> {
        lock(&self.invocations).clone()
    }
}

#[async_trait]
impl ToolRunner for DryRunRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<(), ToolError> {
        info!(command = %invocation, cwd = ?invocation.cwd, "dry run: skipping tool");
        lock(&self.invocations).push(invocation.clone());
        Ok(())
    }
}

type InvocationHook = Box<dyn Fn(&ToolInvocation) + Send + Sync>;

struct FailureRule {
    needle: String,
    outcome: ScriptedFailure,
}

enum ScriptedFailure {
    Exit(i32),
    Missing,
}

/// Runner that records invocations and can be scripted to fail (useful for testing)
#[derive(Default)]
pub struct RecordingRunner {
    invocations: Mutex<Vec<ToolInvocation>>,
    failures: Vec<FailureRule>,
    hooks: Vec<InvocationHook>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `exit_code` when the command line contains `needle`
    pub fn fail_when(mut self, needle: impl Into<String>, exit_code: i32) -> Self {
        self.failures.push(FailureRule {
            needle: needle.into(),
            outcome: ScriptedFailure::Exit(exit_code),
        });
        self
    }

    /// Behave as if the program could not be started when the command line contains `needle`
    pub fn missing_when(mut self, needle: impl Into<String>) -> Self {
        self.failures.push(FailureRule {
            needle: needle.into(),
            outcome: ScriptedFailure::Missing,
        });
        self
    }

    /// Run `hook` for every invocation before the outcome is decided
    pub fn on_invoke<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ToolInvocation) + Send + Sync + 'static,
    {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn invocations(&self) -> Vec<ToolInvocation> {
        lock(&self.invocations).clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .map(ToolInvocation::command_line)
            .collect()
    }
}

impl fmt::Debug for RecordingRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingRunner")
            .field("invocations", &lock(&self.invocations).len())
            .field("failures", &self.failures.len())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

#[async_trait]
impl ToolRunner for RecordingRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<(), ToolError> {
        lock(&self.invocations).push(invocation.clone());
        for hook in &self.hooks {
            hook(invocation);
        }

        let command = invocation.command_line();
        match self.failures.iter().find(|rule| command.contains(&rule.needle)) {
            Some(FailureRule {
                outcome: ScriptedFailure::Exit(code),
                ..
            }) => Err(ToolError::Failed {
                command,
                exit_code: Some(*code),
            }),
            Some(FailureRule {
                outcome: ScriptedFailure::Missing,
                ..
            }) => Err(ToolError::Spawn {
                command,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
            }),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
