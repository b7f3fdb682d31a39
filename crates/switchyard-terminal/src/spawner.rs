//! Detached process spawning

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

/// A terminal invocation ready to spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnCommand {
    /// Executable
    pub program: String,
    /// Arguments
    pub args: Vec<String>,
    /// Added on top of the inherited environment
    pub env: BTreeMap<String, String>,
    /// Working directory (None = current dir)
    pub working_dir: Option<PathBuf>,
}

impl SpawnCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
            env: BTreeMap::new(),
            working_dir: None,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn envs(mut self, env: &BTreeMap<String, String>) -> Self {
        self.env.extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn working_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.working_dir = dir;
        self
    }
}

/// Starts terminal processes
#[async_trait]
pub trait TerminalSpawner: Send + Sync {
    /// Start the process without waiting for it to exit
    async fn spawn(&self, command: &SpawnCommand) -> io::Result<()>;
}

/// Spawns real processes with tokio
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessSpawner;

#[async_trait]
impl TerminalSpawner for ProcessSpawner {
    async fn spawn(&self, command: &SpawnCommand) -> io::Result<()> {
        debug!(program = %command.program, args = command.args.len(), "Spawning terminal");

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .envs(&command.env)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn()?;
        info!(pid = ?child.id(), program = %command.program, "Terminal spawned");

        // Reap the child whenever it exits; nobody waits on it
        tokio::spawn(async move {
            let _ = child.wait().await;
        });
        Ok(())
    }
}
