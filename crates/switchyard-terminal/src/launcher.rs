//! Launch orchestration
//!
//! Resolves the installed terminals, builds the shell payload once and tries
//! each terminal in order until one starts. The spawned terminal is never
//! waited on.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::candidates::{PayloadMode, TerminalCandidate};
use crate::cleanup::{self, DEFAULT_CLEANUP_DELAY};
use crate::error::{LaunchAttempt, LaunchError, Result};
use crate::payload::{ShellPayload, DEFAULT_SHELL, DEFAULT_TARGET_COMMAND};
use crate::resolver::TerminalResolver;
use crate::spawner::{ProcessSpawner, SpawnCommand, TerminalSpawner};

/// What to launch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Variables for the new session, usually the last activation
    pub env: BTreeMap<String, String>,
    pub working_dir: Option<PathBuf>,
    /// Literal command to run before the interactive shell
    pub command: Option<String>,
    /// Start the target tool automatically
    pub auto: bool,
}

impl LaunchRequest {
    pub fn new(env: BTreeMap<String, String>) -> Self {
        Self {
            env,
            ..Default::default()
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn with_auto(mut self, auto: bool) -> Self {
        self.auto = auto;
        self
    }
}

/// Outcome of a successful launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    /// Terminal that started
    pub terminal: String,
    /// Candidates that failed before it
    pub attempts: Vec<LaunchAttempt>,
    /// Launch script handed to the terminal, pending delayed removal
    pub script: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    Idle,
    BuildingPayload,
    TryingCandidate(usize),
    Spawned,
    ExhaustedFailure,
}

impl fmt::Display for LaunchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchState::Idle => f.write_str("idle"),
            LaunchState::BuildingPayload => f.write_str("building-payload"),
            LaunchState::TryingCandidate(i) => write!(f, "trying-candidate({})", i),
            LaunchState::Spawned => f.write_str("spawned"),
            LaunchState::ExhaustedFailure => f.write_str("exhausted"),
        }
    }
}

fn transition(state: &mut LaunchState, next: LaunchState) {
    debug!(from = %state, to = %next, "Launch state");
    *state = next;
}

/// Opens a terminal running a prepared shell session
pub struct LaunchOrchestrator {
    resolver: TerminalResolver,
    spawner: Arc<dyn TerminalSpawner>,
    target: String,
    shell: String,
    cleanup_delay: Duration,
    script_dir: Option<PathBuf>,
}

impl LaunchOrchestrator {
    pub fn new(resolver: TerminalResolver, spawner: Arc<dyn TerminalSpawner>) -> Self {
        Self {
            resolver,
            spawner,
            target: DEFAULT_TARGET_COMMAND.to_string(),
            shell: DEFAULT_SHELL.to_string(),
            cleanup_delay: DEFAULT_CLEANUP_DELAY,
            script_dir: None,
        }
    }

    /// Orchestrator for the real desktop
    pub fn system() -> Self {
        Self::new(TerminalResolver::system(), Arc::new(ProcessSpawner))
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn with_cleanup_delay(mut self, delay: Duration) -> Self {
        self.cleanup_delay = delay;
        self
    }

    /// Directory for launch scripts instead of the system temp directory
    pub fn with_script_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.script_dir = Some(dir.into());
        self
    }

    pub fn cleanup_delay(&self) -> Duration {
        self.cleanup_delay
    }

    pub fn resolver(&self) -> &TerminalResolver {
        &self.resolver
    }

    pub async fn launch(&self, request: &LaunchRequest) -> Result<LaunchReport> {
        let started = Instant::now();
        let mut state = LaunchState::Idle;

        let candidates = self.resolver.resolve();
        if candidates.is_empty() {
            warn!(desktop = %self.resolver.desktop(), "No terminal emulator installed");
            return Err(LaunchError::NoTerminalFound);
        }

        transition(&mut state, LaunchState::BuildingPayload);
        let payload = self.payload_for(request);

        let mut attempts = Vec::new();
        for (index, candidate) in candidates.iter().enumerate() {
            transition(&mut state, LaunchState::TryingCandidate(index));

            let mut script = None;
            let outcome = match candidate.payload_mode {
                PayloadMode::Inline => self.spawn_inline(candidate, &payload, request).await,
                PayloadMode::ScriptFile => self
                    .spawn_script(candidate, &payload, request)
                    .await
                    .map(|path| script = Some(path)),
            };
            match outcome {
                Ok(()) => {
                    transition(&mut state, LaunchState::Spawned);
                    info!(
                        terminal = candidate.name,
                        failed = attempts.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Launched terminal"
                    );
                    return Ok(LaunchReport {
                        terminal: candidate.name.to_string(),
                        attempts,
                        script,
                    });
                }
                Err(e) => {
                    debug!(terminal = candidate.name, error = %e, "Terminal failed to start");
                    attempts.push(LaunchAttempt {
                        terminal: candidate.name.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        transition(&mut state, LaunchState::ExhaustedFailure);
        warn!(tried = attempts.len(), "Every terminal failed to start");
        Err(LaunchError::AllCandidatesFailed { attempts })
    }

    fn payload_for(&self, request: &LaunchRequest) -> ShellPayload {
        let mut payload = ShellPayload::new()
            .env(&request.env)
            .auto(request.auto)
            .target(self.target.clone())
            .shell(self.shell.clone());
        if let Some(dir) = &request.working_dir {
            payload = payload.working_dir(dir.clone());
        }
        if let Some(command) = &request.command {
            payload = payload.command(command.clone());
        }
        payload
    }

    fn base_command(&self, candidate: &TerminalCandidate, request: &LaunchRequest) -> SpawnCommand {
        SpawnCommand::new(candidate.program())
            .envs(&request.env)
            .working_dir(request.working_dir.clone())
    }

    async fn spawn_inline(
        &self,
        candidate: &TerminalCandidate,
        payload: &ShellPayload,
        request: &LaunchRequest,
    ) -> std::io::Result<()> {
        let command = self
            .base_command(candidate, request)
            .args(candidate.arguments(payload.shell_name(), &payload.build()));
        self.spawner.spawn(&command).await
    }

    /// Writes a fresh script for this candidate. A write failure counts as a
    /// failed candidate, and the script is removed right away if the terminal
    /// never started.
    async fn spawn_script(
        &self,
        candidate: &TerminalCandidate,
        payload: &ShellPayload,
        request: &LaunchRequest,
    ) -> std::io::Result<PathBuf> {
        let script = cleanup::write_script(&payload.build_script(), self.script_dir.as_deref())?;
        let command = self
            .base_command(candidate, request)
            .args(candidate.arguments(&self.shell, &script.to_string_lossy()));
        match self.spawner.spawn(&command).await {
            Ok(()) => {
                cleanup::schedule_removal(script.clone(), self.cleanup_delay);
                Ok(script)
            }
            Err(e) => {
                cleanup::remove_now(&script).await;
                Err(e)
            }
        }
    }
}
