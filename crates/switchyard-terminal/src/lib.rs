//! Switchyard terminal - opens a terminal emulator with an activated environment
//!
//! The resolver orders the terminal emulators installed on this machine by
//! what the current desktop prefers. The orchestrator hands each one a shell
//! payload that re-exports the provider variables, restores the user's shell
//! setup and optionally starts the target tool, stopping at the first terminal
//! that starts.

pub mod candidates;
pub mod cleanup;
pub mod desktop;
pub mod error;
pub mod launcher;
pub mod payload;
pub mod resolver;
pub mod spawner;

pub use candidates::{PayloadMode, TerminalCandidate, KNOWN_TERMINALS};
pub use desktop::{DesktopEnvironment, DesktopSignals};
pub use error::{LaunchAttempt, LaunchError, Result};
pub use launcher::{LaunchOrchestrator, LaunchReport, LaunchRequest, LaunchState};
pub use payload::{ShellPayload, DEFAULT_SHELL, DEFAULT_TARGET_COMMAND};
pub use resolver::{ExecutableLocator, TerminalResolver, WhichLocator};
pub use spawner::{ProcessSpawner, SpawnCommand, TerminalSpawner};
