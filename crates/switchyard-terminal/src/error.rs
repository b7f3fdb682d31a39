//! Error types for terminal launching

use std::fmt;

use thiserror::Error;

/// One failed attempt to start a terminal candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchAttempt {
    pub terminal: String,
    pub error: String,
}

impl fmt::Display for LaunchAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.terminal, self.error)
    }
}

/// Launch errors
#[derive(Debug, Error)]
pub enum LaunchError {
    /// No known terminal emulator is installed
    #[error("No usable terminal emulator found")]
    NoTerminalFound,

    /// Every discovered terminal failed to start
    #[error("All terminals failed to start: {}", summarize(.attempts))]
    AllCandidatesFailed { attempts: Vec<LaunchAttempt> },
}

fn summarize(attempts: &[LaunchAttempt]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for launch operations
pub type Result<T> = std::result::Result<T, LaunchError>;
