//! Activation transcript: a shell script reproducing the exported variables

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use switchyard_providers::{ProviderProfile, ProviderType};

/// Default file name the transcript is written to
pub const DEFAULT_TRANSCRIPT_FILE: &str = "activate_provider.sh";

/// Escape a value for use inside a double-quoted shell string
pub fn escape_double_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Collapse control characters so the text stays on one script line
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Render the transcript script for an activated profile
pub fn render(profile: &ProviderProfile, vars: &BTreeMap<String, String>) -> String {
    let name = single_line(&profile.name);
    let mut script = String::from("#!/bin/bash\n");
    script.push_str(&format!("# Provider activation script - {}\n", name));
    script.push_str(&format!("# Provider type: {}\n\n", profile.provider_type));

    for (key, value) in vars {
        script.push_str(&format!("export {}=\"{}\"\n", key, escape_double_quoted(value)));
    }
    script.push('\n');

    match profile.provider_type {
        ProviderType::CustomAnthropic => {
            script.push_str("# Claude-compatible proxy:\n");
            script.push_str("# - uses ANTHROPIC_AUTH_TOKEN instead of ANTHROPIC_API_KEY\n");
            script.push_str("# - model variables are only exported when a model is pinned\n");
        }
        ProviderType::OpenRouter => {
            script.push_str("# OpenRouter:\n");
            script.push_str("# - model names must be given explicitly\n");
        }
        ProviderType::Moonshot => {
            script.push_str("# Moonshot:\n");
            script.push_str("# - Claude-compatible format\n");
            script.push_str("# - model name is optional\n");
        }
        _ => {}
    }

    script.push_str(&format!(
        "echo \"Activated provider {}\"\n",
        escape_double_quoted(&name)
    ));
    script.push_str("echo \"The claude command can now be used directly\"\n");
    script
}

/// Writes the transcript to a fixed path, overwriting it on every activation
#[derive(Debug, Clone)]
pub struct TranscriptWriter {
    path: PathBuf,
}

impl TranscriptWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(
        &self,
        profile: &ProviderProfile,
        vars: &BTreeMap<String, String>,
    ) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, render(profile, vars))
    }
}

impl Default for TranscriptWriter {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSCRIPT_FILE)
    }
}
