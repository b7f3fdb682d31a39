//! Configuration document types

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use switchyard_activation::DEFAULT_TRANSCRIPT_FILE;
use switchyard_providers::{ProviderProfile, ProviderRegistry, ProviderType};
use switchyard_terminal::cleanup::DEFAULT_CLEANUP_DELAY;
use switchyard_terminal::{DEFAULT_SHELL, DEFAULT_TARGET_COMMAND};

use crate::error::{ConfigError, Result};

/// The whole `providers.json` document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ConfigDocument {
    /// Named working directories offered when launching
    #[serde(default)]
    pub project_directories: Vec<ProjectDirectory>,
    /// Provider profiles in priority-independent file order
    #[serde(default)]
    pub providers: Vec<ProviderProfile>,
    #[serde(default)]
    pub settings: Settings,
}

/// A named working directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectDirectory {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub description: String,
}

impl ProjectDirectory {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            description: description.into(),
        }
    }
}

/// Activation and launch settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Where the activation transcript is written; relative paths sit next
    /// to the configuration file
    pub transcript_path: PathBuf,
    /// Tool started by auto launches
    pub target_command: String,
    /// Shell the terminal runs
    pub shell: String,
    /// Seconds a terminal gets to read its launch script
    pub script_cleanup_delay_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transcript_path: PathBuf::from(DEFAULT_TRANSCRIPT_FILE),
            target_command: DEFAULT_TARGET_COMMAND.to_string(),
            shell: DEFAULT_SHELL.to_string(),
            script_cleanup_delay_secs: DEFAULT_CLEANUP_DELAY.as_secs(),
        }
    }
}

impl Settings {
    pub fn script_cleanup_delay(&self) -> Duration {
        Duration::from_secs(self.script_cleanup_delay_secs)
    }
}

impl ConfigDocument {
    /// Starter document written when no configuration exists yet
    pub fn starter() -> Self {
        Self {
            project_directories: Vec::new(),
            providers: vec![
                ProviderProfile::new(
                    "openrouter",
                    ProviderType::OpenRouter,
                    "https://openrouter.ai/api",
                    "YOUR_OPENROUTER_API_KEY",
                    "moonshotai/kimi-k2:free",
                )
                .with_header("x-api-key", "YOUR_OPENROUTER_API_KEY")
                .with_priority(1),
                ProviderProfile::new(
                    "custom_anthropic",
                    ProviderType::CustomAnthropic,
                    "https://anthropic-proxy.example.com/",
                    "YOUR_PROXY_TOKEN",
                    "auto",
                )
                .with_priority(2),
                ProviderProfile::new(
                    "deepseek",
                    ProviderType::DeepSeek,
                    "https://api.deepseek.com/anthropic",
                    "YOUR_DEEPSEEK_API_KEY",
                    "deepseek-chat",
                )
                .with_priority(3),
                ProviderProfile::new(
                    "moonshot",
                    ProviderType::Moonshot,
                    "https://api.moonshot.cn/anthropic",
                    "YOUR_MOONSHOT_API_KEY",
                    "moonshot-v1-8k",
                )
                .with_priority(4),
            ],
            settings: Settings::default(),
        }
    }

    /// Check every profile and the uniqueness of provider and project names
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for profile in &self.providers {
            profile.validate()?;
            if !names.insert(profile.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate provider name: {}",
                    profile.name
                )));
            }
        }

        let mut projects = HashSet::new();
        for project in &self.project_directories {
            if project.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Project directory name must not be empty".to_string(),
                ));
            }
            if !projects.insert(project.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate project directory: {}",
                    project.name
                )));
            }
        }
        Ok(())
    }

    /// Append a project directory unless its name or path is already listed
    pub fn add_project_directory(
        &mut self,
        name: impl Into<String>,
        path: impl Into<String>,
        description: impl Into<String>,
    ) -> bool {
        let project = ProjectDirectory::new(name, path, description);
        if self
            .project_directories
            .iter()
            .any(|p| p.name == project.name || p.path == project.path)
        {
            return false;
        }
        self.project_directories.push(project);
        true
    }

    pub fn project(&self, name: &str) -> Option<&ProjectDirectory> {
        self.project_directories.iter().find(|p| p.name == name)
    }

    /// Registry holding this document's providers
    pub fn to_registry(&self) -> Result<ProviderRegistry> {
        Ok(ProviderRegistry::from_profiles(self.providers.clone())?)
    }
}
