//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use tracing::{debug, info};

use crate::error::Result;
use crate::types::ConfigDocument;

/// Environment variable prefix for overrides, e.g. `SWITCHYARD_SETTINGS__SHELL`
pub const ENV_PREFIX: &str = "SWITCHYARD";

const CONFIG_FILE_NAME: &str = "providers.json";

/// Loads and saves the configuration document
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Manager for the default configuration file
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    /// Create with custom config path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use a different environment prefix for overrides
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// `<config dir>/switchyard/providers.json`
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("switchyard")
            .join(CONFIG_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load the document, writing a starter document first if none exists.
    ///
    /// Environment overrides are layered over the file and the result is
    /// validated before it is returned.
    pub fn load(&self) -> Result<ConfigDocument> {
        if !self.config_path.exists() {
            info!(path = %self.config_path.display(), "Creating starter configuration");
            self.save(&ConfigDocument::starter())?;
        }

        let builder = Config::builder()
            .add_source(File::from(self.config_path.clone()).format(FileFormat::Json))
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__"),
            );

        let document: ConfigDocument = builder.build()?.try_deserialize()?;
        document.validate()?;
        debug!(
            path = %self.config_path.display(),
            providers = document.providers.len(),
            projects = document.project_directories.len(),
            "Loaded configuration"
        );
        Ok(document)
    }

    /// Write the document as pretty JSON, creating the parent directory
    pub fn save(&self, document: &ConfigDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.config_path, json)?;
        debug!(path = %self.config_path.display(), "Saved configuration");
        Ok(())
    }

    /// Add a project directory and persist it. Returns `false` without
    /// writing when the name or path is already listed.
    pub fn add_project_directory(
        &self,
        document: &mut ConfigDocument,
        name: &str,
        path: &str,
        description: &str,
    ) -> Result<bool> {
        if !document.add_project_directory(name, path, description) {
            return Ok(false);
        }
        self.save(document)?;
        Ok(true)
    }

    /// Transcript location; relative paths resolve against the config directory
    pub fn transcript_path(&self, document: &ConfigDocument) -> PathBuf {
        let configured = &document.settings.transcript_path;
        if configured.is_absolute() {
            return configured.clone();
        }
        match self.config_path.parent() {
            Some(dir) => dir.join(configured),
            None => configured.clone(),
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
