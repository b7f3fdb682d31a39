// Command handlers for the switchyard CLI

pub mod activate;
pub mod best;
pub mod check;
pub mod env;
pub mod launch;
pub mod project;
pub mod terminals;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use switchyard_activation::{
    ActivationResult, ActivationTranslator, ProcessEnvironment, TranscriptWriter,
};
use switchyard_config::{ConfigDocument, ConfigManager};
use switchyard_providers::{HealthMonitor, HttpHealthProbe, ProviderRegistry, StatusTable};

/// Everything a command needs, built from the configuration file
pub struct Context {
    pub manager: ConfigManager,
    pub document: ConfigDocument,
    pub registry: ProviderRegistry,
    pub monitor: HealthMonitor,
    pub translator: ActivationTranslator,
}

impl Context {
    /// Load the configuration and seed the monitor with one unchecked status
    /// per configured provider
    pub async fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let manager = match config_path {
            Some(path) => ConfigManager::with_path(path),
            None => ConfigManager::new(),
        };
        let document = manager
            .load()
            .with_context(|| format!("Failed to load {}", manager.path().display()))?;
        let registry = document.to_registry()?;

        let translator = ActivationTranslator::new(Arc::new(ProcessEnvironment::new()))
            .with_transcript(TranscriptWriter::new(manager.transcript_path(&document)));
        let monitor = HealthMonitor::new(Arc::new(HttpHealthProbe::new()));
        monitor.seed(registry.profiles()).await;

        Ok(Self {
            manager,
            document,
            registry,
            monitor,
            translator,
        })
    }

    /// Probe every configured provider
    pub async fn probe_all(&self) -> StatusTable {
        self.monitor.check_all(self.registry.profiles()).await
    }

    pub fn activate(&mut self, name: &str) -> Result<ActivationResult> {
        self.translator
            .activate(&mut self.registry, name)
            .with_context(|| format!("Failed to activate provider '{}'", name))
    }
}
