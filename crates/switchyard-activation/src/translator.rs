//! Activation of a provider profile into environment state

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use switchyard_providers::{ProviderRegistry, ProviderType};
use tracing::{debug, info, warn};

use crate::env::EnvironmentSink;
use crate::error::{ActivationError, Result};
use crate::policy::{env_vars_for, CUSTOM_HEADER_PREFIX, MANAGED_VARS};
use crate::transcript::TranscriptWriter;

/// Outcome of a successful activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationResult {
    pub provider_name: String,
    pub provider_type: ProviderType,
    /// Every variable exported for this provider
    pub vars: BTreeMap<String, String>,
}

/// Translates a chosen profile into environment variables and applies them.
///
/// Only one activation may be applied at a time; a concurrent call is
/// rejected with [`ActivationError::InProgress`] instead of interleaving.
pub struct ActivationTranslator {
    sink: Arc<dyn EnvironmentSink>,
    transcript: Option<TranscriptWriter>,
    current: Mutex<Option<ActivationResult>>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the activation finishes, even on early return
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ActivationTranslator {
    pub fn new(sink: Arc<dyn EnvironmentSink>) -> Self {
        Self {
            sink,
            transcript: None,
            current: Mutex::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Write an activation transcript after every activation
    pub fn with_transcript(mut self, writer: TranscriptWriter) -> Self {
        self.transcript = Some(writer);
        self
    }

    pub fn transcript(&self) -> Option<&TranscriptWriter> {
        self.transcript.as_ref()
    }

    pub fn sink(&self) -> &Arc<dyn EnvironmentSink> {
        &self.sink
    }

    /// The last successful activation
    pub fn current(&self) -> Option<ActivationResult> {
        self.current.lock().clone()
    }

    /// Activate the named profile.
    ///
    /// The name is resolved before anything is touched, so an unknown name
    /// leaves the environment exactly as it was. Previously managed variables
    /// are removed in the same batch that sets the new ones.
    pub fn activate(
        &self,
        registry: &mut ProviderRegistry,
        name: &str,
    ) -> Result<ActivationResult> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ActivationError::InProgress);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let profile = registry
            .get(name)
            .map_err(|_| ActivationError::NotFound(name.to_string()))?
            .clone();

        let vars = env_vars_for(&profile);
        let removals = self.removals();
        debug!(
            provider = %profile.name,
            removed = removals.len(),
            exported = vars.len(),
            "Applying provider environment"
        );
        self.sink.apply(&removals, &vars);
        registry.set_current(&profile.name)?;

        let result = ActivationResult {
            provider_name: profile.name.clone(),
            provider_type: profile.provider_type,
            vars,
        };
        *self.current.lock() = Some(result.clone());

        if let Some(writer) = &self.transcript {
            match writer.write(&profile, &result.vars) {
                Ok(()) => debug!(path = %writer.path().display(), "Wrote activation transcript"),
                Err(e) => warn!(
                    path = %writer.path().display(),
                    error = %e,
                    "Failed to write activation transcript"
                ),
            }
        }

        info!(provider = %profile.name, kind = %profile.provider_type, "Activated provider");
        Ok(result)
    }

    /// Variables to clear: the fixed managed set, any custom header variable
    /// and whatever the previous activation exported
    fn removals(&self) -> Vec<String> {
        let mut removals: Vec<String> = MANAGED_VARS.iter().map(|v| v.to_string()).collect();
        removals.extend(self.sink.keys_with_prefix(CUSTOM_HEADER_PREFIX));
        if let Some(previous) = self.current.lock().as_ref() {
            removals.extend(previous.vars.keys().cloned());
        }
        removals.sort();
        removals.dedup();
        removals
    }
}
