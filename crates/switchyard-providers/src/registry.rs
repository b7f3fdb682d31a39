//! In-memory registry of provider profiles

use tracing::debug;

use crate::error::{ProviderError, Result};
use crate::profile::ProviderProfile;

/// Registry owning the configured provider profiles.
///
/// Profiles keep their insertion order; selection tie-breaks rely on it.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    profiles: Vec<ProviderProfile>,
    current: Option<String>,
}

impl ProviderRegistry {
    /// Create a new empty provider registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from already-parsed profiles, rejecting duplicates
    pub fn from_profiles(profiles: impl IntoIterator<Item = ProviderProfile>) -> Result<Self> {
        let mut registry = Self::new();
        for profile in profiles {
            registry.register(profile)?;
        }
        Ok(registry)
    }

    /// Register a new profile
    pub fn register(&mut self, profile: ProviderProfile) -> Result<()> {
        profile.validate()?;
        if self.has_provider(&profile.name) {
            return Err(ProviderError::DuplicateName(profile.name));
        }
        debug!(provider = %profile.name, kind = %profile.provider_type, "Registered provider");
        self.profiles.push(profile);
        Ok(())
    }

    /// Replace the whole record of an existing profile; the name cannot change
    pub fn update(&mut self, name: &str, profile: ProviderProfile) -> Result<()> {
        if profile.name != name {
            return Err(ProviderError::NameChange {
                from: name.to_string(),
                to: profile.name,
            });
        }
        profile.validate()?;
        let slot = self
            .profiles
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| ProviderError::NotFound(name.to_string()))?;
        *slot = profile;
        Ok(())
    }

    /// Remove a profile by name, returning it
    pub fn unregister(&mut self, name: &str) -> Result<ProviderProfile> {
        let index = self
            .profiles
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| ProviderError::NotFound(name.to_string()))?;
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        Ok(self.profiles.remove(index))
    }

    /// Get a profile by name
    pub fn get(&self, name: &str) -> Result<&ProviderProfile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ProviderError::NotFound(name.to_string()))
    }

    /// All profiles in insertion order
    pub fn profiles(&self) -> &[ProviderProfile] {
        &self.profiles
    }

    /// All profile names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.name.clone()).collect()
    }

    /// Check if a profile is registered
    pub fn has_provider(&self, name: &str) -> bool {
        self.profiles.iter().any(|p| p.name == name)
    }

    pub fn provider_count(&self) -> usize {
        self.profiles.len()
    }

    /// Name of the currently active profile
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Mark a registered profile as current
    pub fn set_current(&mut self, name: &str) -> Result<()> {
        if !self.has_provider(name) {
            return Err(ProviderError::NotFound(name.to_string()));
        }
        self.current = Some(name.to_string());
        Ok(())
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }
}
