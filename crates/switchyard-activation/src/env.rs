//! Environment sinks activation writes into

use std::collections::{BTreeMap, HashMap};

use parking_lot::{Mutex, RwLock};

/// Serializes every mutation of the real process environment
static PROCESS_ENV_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Mapping interface over an environment.
///
/// [`EnvironmentSink::apply`] must perform its removals and assignments as one
/// batch: no reader going through the same sink may observe the environment
/// half way between the old and new variable sets.
pub trait EnvironmentSink: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);

    /// Names of all variables starting with `prefix`
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;

    /// Remove `removals`, then set `assignments`, as one batch
    fn apply(&self, removals: &[String], assignments: &BTreeMap<String, String>);

    /// All variables starting with `prefix`, ordered by name
    fn snapshot(&self, prefix: &str) -> BTreeMap<String, String> {
        self.keys_with_prefix(prefix)
            .into_iter()
            .filter_map(|key| self.get(&key).map(|value| (key, value)))
            .collect()
    }
}

/// The real environment of this process
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl EnvironmentSink for ProcessEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = PROCESS_ENV_LOCK.lock();
        std::env::var(key).ok()
    }

    fn set(&self, key: &str, value: &str) {
        let _guard = PROCESS_ENV_LOCK.lock();
        std::env::set_var(key, value);
    }

    fn remove(&self, key: &str) {
        let _guard = PROCESS_ENV_LOCK.lock();
        std::env::remove_var(key);
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let _guard = PROCESS_ENV_LOCK.lock();
        std::env::vars_os()
            .filter_map(|(key, _)| key.into_string().ok())
            .filter(|key| key.starts_with(prefix))
            .collect()
    }

    fn apply(&self, removals: &[String], assignments: &BTreeMap<String, String>) {
        let _guard = PROCESS_ENV_LOCK.lock();
        for key in removals {
            std::env::remove_var(key);
        }
        for (key, value) in assignments {
            std::env::set_var(key, value);
        }
    }

    fn snapshot(&self, prefix: &str) -> BTreeMap<String, String> {
        let _guard = PROCESS_ENV_LOCK.lock();
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .filter(|(key, _)| key.starts_with(prefix))
            .collect()
    }
}

/// Environment held in memory, for tests and dry runs
#[derive(Debug, Default)]
pub struct InMemoryEnvironment {
    vars: RwLock<HashMap<String, String>>,
}

impl InMemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of variables
    pub fn with_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: RwLock::new(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.vars.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.read().is_empty()
    }
}

impl EnvironmentSink for InMemoryEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.vars.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.vars.write().remove(key);
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.vars
            .read()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn apply(&self, removals: &[String], assignments: &BTreeMap<String, String>) {
        let mut vars = self.vars.write();
        for key in removals {
            vars.remove(key);
        }
        for (key, value) in assignments {
            vars.insert(key.clone(), value.clone());
        }
    }

    fn snapshot(&self, prefix: &str) -> BTreeMap<String, String> {
        self.vars
            .read()
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_in_memory_apply_is_remove_then_set() {
        let env = InMemoryEnvironment::with_vars([("A_X", "1"), ("A_Y", "2"), ("OTHER", "3")]);
        let mut assignments = BTreeMap::new();
        assignments.insert("A_X".to_string(), "10".to_string());

        env.apply(&["A_X".to_string(), "A_Y".to_string()], &assignments);

        assert_eq!(env.get("A_X").as_deref(), Some("10"));
        assert_eq!(env.get("A_Y"), None);
        assert_eq!(env.get("OTHER").as_deref(), Some("3"));
    }

    #[test]
    fn test_in_memory_snapshot_filters_prefix() {
        let env = InMemoryEnvironment::with_vars([("A_X", "1"), ("B_Y", "2")]);
        let snapshot = env.snapshot("A_");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["A_X"], "1");
    }

    #[test]
    #[serial]
    fn test_process_environment_round_trip() {
        let env = ProcessEnvironment::new();
        let key = "SWITCHYARD_TEST_ENV_ROUND_TRIP";

        env.set(key, "value");
        assert_eq!(env.get(key).as_deref(), Some("value"));
        assert!(env.keys_with_prefix("SWITCHYARD_TEST_ENV_").contains(&key.to_string()));

        env.remove(key);
        assert_eq!(env.get(key), None);
    }
}
