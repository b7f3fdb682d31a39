//! Terminal discovery and ordering

use std::path::PathBuf;

use tracing::debug;

use crate::candidates::{TerminalCandidate, KNOWN_TERMINALS};
use crate::desktop::DesktopEnvironment;

/// Looks up executables by name
pub trait ExecutableLocator: Send + Sync {
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// Searches `PATH` with the `which` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct WhichLocator;

impl ExecutableLocator for WhichLocator {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

/// Orders installed terminals for the current desktop
pub struct TerminalResolver {
    locator: Box<dyn ExecutableLocator>,
    desktop: DesktopEnvironment,
}

impl TerminalResolver {
    pub fn new(locator: Box<dyn ExecutableLocator>, desktop: DesktopEnvironment) -> Self {
        Self { locator, desktop }
    }

    /// Resolver for the real system: `PATH` lookup and detected desktop
    pub fn system() -> Self {
        Self::new(Box::new(WhichLocator), DesktopEnvironment::detect())
    }

    pub fn desktop(&self) -> DesktopEnvironment {
        self.desktop
    }

    /// Installed terminals in discovery order
    pub fn discover(&self) -> Vec<&'static TerminalCandidate> {
        KNOWN_TERMINALS
            .iter()
            .filter(|candidate| {
                let found = self.locator.locate(candidate.name).is_some();
                debug!(terminal = candidate.name, found, "Probed terminal");
                found
            })
            .collect()
    }

    /// Installed terminals, desktop preferences first, then the rest in
    /// discovery order
    pub fn resolve(&self) -> Vec<&'static TerminalCandidate> {
        let discovered = self.discover();
        let preferred = self.desktop.preferred_terminals();

        let mut ordered: Vec<&'static TerminalCandidate> = preferred
            .iter()
            .filter_map(|name| discovered.iter().copied().find(|c| c.name == *name))
            .collect();
        for candidate in discovered {
            if !ordered.iter().any(|c| c.name == candidate.name) {
                ordered.push(candidate);
            }
        }

        debug!(
            desktop = %self.desktop,
            candidates = ?ordered.iter().map(|c| c.name).collect::<Vec<_>>(),
            "Resolved terminal order"
        );
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Installed(HashSet<&'static str>);

    impl ExecutableLocator for Installed {
        fn locate(&self, program: &str) -> Option<PathBuf> {
            self.0
                .contains(program)
                .then(|| PathBuf::from("/usr/bin").join(program))
        }
    }

    fn resolver(installed: &[&'static str], desktop: DesktopEnvironment) -> TerminalResolver {
        TerminalResolver::new(
            Box::new(Installed(installed.iter().copied().collect())),
            desktop,
        )
    }

    fn names(list: Vec<&'static TerminalCandidate>) -> Vec<&'static str> {
        list.into_iter().map(|c| c.name).collect()
    }

    #[test]
    fn test_nothing_installed() {
        assert!(resolver(&[], DesktopEnvironment::Gnome).resolve().is_empty());
    }

    #[test]
    fn test_discovery_order() {
        let r = resolver(&["xterm", "konsole", "alacritty"], DesktopEnvironment::Unknown);
        assert_eq!(names(r.discover()), vec!["konsole", "alacritty", "xterm"]);
    }

    #[test]
    fn test_preferred_terminals_first() {
        let r = resolver(&["xterm", "alacritty", "konsole"], DesktopEnvironment::Kde);
        assert_eq!(names(r.resolve()), vec!["konsole", "xterm", "alacritty"]);

        let r = resolver(&["xterm", "alacritty", "xfce4-terminal"], DesktopEnvironment::Xfce);
        assert_eq!(names(r.resolve()), vec!["xfce4-terminal", "xterm", "alacritty"]);
    }

    #[test]
    fn test_unlisted_preference_ignored() {
        // unity-terminal is preferred on ubuntu-unity but is not a known candidate
        let r = resolver(&["unity-terminal", "xterm"], DesktopEnvironment::UbuntuUnity);
        assert_eq!(names(r.resolve()), vec!["xterm"]);
    }
}
