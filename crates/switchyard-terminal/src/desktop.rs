//! Desktop environment detection

use std::fmt;

/// Environment signals used to guess the desktop environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopSignals {
    /// `XDG_CURRENT_DESKTOP`
    pub current_desktop: String,
    /// `DESKTOP_SESSION`
    pub session: String,
    /// `GDMSESSION`
    pub gdm_session: String,
}

impl DesktopSignals {
    /// Read the signals from the process environment
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).unwrap_or_default();
        Self::new(
            var("XDG_CURRENT_DESKTOP"),
            var("DESKTOP_SESSION"),
            var("GDMSESSION"),
        )
    }

    pub fn new(
        current_desktop: impl Into<String>,
        session: impl Into<String>,
        gdm_session: impl Into<String>,
    ) -> Self {
        Self {
            current_desktop: current_desktop.into().to_lowercase(),
            session: session.into().to_lowercase(),
            gdm_session: gdm_session.into().to_lowercase(),
        }
    }

    fn desktop_or_session(&self, needle: &str) -> bool {
        self.current_desktop.contains(needle) || self.session.contains(needle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopEnvironment {
    UbuntuGnome,
    UbuntuUnity,
    Ubuntu,
    Gnome,
    Xfce,
    Kde,
    Mate,
    Lxde,
    Lxqt,
    Deepin,
    Cinnamon,
    Pantheon,
    Unknown,
}

impl DesktopEnvironment {
    pub fn detect() -> Self {
        Self::from_signals(&DesktopSignals::from_env())
    }

    pub fn from_signals(signals: &DesktopSignals) -> Self {
        let has = |needle: &str| signals.desktop_or_session(needle);

        if has("ubuntu") {
            if has("gnome") {
                DesktopEnvironment::UbuntuGnome
            } else if has("unity") {
                DesktopEnvironment::UbuntuUnity
            } else {
                DesktopEnvironment::Ubuntu
            }
        } else if has("gnome") || has("unity") {
            DesktopEnvironment::Gnome
        } else if has("xfce") || signals.gdm_session.contains("xfce") {
            DesktopEnvironment::Xfce
        } else if has("kde") || signals.current_desktop.contains("plasma") {
            DesktopEnvironment::Kde
        } else if has("mate") {
            DesktopEnvironment::Mate
        } else if has("lxde") {
            DesktopEnvironment::Lxde
        } else if has("lxqt") {
            DesktopEnvironment::Lxqt
        } else if has("deepin") {
            DesktopEnvironment::Deepin
        } else if has("cinnamon") {
            DesktopEnvironment::Cinnamon
        } else if has("pantheon") {
            DesktopEnvironment::Pantheon
        } else {
            DesktopEnvironment::Unknown
        }
    }

    /// Terminals this desktop prefers, most preferred first
    pub fn preferred_terminals(&self) -> &'static [&'static str] {
        match self {
            DesktopEnvironment::Ubuntu => &[
                "x-terminal-emulator",
                "sensible-terminal",
                "gnome-terminal",
                "tilix",
                "terminator",
                "xterm",
            ],
            DesktopEnvironment::UbuntuGnome => &[
                "gnome-terminal",
                "x-terminal-emulator",
                "tilix",
                "terminator",
                "xterm",
            ],
            DesktopEnvironment::UbuntuUnity => &[
                "gnome-terminal",
                "x-terminal-emulator",
                "unity-terminal",
                "xterm",
            ],
            DesktopEnvironment::Gnome => &[
                "gnome-terminal",
                "gnome-terminal-server",
                "tilix",
                "terminator",
                "xterm",
            ],
            DesktopEnvironment::Xfce => &[
                "xfce4-terminal",
                "x-terminal-emulator",
                "xterm",
                "lxterminal",
            ],
            DesktopEnvironment::Kde => &["konsole", "x-terminal-emulator", "xterm"],
            DesktopEnvironment::Mate => &["mate-terminal", "x-terminal-emulator", "xterm"],
            DesktopEnvironment::Lxde => &["lxterminal", "x-terminal-emulator", "xterm"],
            DesktopEnvironment::Lxqt => &[
                "qterminal",
                "x-terminal-emulator",
                "lxterminal",
                "xterm",
            ],
            DesktopEnvironment::Deepin => &["deepin-terminal", "x-terminal-emulator", "xterm"],
            DesktopEnvironment::Cinnamon => &[
                "gnome-terminal",
                "x-terminal-emulator",
                "tilix",
                "xterm",
            ],
            DesktopEnvironment::Pantheon => &[
                "io.elementary.terminal",
                "gnome-terminal",
                "x-terminal-emulator",
                "xterm",
            ],
            DesktopEnvironment::Unknown => &[
                "x-terminal-emulator",
                "sensible-terminal",
                "gnome-terminal",
                "xfce4-terminal",
                "konsole",
                "xterm",
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DesktopEnvironment::UbuntuGnome => "ubuntu-gnome",
            DesktopEnvironment::UbuntuUnity => "ubuntu-unity",
            DesktopEnvironment::Ubuntu => "ubuntu",
            DesktopEnvironment::Gnome => "gnome",
            DesktopEnvironment::Xfce => "xfce",
            DesktopEnvironment::Kde => "kde",
            DesktopEnvironment::Mate => "mate",
            DesktopEnvironment::Lxde => "lxde",
            DesktopEnvironment::Lxqt => "lxqt",
            DesktopEnvironment::Deepin => "deepin",
            DesktopEnvironment::Cinnamon => "cinnamon",
            DesktopEnvironment::Pantheon => "pantheon",
            DesktopEnvironment::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DesktopEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(desktop: &str, session: &str, gdm: &str) -> DesktopEnvironment {
        DesktopEnvironment::from_signals(&DesktopSignals::new(desktop, session, gdm))
    }

    #[test]
    fn test_ubuntu_variants() {
        assert_eq!(detect("ubuntu:GNOME", "ubuntu", ""), DesktopEnvironment::UbuntuGnome);
        assert_eq!(detect("Unity", "ubuntu", ""), DesktopEnvironment::UbuntuUnity);
        assert_eq!(detect("", "ubuntu", ""), DesktopEnvironment::Ubuntu);
    }

    #[test]
    fn test_common_desktops() {
        assert_eq!(detect("GNOME", "", ""), DesktopEnvironment::Gnome);
        assert_eq!(detect("Unity", "", ""), DesktopEnvironment::Gnome);
        assert_eq!(detect("XFCE", "", ""), DesktopEnvironment::Xfce);
        assert_eq!(detect("", "", "xfce"), DesktopEnvironment::Xfce);
        assert_eq!(detect("KDE", "", ""), DesktopEnvironment::Kde);
        assert_eq!(detect("plasma", "", ""), DesktopEnvironment::Kde);
        assert_eq!(detect("MATE", "", ""), DesktopEnvironment::Mate);
        assert_eq!(detect("LXDE", "", ""), DesktopEnvironment::Lxde);
        assert_eq!(detect("LXQt", "", ""), DesktopEnvironment::Lxqt);
        assert_eq!(detect("Deepin", "", ""), DesktopEnvironment::Deepin);
        assert_eq!(detect("X-Cinnamon", "", ""), DesktopEnvironment::Cinnamon);
        assert_eq!(detect("Pantheon", "", ""), DesktopEnvironment::Pantheon);
        assert_eq!(detect("", "", ""), DesktopEnvironment::Unknown);
    }

    #[test]
    fn test_every_desktop_has_preferences() {
        assert!(!DesktopEnvironment::Unknown.preferred_terminals().is_empty());
        assert_eq!(DesktopEnvironment::Kde.preferred_terminals()[0], "konsole");
    }
}
