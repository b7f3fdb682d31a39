//! Known terminal emulators and how to hand them a command

/// How a terminal receives the shell payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    /// Passed as `bash -c <payload>` after the invocation prefix
    Inline,
    /// Written to an executable script and the script path passed instead
    ScriptFile,
}

/// A terminal emulator the launcher knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCandidate {
    /// Name probed for on `PATH`
    pub name: &'static str,
    /// Argument vector prefix; the first element is the executable
    pub invocation: &'static [&'static str],
    pub payload_mode: PayloadMode,
}

impl TerminalCandidate {
    const fn inline(name: &'static str, invocation: &'static [&'static str]) -> Self {
        Self {
            name,
            invocation,
            payload_mode: PayloadMode::Inline,
        }
    }

    pub fn program(&self) -> &'static str {
        self.invocation.first().copied().unwrap_or(self.name)
    }

    /// Full argument list (excluding the program) for the given payload
    ///
    /// For [`PayloadMode::ScriptFile`] the payload is the script path.
    pub fn arguments(&self, shell: &str, payload: &str) -> Vec<String> {
        let mut args: Vec<String> = self.invocation.iter().skip(1).map(|a| a.to_string()).collect();
        match self.payload_mode {
            PayloadMode::Inline => {
                args.push(shell.to_string());
                args.push("-c".to_string());
                args.push(payload.to_string());
            }
            PayloadMode::ScriptFile => args.push(payload.to_string()),
        }
        args
    }

    pub fn find(name: &str) -> Option<&'static TerminalCandidate> {
        KNOWN_TERMINALS.iter().find(|c| c.name == name)
    }
}

/// Every supported terminal, in discovery order
pub static KNOWN_TERMINALS: &[TerminalCandidate] = &[
    TerminalCandidate::inline("x-terminal-emulator", &["x-terminal-emulator", "-e"]),
    TerminalCandidate::inline("sensible-terminal", &["sensible-terminal", "-e"]),
    TerminalCandidate::inline("gnome-terminal", &["gnome-terminal", "--"]),
    TerminalCandidate::inline("gnome-terminal-server", &["gnome-terminal", "--"]),
    TerminalCandidate {
        name: "xfce4-terminal",
        invocation: &["xfce4-terminal", "-e"],
        payload_mode: PayloadMode::ScriptFile,
    },
    TerminalCandidate::inline("konsole", &["konsole", "-e"]),
    TerminalCandidate::inline("mate-terminal", &["mate-terminal", "-e"]),
    TerminalCandidate::inline("tilix", &["tilix", "-e"]),
    TerminalCandidate::inline("terminator", &["terminator", "-e"]),
    TerminalCandidate::inline("alacritty", &["alacritty", "-e"]),
    TerminalCandidate::inline("kitty", &["kitty"]),
    TerminalCandidate::inline("lxterminal", &["lxterminal", "-e"]),
    TerminalCandidate::inline("xterm", &["xterm", "-hold", "-e"]),
    TerminalCandidate::inline("urxvt", &["urxvt", "-hold", "-e"]),
    TerminalCandidate::inline("rxvt", &["rxvt", "-hold", "-e"]),
    TerminalCandidate::inline("sakura", &["sakura", "-e"]),
    TerminalCandidate::inline("qterminal", &["qterminal", "-e"]),
    TerminalCandidate::inline("deepin-terminal", &["deepin-terminal", "-e"]),
    TerminalCandidate::inline("terminology", &["terminology", "-e"]),
    TerminalCandidate::inline("st", &["st", "-e"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_arguments() {
        let xterm = TerminalCandidate::find("xterm").unwrap();
        assert_eq!(xterm.program(), "xterm");
        assert_eq!(
            xterm.arguments("bash", "echo hi"),
            vec!["-hold", "-e", "bash", "-c", "echo hi"]
        );

        let kitty = TerminalCandidate::find("kitty").unwrap();
        assert_eq!(kitty.arguments("bash", "x"), vec!["bash", "-c", "x"]);
    }

    #[test]
    fn test_gnome_terminal_server_uses_client() {
        let server = TerminalCandidate::find("gnome-terminal-server").unwrap();
        assert_eq!(server.program(), "gnome-terminal");
        assert_eq!(server.arguments("bash", "p")[0], "--");
    }

    #[test]
    fn test_xfce_takes_script_path() {
        let xfce = TerminalCandidate::find("xfce4-terminal").unwrap();
        assert_eq!(xfce.payload_mode, PayloadMode::ScriptFile);
        assert_eq!(xfce.arguments("bash", "/tmp/a.sh"), vec!["-e", "/tmp/a.sh"]);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = KNOWN_TERMINALS.iter().map(|c| c.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), KNOWN_TERMINALS.len());
    }
}
