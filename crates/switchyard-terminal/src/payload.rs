//! Shell payload run inside the launched terminal

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use switchyard_activation::transcript::escape_double_quoted;
use switchyard_activation::ENV_PREFIX;

pub const DEFAULT_TARGET_COMMAND: &str = "claude";
pub const DEFAULT_SHELL: &str = "bash";

const SETUP_BLOCK: &str = r#"
source ~/.bashrc 2>/dev/null || source ~/.profile 2>/dev/null || true

export NVM_DIR="$HOME/.nvm"
[ -s "$NVM_DIR/nvm.sh" ] && . "$NVM_DIR/nvm.sh"
[ -s "$NVM_DIR/bash_completion" ] && . "$NVM_DIR/bash_completion"
"#;

/// Builds the command string a terminal runs through `bash -c`
#[derive(Debug, Clone)]
pub struct ShellPayload {
    env: BTreeMap<String, String>,
    working_dir: Option<PathBuf>,
    command: Option<String>,
    auto: bool,
    target: String,
    shell: String,
}

impl ShellPayload {
    pub fn new() -> Self {
        Self {
            env: BTreeMap::new(),
            working_dir: None,
            command: None,
            auto: false,
            target: DEFAULT_TARGET_COMMAND.to_string(),
            shell: DEFAULT_SHELL.to_string(),
        }
    }

    /// Variables to export; only the `ANTHROPIC_` namespace is kept
    pub fn env(mut self, env: &BTreeMap<String, String>) -> Self {
        self.env = env
            .iter()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Start the target tool automatically instead of leaving a prompt
    pub fn auto(mut self, auto: bool) -> Self {
        self.auto = auto;
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn shell_name(&self) -> &str {
        &self.shell
    }

    pub fn build(&self) -> String {
        let mut out = String::new();

        for (key, value) in &self.env {
            out.push_str(&format!("export {}=\"{}\"; ", key, escape_double_quoted(value)));
        }
        if let Some(dir) = &self.working_dir {
            out.push_str(&format!("cd \"{}\"; ", escape_path(dir)));
        }

        out.push_str(SETUP_BLOCK);

        if self.auto {
            out.push_str(&self.auto_block());
        } else {
            out.push_str(&self.interactive_block());
        }
        out
    }

    /// Script file contents for terminals that take a path
    pub fn build_script(&self) -> String {
        format!("#!/bin/{}\n{}", self.shell, self.build())
    }

    fn auto_block(&self) -> String {
        let target = &self.target;
        let shell = &self.shell;
        format!(
            r#"
echo "Starting {target}..."
echo "Working directory: $(pwd)"
if command -v {target} >/dev/null 2>&1; then
    {target} || (echo "{target} exited with an error" && sleep 3)
else
    echo "{target} not found on PATH, trying nvm default"
    nvm use default >/dev/null 2>&1 || true
    if command -v {target} >/dev/null 2>&1; then
        {target} || (echo "{target} exited with an error" && sleep 3)
    else
        echo "Environment is ready; run {target} once it is installed"
    fi
fi
exec {shell}
"#
        )
    }

    fn interactive_block(&self) -> String {
        let mut block = format!(
            r#"
echo "Environment ready for {target}"
env | grep {prefix} | cut -d= -f1
echo
"#,
            target = self.target,
            prefix = ENV_PREFIX,
        );
        match &self.command {
            Some(command) => block.push_str(&format!("{}; {}", command, self.shell)),
            None => block.push_str(&self.shell),
        }
        block
    }
}

impl Default for ShellPayload {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_path(path: &Path) -> String {
    escape_double_quoted(&path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("ANTHROPIC_API_KEY".to_string(), "sk-\"$x\"".to_string()),
            ("ANTHROPIC_BASE_URL".to_string(), "https://api".to_string()),
            ("PATH".to_string(), "/usr/bin".to_string()),
        ])
    }

    #[test]
    fn test_exports_only_namespace_and_escapes() {
        let payload = ShellPayload::new().env(&env()).build();
        assert!(payload.starts_with(concat!(
            "export ANTHROPIC_API_KEY=\"sk-\\\"\\$x\\\"\"; ",
            "export ANTHROPIC_BASE_URL=\"https://api\"; "
        )));
        assert!(!payload.contains("export PATH"));
    }

    #[test]
    fn test_working_dir_follows_exports() {
        let payload = ShellPayload::new()
            .env(&env())
            .working_dir("/home/me/my project")
            .build();
        let cd = payload.find("cd \"/home/me/my project\"; ").unwrap();
        let last_export = payload.rfind("export ANTHROPIC_").unwrap();
        assert!(cd > last_export);
        assert!(payload.find("source ~/.bashrc").unwrap() > cd);
    }

    #[test]
    fn test_interactive_with_and_without_command() {
        let plain = ShellPayload::new().build();
        assert!(plain.contains("NVM_DIR"));
        assert!(plain.ends_with("bash"));
        assert!(!plain.contains("exec bash"));

        let with_cmd = ShellPayload::new().command("make test").build();
        assert!(with_cmd.ends_with("make test; bash"));
    }

    #[test]
    fn test_auto_runs_target_then_shell() {
        let payload = ShellPayload::new()
            .auto(true)
            .command("ignored")
            .target("claude-dev")
            .build();
        assert!(payload.contains("command -v claude-dev"));
        assert!(payload.contains("nvm use default"));
        assert!(payload.trim_end().ends_with("exec bash"));
        assert!(!payload.contains("ignored"));
    }

    #[test]
    fn test_script_has_shebang() {
        let script = ShellPayload::new().shell("zsh").build_script();
        assert!(script.starts_with("#!/bin/zsh\n"));
        assert!(script.ends_with("zsh"));
    }
}
