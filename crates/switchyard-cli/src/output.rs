// Output formatting and styling

use std::io::IsTerminal;

use colored::Colorize;
use switchyard_providers::HealthStatus;

/// Output styling configuration
pub struct OutputStyle {
    pub use_colors: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            use_colors: std::io::stdout().is_terminal(),
        }
    }
}

impl OutputStyle {
    pub fn plain() -> Self {
        Self { use_colors: false }
    }

    /// Format success message
    pub fn success(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✓".green().bold(), msg)
        } else {
            format!("✓ {}", msg)
        }
    }

    /// Format error message
    pub fn error(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✗".red().bold(), msg)
        } else {
            format!("✗ {}", msg)
        }
    }

    /// Format warning message
    pub fn warning(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "⚠".yellow(), msg)
        } else {
            format!("⚠ {}", msg)
        }
    }

    /// Format info message
    pub fn info(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "ℹ".blue(), msg)
        } else {
            format!("ℹ {}", msg)
        }
    }

    /// Format a section header
    pub fn section(&self, title: &str) -> String {
        let rule = "─".repeat(title.chars().count());
        if self.use_colors {
            format!("\n{}\n{}", title.bold().underline(), rule)
        } else {
            format!("\n{}\n{}", title, rule)
        }
    }

    /// Format a key-value pair
    pub fn key_value(&self, key: &str, value: &str) -> String {
        if self.use_colors {
            format!("  {}: {}", key.bold(), value)
        } else {
            format!("  {}: {}", key, value)
        }
    }

    /// One line of the health table
    pub fn status_row(&self, status: &HealthStatus) -> String {
        let latency = if status.response_time_secs.is_finite() {
            format!("{:.2}s", status.response_time_secs)
        } else {
            "timeout".to_string()
        };

        if status.is_healthy {
            self.success(&format!("{:<20} healthy  {}", status.provider_name, latency))
        } else {
            let reason = status.error_message.as_deref().unwrap_or("not checked");
            self.error(&format!(
                "{:<20} failed   {}  ({})",
                status.provider_name, latency, reason
            ))
        }
    }
}

pub fn print_error(msg: &str) {
    eprintln!("{}", OutputStyle::default().error(msg));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_messages() {
        let style = OutputStyle::plain();
        assert_eq!(style.success("done"), "✓ done");
        assert_eq!(style.error("bad"), "✗ bad");
        assert_eq!(style.warning("hmm"), "⚠ hmm");
        assert_eq!(style.info("note"), "ℹ note");
        assert_eq!(style.key_value("k", "v"), "  k: v");
        assert_eq!(style.section("Health"), "\nHealth\n──────");
    }

    #[test]
    fn test_status_rows() {
        let style = OutputStyle::plain();

        let up = style.status_row(&HealthStatus::healthy("deepseek", 0.25));
        assert!(up.starts_with("✓ deepseek"));
        assert!(up.contains("healthy"));
        assert!(up.ends_with("0.25s"));

        let down = style.status_row(&HealthStatus::unhealthy("moonshot", f64::INFINITY, "Timeout"));
        assert!(down.contains("failed"));
        assert!(down.contains("timeout"));
        assert!(down.contains("(Timeout)"));
    }
}
