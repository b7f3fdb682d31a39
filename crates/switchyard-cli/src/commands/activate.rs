//! `activate` - export a provider's variables

use anyhow::Result;
use switchyard_activation::{AUTH_TOKEN_VAR, API_KEY_VAR};

use crate::commands::Context;
use crate::output::OutputStyle;

pub fn run(ctx: &mut Context, name: &str) -> Result<()> {
    let style = OutputStyle::default();
    let result = ctx.activate(name)?;

    println!(
        "{}",
        style.success(&format!(
            "Activated {} ({})",
            result.provider_name, result.provider_type
        ))
    );
    for (key, value) in &result.vars {
        println!("{}", style.key_value(key, &display_value(key, value)));
    }
    if let Some(writer) = ctx.translator.transcript() {
        println!();
        println!(
            "{}",
            style.info(&format!(
                "Run `source {}` to use it in your shell",
                writer.path().display()
            ))
        );
    }
    Ok(())
}

/// Credentials are shortened so they never reach the terminal in full
pub fn display_value(key: &str, value: &str) -> String {
    if key == API_KEY_VAR || key == AUTH_TOKEN_VAR {
        mask(value)
    } else {
        value.to_string()
    }
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(6).collect();
    if secret.chars().count() <= 6 {
        "*".repeat(secret.chars().count())
    } else {
        format!("{}…", visible)
    }
}
