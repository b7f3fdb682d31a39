//! `env` - show the provider variables of this process

use anyhow::Result;
use switchyard_activation::{EnvironmentSink, ProcessEnvironment, ENV_PREFIX};

use crate::commands::activate::display_value;
use crate::output::OutputStyle;

pub fn run() -> Result<()> {
    let style = OutputStyle::default();
    let vars = ProcessEnvironment::new().snapshot(ENV_PREFIX);

    if vars.is_empty() {
        println!("{}", style.info(&format!("No {}* variables set", ENV_PREFIX)));
        return Ok(());
    }
    for (key, value) in &vars {
        println!("{}", style.key_value(key, &display_value(key, value)));
    }
    Ok(())
}
