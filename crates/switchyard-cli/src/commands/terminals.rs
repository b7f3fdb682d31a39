//! `terminals` - show what a launch would try

use anyhow::Result;
use switchyard_terminal::TerminalResolver;

use crate::output::OutputStyle;

pub fn run() -> Result<()> {
    let style = OutputStyle::default();
    let resolver = TerminalResolver::system();
    let candidates = resolver.resolve();

    println!("{}", style.key_value("Desktop", resolver.desktop().as_str()));
    if candidates.is_empty() {
        println!("{}", style.warning("No supported terminal emulator found"));
        return Ok(());
    }

    println!("{}", style.section("Terminals in launch order"));
    for (position, candidate) in candidates.iter().enumerate() {
        println!("  {}. {}", position + 1, candidate.name);
    }
    Ok(())
}
