//! `check` - probe every provider

use anyhow::Result;

use crate::commands::Context;
use crate::output::OutputStyle;

pub async fn run(ctx: &Context) -> Result<()> {
    let style = OutputStyle::default();
    let table = ctx.probe_all().await;

    println!("{}", style.section("Provider health"));
    for profile in ctx.registry.profiles() {
        if let Some(status) = table.get(&profile.name) {
            println!("{}", style.status_row(status));
        }
    }
    println!();
    println!(
        "{}",
        style.info(&format!(
            "{} of {} providers healthy",
            table.healthy_count(),
            table.len()
        ))
    );
    Ok(())
}
