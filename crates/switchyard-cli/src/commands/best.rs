//! `best` - rank healthy providers and recommend one

use anyhow::Result;
use switchyard_providers::selection;

use crate::commands::{activate, Context};
use crate::output::OutputStyle;

pub async fn run(ctx: &mut Context, activate_best: bool) -> Result<()> {
    let style = OutputStyle::default();
    let table = ctx.probe_all().await;
    let ranking = selection::rank(&table, ctx.registry.profiles());

    if ranking.is_empty() {
        println!("{}", style.warning("No healthy provider available"));
        return Ok(());
    }

    println!("{}", style.section("Ranking"));
    for (position, (name, score)) in ranking.iter().enumerate() {
        println!("  {}. {:<20} score {:.2}", position + 1, name, score);
    }

    let best = &ranking[0].0;
    println!();
    println!("{}", style.success(&format!("Recommended provider: {}", best)));

    if activate_best {
        let best = best.clone();
        activate::run(ctx, &best)?;
    }
    Ok(())
}
