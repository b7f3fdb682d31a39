//! `launch` - activate a provider and open a terminal

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use switchyard_activation::{EnvironmentSink, ProcessEnvironment, ENV_PREFIX};
use switchyard_providers::selection;
use switchyard_terminal::cleanup;
use switchyard_terminal::{LaunchOrchestrator, LaunchRequest};
use tracing::info;

use crate::commands::Context;
use crate::output::OutputStyle;
use crate::router::LaunchArgs;

pub async fn run(ctx: &mut Context, args: &LaunchArgs) -> Result<()> {
    let style = OutputStyle::default();
    // Resolve the directory before activation touches the environment
    let workdir = working_dir(ctx, args)?;

    let env = if args.no_env {
        ProcessEnvironment::new().snapshot(ENV_PREFIX)
    } else {
        let name = provider_to_activate(ctx, args).await?;
        let result = ctx.activate(&name)?;
        println!("{}", style.success(&format!("Activated {}", result.provider_name)));
        result.vars
    };

    let mut request = LaunchRequest::new(env).with_auto(args.auto);
    if let Some(dir) = workdir {
        request = request.with_working_dir(dir);
    }
    if let Some(command) = &args.command {
        request = request.with_command(command.clone());
    }

    let settings = &ctx.document.settings;
    let orchestrator = LaunchOrchestrator::system()
        .with_target(settings.target_command.clone())
        .with_shell(settings.shell.clone())
        .with_cleanup_delay(settings.script_cleanup_delay());

    let report = orchestrator.launch(&request).await?;
    for attempt in &report.attempts {
        println!("{}", style.warning(&format!("Skipped {}", attempt)));
    }
    println!("{}", style.success(&format!("Opened {}", report.terminal)));

    // The detached cleanup task dies with this process, so stay up until it is due
    if let Some(script) = report.script {
        let delay = orchestrator.cleanup_delay();
        info!(delay_secs = delay.as_secs(), "Waiting to remove launch script");
        tokio::time::sleep(delay).await;
        cleanup::remove_now(&script).await;
    }
    Ok(())
}

/// `--provider` wins; otherwise the best healthy provider after a probe
async fn provider_to_activate(ctx: &Context, args: &LaunchArgs) -> Result<String> {
    if let Some(name) = &args.provider {
        return Ok(name.clone());
    }
    let table = ctx.probe_all().await;
    selection::best(&table, ctx.registry.profiles()).context("No healthy provider available")
}

fn working_dir(ctx: &Context, args: &LaunchArgs) -> Result<Option<PathBuf>> {
    if let Some(dir) = &args.dir {
        if !dir.is_dir() {
            bail!("Working directory does not exist: {}", dir.display());
        }
        return Ok(Some(dir.clone()));
    }
    match &args.project {
        Some(name) => {
            let project = ctx
                .document
                .project(name)
                .with_context(|| format!("Unknown project directory '{}'", name))?;
            Ok(Some(PathBuf::from(&project.path)))
        }
        None => Ok(None),
    }
}
