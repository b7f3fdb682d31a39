//! `project` - named working directories

use anyhow::Result;

use crate::commands::Context;
use crate::output::OutputStyle;
use crate::router::ProjectAction;

pub fn run(ctx: &mut Context, action: ProjectAction) -> Result<()> {
    let style = OutputStyle::default();

    match action {
        ProjectAction::List => {
            if ctx.document.project_directories.is_empty() {
                println!("{}", style.info("No project directories configured"));
            }
            for project in &ctx.document.project_directories {
                let line = if project.description.is_empty() {
                    project.path.clone()
                } else {
                    format!("{}  ({})", project.path, project.description)
                };
                println!("{}", style.key_value(&project.name, &line));
            }
        }
        ProjectAction::Add {
            name,
            path,
            description,
        } => {
            let path = path.to_string_lossy();
            if ctx
                .manager
                .add_project_directory(&mut ctx.document, &name, &path, &description)?
            {
                println!("{}", style.success(&format!("Added project {}", name)));
            } else {
                let msg = format!("A project named {} or at {} already exists", name, path);
                println!("{}", style.warning(&msg));
            }
        }
    }
    Ok(())
}
