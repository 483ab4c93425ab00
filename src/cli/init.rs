use anyhow::{Context, Result};
use console::style;
use repurpose_core::RepurposeConfig;
use std::path::Path;

/// Handle the init command
pub fn handle_init_command(workspace: &Path, force: bool) -> Result<()> {
    println!("{}", style("Initialize repurpose configuration").blue().bold());
    println!("Workspace: {}", workspace.display());

    let created = RepurposeConfig::bootstrap_project(workspace, force)
        .with_context(|| "failed to initialize configuration files")?;

    match created {
        Some(path) => println!(
            "{} Wrote {}",
            style("✓").green().bold(),
            path.display()
        ),
        None => println!(
            "{} repurpose.toml already exists; rerun with --force to overwrite",
            style("!").yellow().bold()
        ),
    }

    Ok(())
}
