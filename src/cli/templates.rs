use anyhow::{Context, Result};
use console::style;
use repurpose_core::{Platform, RepurposeConfig, TemplateRegistry, Tone};

/// Handle the templates command - show every (platform, tone) pairing
pub fn handle_templates_command(config: &RepurposeConfig) -> Result<()> {
    let registry = TemplateRegistry::with_overrides(&config.templates)
        .context("Invalid template overrides in configuration")?;

    println!("{}", style("Tones").blue().bold());
    for tone in Tone::ALL {
        println!("  {:<14} {}", tone.label(), style(tone.key()).dim());
    }

    println!();
    println!("{}", style("Platforms").blue().bold());
    for platform in Platform::ALL {
        println!("  {:<14} {}", platform.label(), style(platform.key()).dim());
    }

    println!();
    println!("{}", style("Templates").blue().bold());
    for platform in Platform::ALL {
        for tone in Tone::ALL {
            let overridden = config
                .templates
                .get(platform.key())
                .is_some_and(|tones| tones.contains_key(tone.key()));
            let status = if !registry.contains(platform, tone) {
                style("missing").red()
            } else if overridden {
                style("override").yellow()
            } else {
                style("built-in").green()
            };
            println!("  {:<10} {:<13} {status}", platform.key(), tone.key());
        }
    }

    Ok(())
}
