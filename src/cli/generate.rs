use super::args::GenerateArgs;
use super::input::read_input;
use anyhow::{Context, Result};
use console::style;
use is_terminal::IsTerminal;
use repurpose_core::llm::error_display::is_placeholder;
use repurpose_core::ui::ProgressDisplay;
use repurpose_core::{GenerateRequest, GenerateResponse, RepurposeService};
use std::io;

/// Handle the generate command
pub async fn handle_generate_command(service: &RepurposeService, args: GenerateArgs) -> Result<()> {
    let input = read_input(&args.input, service.settings().max_words)?;

    let request = GenerateRequest {
        text: Some(input.text),
        segments: None,
        tone: args.tone,
        platforms: args.platforms,
        project_title: args.title,
        save: args.save,
        user_id: args.user_id,
    };

    let progress = if io::stderr().is_terminal() && !args.json {
        ProgressDisplay::new("Generating")
    } else {
        ProgressDisplay::hidden()
    };

    let result = service.handle_generate(&request, &progress).await;
    match &result {
        Ok(_) => progress.finish_and_clear(),
        Err(_) => progress.abandon_with_message("Generation failed"),
    }
    let response = result.context("Generation failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&response)
            .context("Failed to serialize generation response")?;
        println!("{json}");
        return Ok(());
    }

    render_response(&response, request.save);
    Ok(())
}

fn render_response(response: &GenerateResponse, save_requested: bool) {
    if let Some(message) = &response.message {
        println!("{} {message}", style("!").yellow().bold());
        return;
    }

    println!(
        "{} {} segment(s), tone {}",
        style("Repurposed").green().bold(),
        response.segment_count,
        style(&response.tone).cyan()
    );

    for (platform, copy) in &response.outputs {
        println!();
        println!("{}", style(format!("## {platform}")).blue().bold());
        if copy.is_empty() {
            println!("{}", style("(no content generated)").dim());
        } else {
            println!("{copy}");
        }
    }

    let failed: Vec<&str> = response
        .outputs
        .iter()
        .filter(|(_, copy)| copy.split("\n\n").any(is_placeholder))
        .map(|(platform, _)| platform.as_str())
        .collect();
    if !failed.is_empty() {
        eprintln!(
            "\n{} Some requests failed for: {}",
            style("!").yellow().bold(),
            failed.join(", ")
        );
    }

    if save_requested {
        if response.saved {
            eprintln!("{} Posts saved", style("✓").green().bold());
        } else {
            eprintln!(
                "{} Posts were not saved; see the log for details",
                style("!").yellow().bold()
            );
        }
    }
}
