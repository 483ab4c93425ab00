use anyhow::{Context, Result};
use console::style;
use repurpose_core::RepurposeService;
use repurpose_core::llm::CandidateSource;
use repurpose_core::ui::Spinner;

/// Handle the models command - print candidates in the order they are tried
pub async fn handle_models_command(service: &RepurposeService) -> Result<()> {
    let spinner = Spinner::new("Discovering models...");
    let client = service.pipeline().client().await;
    spinner.finish_and_clear();
    let client = client.context("Failed to connect to the generation backend")?;

    println!(
        "{} {} candidate model(s) via {}",
        style("Models").blue().bold(),
        client.candidates().len(),
        client.backend_name()
    );
    for (index, candidate) in client.candidates().iter().enumerate() {
        let source = match candidate.source {
            CandidateSource::Configured => style("configured").yellow(),
            CandidateSource::Preferred => style("preferred").green(),
            CandidateSource::Discovered => style("discovered").dim(),
        };
        println!("  {:>2}. {:<40} {source}", index + 1, candidate.name);
    }

    Ok(())
}
