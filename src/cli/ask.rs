use anyhow::{Context, Result, bail};
use repurpose_core::RepurposeService;
use repurpose_core::ui::Spinner;

/// Handle the ask command - single question, plain reply on stdout
pub async fn handle_ask_command(service: &RepurposeService, question: &str) -> Result<()> {
    if question.trim().is_empty() {
        bail!("No question provided. Use: repurpose ask \"Your question here\"");
    }

    let spinner = Spinner::new("Asking Gemini...");
    let answer = service.ask(question).await;
    spinner.finish_and_clear();

    let answer = answer.context("Ask failed")?;
    println!("{}", answer.response);
    Ok(())
}
