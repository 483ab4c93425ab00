use super::args::InputArgs;
use anyhow::{Context, Result, bail};
use console::style;
use is_terminal::IsTerminal;
use repurpose_core::input::{LimitedText, prepare_text, read_document};
use std::io::{self, Read};

/// Resolve document text from `--text`, `--file` and piped stdin.
///
/// Pasted text (`--text` or stdin) and the extracted document are combined
/// the way the upload form does it, then normalized and word-limited.
pub fn read_input(args: &InputArgs, max_words: usize) -> Result<LimitedText> {
    let extracted = match &args.file {
        Some(path) => read_document(path)
            .with_context(|| format!("Failed to read document {}", path.display()))?,
        None => String::new(),
    };

    let pasted = match &args.text {
        Some(text) => text.clone(),
        None if args.file.is_none() => read_stdin()?,
        None => String::new(),
    };

    let prepared = prepare_text(&pasted, &extracted, max_words);
    if prepared.truncated {
        eprintln!(
            "{} Input trimmed to the first {max_words} words",
            style("!").yellow().bold()
        );
    }
    Ok(prepared)
}

fn read_stdin() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("No input provided. Use --text, --file, or pipe a document on stdin");
    }

    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}
