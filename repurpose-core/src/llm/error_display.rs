//! Placeholder text substituted for a segment whose generation failed.

use crate::config::constants::messages;

/// `Error generating content: <detail>`
pub fn generation_placeholder(detail: &str) -> String {
    format!("{}: {}", messages::GENERATION_ERROR_PREFIX, detail)
}

/// Placeholder followed by a hint naming models the user can pin.
pub fn generation_placeholder_with_tip(detail: &str, models: &[String]) -> String {
    let listed = if models.is_empty() {
        "(none discovered)".to_string()
    } else {
        models.join(", ")
    };
    format!(
        "{}\n{}: {}",
        generation_placeholder(detail),
        messages::MODEL_TIP_PREFIX,
        listed
    )
}

/// Whether `text` is a failure placeholder rather than generated copy
pub fn is_placeholder(text: &str) -> bool {
    text.trim_start()
        .starts_with(messages::GENERATION_ERROR_PREFIX)
}
