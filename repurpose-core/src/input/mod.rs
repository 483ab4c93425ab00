//! Input preparation: normalization, word counting and word-limit enforcement.
//!
//! Word counting splits on Unicode whitespace. Every component that counts
//! words (segmentation, limits, previews) goes through [`word_count`] so
//! segment boundaries never depend on an external tokenizer.

pub mod extract;

pub use extract::{DocumentKind, ExtractError, extract_text, read_document};

/// Text after word-limit enforcement together with its word count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitedText {
    pub text: String,
    pub word_count: usize,
    pub truncated: bool,
}

/// Normalize line endings to `\n` and trim every line.
pub fn normalize_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    unified
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of whitespace-delimited tokens in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Trim `text` to at most `max_words` words.
///
/// Text within the limit is returned untouched; longer text is rebuilt from
/// its first `max_words` tokens joined by single spaces.
pub fn enforce_word_limit(text: &str, max_words: usize) -> LimitedText {
    let count = word_count(text);
    if count <= max_words {
        return LimitedText {
            text: text.to_string(),
            word_count: count,
            truncated: false,
        };
    }

    let limited = text
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ");

    LimitedText {
        text: limited,
        word_count: max_words,
        truncated: true,
    }
}

/// Combine pasted and extracted text, normalize it and apply the word limit.
///
/// Returns an empty [`LimitedText`] when nothing but whitespace was supplied.
pub fn prepare_text(pasted: &str, extracted: &str, max_words: usize) -> LimitedText {
    let combined = [pasted.trim(), extracted.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    let cleaned = normalize_text(&combined);

    if cleaned.trim().is_empty() {
        return LimitedText {
            text: String::new(),
            word_count: 0,
            truncated: false,
        };
    }

    enforce_word_limit(&cleaned, max_words)
}

/// Short preview of `text`, suffixed with `...` when truncated.
pub fn preview_text(text: &str, preview_length: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(preview_length) {
        Some((cut, _)) => format!("{}...", text[..cut].trim()),
        None => text.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_unifies_line_endings_and_trims_lines() {
        let text = "  first line  \r\nsecond\rthird   \n";
        assert_eq!(normalize_text(text), "first line\nsecond\nthird\n");
    }

    #[test]
    fn whitespace_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("one two\nthree\t four"), 4);
    }

    #[test]
    fn word_limit_keeps_short_text_intact() {
        let limited = enforce_word_limit("a  b\n\nc", 5);
        assert_eq!(limited.text, "a  b\n\nc");
        assert_eq!(limited.word_count, 3);
        assert!(!limited.truncated);
    }

    #[test]
    fn word_limit_trims_long_text() {
        let limited = enforce_word_limit("a b\n\nc d e", 3);
        assert_eq!(limited.text, "a b c");
        assert_eq!(limited.word_count, 3);
        assert!(limited.truncated);
    }

    #[test]
    fn prepare_joins_sources_and_handles_empty() {
        let limited = prepare_text("  pasted  ", "extracted\r\ntext", 100);
        assert_eq!(limited.text, "pasted\nextracted\ntext");
        assert_eq!(limited.word_count, 3);

        let empty = prepare_text("  ", "\n\n", 100);
        assert_eq!(empty.text, "");
        assert_eq!(empty.word_count, 0);
    }

    #[test]
    fn preview_is_char_boundary_safe() {
        assert_eq!(preview_text("héllo wörld", 5), "héllo...");
        assert_eq!(preview_text("short", 400), "short");
    }
}
