//! Paragraph-aware segmentation of long documents.
//!
//! Paragraphs are separated by blank (or whitespace-only) lines. Short
//! paragraphs are buffered until the buffer reaches the minimum word count,
//! so every segment except the last carries at least `min_words` words.

use crate::input::word_count;
use serde::Serialize;
use std::fmt;

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// One ordered chunk of source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    text: String,
    word_count: usize,
}

impl Segment {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let word_count = word_count(&text);
        Self { text, word_count }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Split `text` into trimmed, non-empty paragraphs in source order.
pub fn paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            push_paragraph(&mut paragraphs, &mut lines);
        } else {
            lines.push(line);
        }
    }
    push_paragraph(&mut paragraphs, &mut lines);

    paragraphs
}

fn push_paragraph(paragraphs: &mut Vec<String>, lines: &mut Vec<&str>) {
    if lines.is_empty() {
        return;
    }
    let paragraph = lines.join("\n");
    lines.clear();
    let trimmed = paragraph.trim();
    if !trimmed.is_empty() {
        paragraphs.push(trimmed.to_string());
    }
}

/// Accumulates short paragraphs until they reach the minimum size
struct SegmentBuffer {
    parts: Vec<String>,
    words: usize,
}

impl SegmentBuffer {
    fn new() -> Self {
        Self {
            parts: Vec::new(),
            words: 0,
        }
    }

    fn push(&mut self, paragraph: String, words: usize) {
        self.parts.push(paragraph);
        self.words += words;
    }

    fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    fn take(&mut self) -> Option<Segment> {
        if self.parts.is_empty() {
            return None;
        }
        let text = self.parts.join(PARAGRAPH_SEPARATOR);
        self.parts.clear();
        self.words = 0;
        Some(Segment::new(text))
    }
}

/// Split `text` into ordered segments of at least `min_words` words.
///
/// A paragraph that already meets `min_words` becomes its own segment. If
/// short paragraphs are pending when such a paragraph arrives, they are
/// prepended to it instead of being flushed as an undersized segment. Trailing
/// short content is always kept as the final segment. Whitespace-only input
/// yields no segments.
pub fn segment(text: &str, min_words: usize) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut buffer = SegmentBuffer::new();

    for paragraph in paragraphs(text) {
        let words = word_count(&paragraph);

        if words >= min_words {
            if buffer.is_empty() {
                segments.push(Segment::new(paragraph));
            } else {
                buffer.push(paragraph, words);
                segments.extend(buffer.take());
            }
            continue;
        }

        buffer.push(paragraph, words);
        if buffer.words >= min_words {
            segments.extend(buffer.take());
        }
    }

    segments.extend(buffer.take());

    tracing::debug!(
        segments = segments.len(),
        min_words,
        "segmented input text"
    );
    segments
}

/// Segment `text`, substituting the whole trimmed text when no paragraphs
/// were found so non-empty input is never dropped.
pub fn segment_or_whole(text: &str, min_words: usize) -> Vec<Segment> {
    let segments = segment(text, min_words);
    if !segments.is_empty() {
        return segments;
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        Vec::new()
    } else {
        vec![Segment::new(trimmed)]
    }
}

/// Wrap caller-supplied segments, dropping those that are empty after trimming.
pub fn from_presegmented<I, S>(segments: I) -> Vec<Segment>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .map(Segment::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize, tag: &str) -> String {
        (0..n)
            .map(|i| format!("{tag}{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn whitespace_only_input_yields_nothing() {
        assert!(segment("", 100).is_empty());
        assert!(segment("  \n\n \t\n", 100).is_empty());
        assert!(segment_or_whole("   ", 100).is_empty());
    }

    #[test]
    fn single_paragraph_below_minimum_is_kept() {
        let segments = segment("just a few words here", 100);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text(), "just a few words here");
        assert_eq!(segments[0].word_count(), 5);
    }

    #[test]
    fn long_paragraphs_become_their_own_segments() {
        let text = format!("{}\n\n{}", words(120, "a"), words(150, "b"));
        let segments = segment(&text, 100);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].word_count(), 120);
        assert_eq!(segments[1].word_count(), 150);
    }

    #[test]
    fn short_paragraphs_accumulate_until_minimum() {
        let text = [words(40, "a"), words(40, "b"), words(40, "c"), words(10, "d")]
            .join("\n\n");
        let segments = segment(&text, 100);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].word_count(), 120);
        assert_eq!(
            segments[0].text(),
            format!("{}\n\n{}\n\n{}", words(40, "a"), words(40, "b"), words(40, "c"))
        );
        assert_eq!(segments[1].text(), words(10, "d"));
    }

    #[test]
    fn pending_buffer_merges_into_following_long_paragraph() {
        let text = [words(30, "a"), words(110, "b"), words(20, "c")].join("\n\n");
        let segments = segment(&text, 100);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].word_count(), 140);
        assert!(segments[0].text().starts_with("a0 "));
        assert_eq!(segments[1].word_count(), 20);
    }

    #[test]
    fn every_segment_but_last_meets_minimum_and_order_is_kept() {
        let sizes = [5, 130, 60, 60, 3, 99, 1, 250, 7];
        let text = sizes
            .iter()
            .enumerate()
            .map(|(i, n)| words(*n, &format!("p{i}w")))
            .collect::<Vec<_>>()
            .join("\n\n   \n");

        let segments = segment(&text, 100);
        assert!(!segments.is_empty());
        for seg in &segments[..segments.len() - 1] {
            assert!(seg.word_count() >= 100);
        }

        let rebuilt: Vec<&str> = segments
            .iter()
            .flat_map(|s| s.text().split_whitespace())
            .collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn paragraphs_split_on_whitespace_only_lines() {
        let paras = paragraphs("one\ntwo\n  \nthree\n\n\n\nfour  ");
        assert_eq!(paras, vec!["one\ntwo", "three", "four"]);
    }

    #[test]
    fn presegmented_input_drops_blank_entries() {
        let segments = from_presegmented(["  first ", "", "   ", "second"]);
        let texts: Vec<&str> = segments.iter().map(Segment::text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }
}
