const SEGMENT_SEPARATOR: &str = "\n\n";

/// Join per-segment results in order, skipping entries that are blank after trimming.
pub fn combine<I, S>(results: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut combined = String::new();
    for result in results {
        let trimmed = result.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if !combined.is_empty() {
            combined.push_str(SEGMENT_SEPARATOR);
        }
        combined.push_str(trimmed);
    }
    combined
}
