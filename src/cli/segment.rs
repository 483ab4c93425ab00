use super::args::SegmentArgs;
use super::input::read_input;
use anyhow::Result;
use console::style;
use repurpose_core::RepurposeConfig;
use repurpose_core::config::constants::defaults;
use repurpose_core::input::preview_text;
use repurpose_core::segmentation::segment_or_whole;

/// Handle the segment command - show segment boundaries without generating
pub fn handle_segment_command(config: &RepurposeConfig, args: SegmentArgs) -> Result<()> {
    let input = read_input(&args.input, config.segmentation.max_words)?;
    let min_words = args.min_words.unwrap_or(config.segmentation.min_words);

    if input.text.trim().is_empty() {
        println!("{} No text to segment", style("!").yellow().bold());
        return Ok(());
    }

    let segments = segment_or_whole(&input.text, min_words);
    println!(
        "{} {} word(s) into {} segment(s) of at least {min_words} words",
        style("Segmented").green().bold(),
        input.word_count,
        segments.len()
    );

    for (index, segment) in segments.iter().enumerate() {
        println!();
        println!(
            "{} {}",
            style(format!("Segment {}", index + 1)).blue().bold(),
            style(format!("({} words)", segment.word_count())).dim()
        );
        println!("{}", preview_text(segment.text(), defaults::PREVIEW_LENGTH));
    }

    Ok(())
}
