use anyhow::{Context, Result};
use console::style;
use repurpose_core::RepurposeService;

/// Handle the history command
pub fn handle_history_command(
    service: &RepurposeService,
    user_id: Option<i64>,
    limit: Option<usize>,
    include_content: bool,
) -> Result<()> {
    let posts = service
        .history(user_id, limit, include_content)
        .context("Failed to load saved posts")?;

    if posts.is_empty() {
        println!("{}", style("No saved posts yet").dim());
        return Ok(());
    }

    for post in posts {
        println!(
            "{} {} {} {}",
            style(format!("#{}", post.id)).bold(),
            style(&post.title).cyan(),
            style(format!("[{} / {}]", post.platform, post.tone)).dim(),
            post.created_at.format("%Y-%m-%d %H:%M")
        );
        if let Some(content) = &post.content {
            println!("{content}\n");
        }
    }

    Ok(())
}
