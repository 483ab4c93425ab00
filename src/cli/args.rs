//! CLI argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for repurpose
#[derive(Parser, Debug)]
#[command(
    name = "repurpose",
    version,
    about = "Turn long-form documents into LinkedIn, Instagram and YouTube copy with Gemini"
)]
pub struct Cli {
    /// Configuration file path; skips the workspace/home lookup
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Workspace root directory; defaults to current directory
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Disable color output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Repurpose a document into platform-specific posts
    Generate(GenerateArgs),

    /// Preview how a document will be segmented
    Segment(SegmentArgs),

    /// List tones, platforms and configured templates
    Templates,

    /// Show the candidate models in fallback order
    Models,

    /// Ask a single question; prints the model reply
    Ask {
        /// The question to send to the model
        question: Vec<String>,
    },

    /// Show saved posts, newest first
    History {
        /// Only posts saved for this user
        #[arg(long)]
        user_id: Option<i64>,

        /// Maximum number of posts; defaults to storage.history_limit
        #[arg(long)]
        limit: Option<usize>,

        /// Print post content as well as metadata
        #[arg(long)]
        content: bool,
    },

    /// Serve the HTTP API
    Serve {
        /// Bind address; defaults to server.host
        #[arg(long)]
        host: Option<String>,

        /// Bind port; defaults to server.port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write a default repurpose.toml into the workspace
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

/// Where the document text comes from
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Text to repurpose; combined with --file when both are given
    #[arg(long)]
    pub text: Option<String>,

    /// Document to read (.txt, .md, .pdf, .docx); stdin when neither is given
    #[arg(long, short)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Tone label, e.g. Professional, Casual or Promotional
    #[arg(long, short, default_value = "Professional")]
    pub tone: String,

    /// Target platform label; repeat for several platforms
    #[arg(long = "platform", short, required = true)]
    pub platforms: Vec<String>,

    /// Project title used when saving
    #[arg(long)]
    pub title: Option<String>,

    /// Save the generated posts
    #[arg(long, requires = "title")]
    pub save: bool,

    /// Owner recorded with saved posts
    #[arg(long)]
    pub user_id: Option<i64>,

    /// Print the response as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SegmentArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Minimum words per segment; defaults to segmentation.min_words
    #[arg(long)]
    pub min_words: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_collects_repeated_platforms() {
        let cli = Cli::try_parse_from([
            "repurpose",
            "generate",
            "--text",
            "hello",
            "--tone",
            "Casual",
            "--platform",
            "LinkedIn",
            "-p",
            "YouTube",
        ])
        .unwrap();

        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.platforms, vec!["LinkedIn", "YouTube"]);
        assert_eq!(args.input.text.as_deref(), Some("hello"));
        assert!(!args.save);
    }

    #[test]
    fn save_requires_title() {
        let result = Cli::try_parse_from([
            "repurpose",
            "generate",
            "--platform",
            "LinkedIn",
            "--save",
        ]);
        assert!(result.is_err());
    }
}
