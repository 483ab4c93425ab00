use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use repurpose::cli::{self, Cli, Commands};
use repurpose::server;
use repurpose_core::config::api_keys::load_dotenv;
use repurpose_core::{ConfigManager, RepurposeConfig, RepurposeService};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(&args.log_level)?;
    if args.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    if let Err(err) = run(args).await {
        eprintln!("{} {err:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(args: Cli) -> Result<()> {
    load_dotenv()?;

    let workspace = match args.workspace {
        Some(path) => path,
        None => std::env::current_dir().context("cannot determine current dir")?,
    };

    if let Commands::Init { force } = args.command {
        return cli::handle_init_command(&workspace, force);
    }

    let manager = load_config(args.config.as_deref(), &workspace)?;
    if let Some(path) = manager.config_path() {
        tracing::debug!(path = %path.display(), "using configuration file");
    }
    let config = manager.config();

    match args.command {
        Commands::Segment(segment_args) => cli::handle_segment_command(config, segment_args),
        Commands::Templates => cli::handle_templates_command(config),
        Commands::Init { .. } => Ok(()),
        command => {
            let service = RepurposeService::from_config(config, manager.workspace())
                .context("Failed to initialize repurpose service")?;
            run_service_command(command, service, config).await
        }
    }
}

async fn run_service_command(
    command: Commands,
    service: RepurposeService,
    config: &RepurposeConfig,
) -> Result<()> {
    match command {
        Commands::Generate(generate_args) => {
            cli::handle_generate_command(&service, generate_args).await
        }
        Commands::Models => cli::handle_models_command(&service).await,
        Commands::Ask { question } => cli::handle_ask_command(&service, &question.join(" ")).await,
        Commands::History {
            user_id,
            limit,
            content,
        } => cli::handle_history_command(&service, user_id, limit, content),
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            server::serve(Arc::new(service), &host, port).await
        }
        Commands::Segment(_) | Commands::Templates | Commands::Init { .. } => Ok(()),
    }
}

fn load_config(config: Option<&Path>, workspace: &Path) -> Result<ConfigManager> {
    match config {
        Some(path) => ConfigManager::load_from_file(path, workspace),
        None => ConfigManager::load_from_workspace(workspace),
    }
}

/// Logs go to stderr so stdout carries only generated copy or JSON.
fn init_tracing(level: &str) -> Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => {
            EnvFilter::try_new(directives).context("Invalid RUST_LOG directives")?
        }
        _ => EnvFilter::try_new(format!(
            "repurpose={level},repurpose_core={level},tower_http={level}"
        ))
        .with_context(|| format!("Invalid log level: {level}"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}
