mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod server;
mod services;
#[cfg(test)]
mod testing;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cmd::changes::ChangesArgs;
use crate::cmd::suggest::SuggestArgs;
use crate::cmd::templates::TemplatesArgs;
use crate::config::{AppConfig, ConfigOverrides};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::templates::DirectoryTemplateSource;

#[derive(Parser)]
#[command(
    name = "pr-agent",
    author,
    version,
    about = "Summarize staged changes and suggest pull request templates"
)]
struct Cli {
    /// Repository to inspect (defaults to the current directory).
    #[arg(long, global = true)]
    repo: Option<PathBuf>,
    /// Directory holding the PR templates.
    #[arg(long, global = true)]
    template_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the tools to an MCP client over stdio.
    Serve,
    /// Print the staged file list and diff.
    Changes(ChangesArgs),
    /// Inspect the available PR templates.
    Templates(TemplatesArgs),
    /// Suggest the PR template that best fits a kind of change.
    Suggest(SuggestArgs),
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    // stdout carries protocol traffic; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let config = AppConfig::load(
        &cwd,
        ConfigOverrides {
            workspace_root: cli.repo,
            template_dir: cli.template_dir,
        },
    )?;
    info!(
        workspace = %config.workspace_root.display(),
        templates = %config.template_dir.display(),
        "pr-agent starting"
    );

    let git = Arc::new(GitCli::new(
        config.workspace_root.clone(),
        config.git_timeout,
    ));
    let templates = Arc::new(DirectoryTemplateSource::new(config.template_dir.clone()));
    let context = AppContext::new(config, git, templates);

    match cli.command {
        Commands::Serve => cmd::serve::run(context).await,
        Commands::Changes(args) => cmd::changes::run(&context, args).await,
        Commands::Templates(args) => cmd::templates::run(&context, args.command).await,
        Commands::Suggest(args) => cmd::suggest::run(&context, args).await,
    }
}
