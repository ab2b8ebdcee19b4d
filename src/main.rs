use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use mademesmile::cli::handlers::{self, CommandContext, CreateParams};
use mademesmile::cli::{Cli, Commands};
use mademesmile::config::SmileConfig;
use mademesmile::error::SmileError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let log_file = mademesmile::logging::resolve_log_file(cli.log_file.clone(), &cwd);
    mademesmile::logging::init(cli.verbose, log_file);

    if let Err(err) = run(cli).await {
        tracing::debug!(error = ?err, "Command failed");
        let message = match err.chain().find_map(|e| e.downcast_ref::<SmileError>()) {
            Some(smile) => smile.user_message(),
            None => format!("{:#}", err),
        };
        eprintln!("{} {}", "Error:".red(), message);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let base_url = cli.base_url;
    match cli.command {
        Commands::Init {
            backend,
            project_id,
            path,
        } => handlers::handle_init(backend, project_id, path, base_url),
        Commands::Create {
            content,
            category,
            collection,
            tag,
            mood,
            media,
            json,
        } => {
            let ctx = load_context(base_url)?;
            let params = CreateParams {
                content,
                category,
                collection,
                tag,
                mood,
                media,
                json,
            };
            handlers::handle_create(&ctx, params).await
        }
        Commands::List {
            category,
            collection,
            json,
        } => {
            let ctx = load_context(base_url)?;
            handlers::handle_list(&ctx, category, collection, json).await
        }
        Commands::Show { id, json } => {
            let ctx = load_context(base_url)?;
            handlers::handle_show(&ctx, id, json).await
        }
        Commands::Delete { id, force, json } => {
            let ctx = load_context(base_url)?;
            handlers::handle_delete(&ctx, id, force, json).await
        }
        Commands::Search { query, json } => {
            let ctx = load_context(base_url)?;
            handlers::handle_search(&ctx, query, json).await
        }
        Commands::Stats { activity, json } => {
            let ctx = load_context(base_url)?;
            handlers::handle_stats(&ctx, activity, json).await
        }
        Commands::Categories { json } => {
            let ctx = load_context(base_url)?;
            handlers::handle_categories(&ctx, json).await
        }
        Commands::Auth { action } => {
            let ctx = load_context(base_url)?;
            handlers::handle_auth(&ctx, action).await
        }
        Commands::Onboarding { action } => {
            let ctx = load_context(base_url)?;
            handlers::handle_onboarding(&ctx, action).await
        }
    }
}

fn load_context(base_url: Option<String>) -> Result<CommandContext> {
    let cwd = std::env::current_dir()?;
    let (config, root) = SmileConfig::load(&cwd).context("Failed to load journal configuration")?;
    CommandContext::new(config, root, base_url)
}
