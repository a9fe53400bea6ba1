//! Radar CLI - Command line interface for the Radar dashboard
//!
//! Lists repositories, issues, pull requests and branches of a GitHub
//! organization, one repository at a time or aggregated.

mod commands;

use clap::{Parser, Subcommand};
use radar_core::Config;
use radar_github::GitHubClient;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{DashboardArgs, ListArgs, ReposArgs};

/// Radar: read-only visibility into a GitHub organization
#[derive(Parser, Debug)]
#[command(name = "radar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// GitHub REST API base URL (overrides config and env)
    #[arg(long, global = true, env = "RADAR_API_URL")]
    api_url: Option<String>,

    /// How long listings stay cached, e.g. 5m (overrides config and env)
    #[arg(long, global = true, env = "RADAR_CACHE_TTL")]
    cache_ttl: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// List repositories of an organization
    Repos(ReposArgs),

    /// List issues of a repository (pull requests excluded)
    #[command(visible_alias = "i")]
    Issues(ListArgs),

    /// List pull requests of a repository
    #[command(visible_alias = "pr")]
    Pulls(ListArgs),

    /// List branches of a repository with their last commit date
    #[command(visible_alias = "b")]
    Branches(ListArgs),

    /// Issues, pull requests and branches of several repositories together
    #[command(visible_alias = "d")]
    Dashboard(DashboardArgs),

    /// Show the tracked GitHub rate limit
    Limits,

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let config = Config::load_with_overrides(cli.api_url.clone(), cli.cache_ttl.clone())?;

    if cli.verbose {
        tracing::info!(
            api_url = %config.github.api_url,
            cache_ttl = ?config.github.cache_ttl,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("radar {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Repos(args)) => {
            let client = GitHubClient::from_secrets(config.github.clone())?;
            args.execute(&client).await?;
        }
        Some(Commands::Issues(args)) => {
            let client = GitHubClient::from_secrets(config.github.clone())?;
            args.execute_issues(&client).await?;
        }
        Some(Commands::Pulls(args)) => {
            let client = GitHubClient::from_secrets(config.github.clone())?;
            args.execute_pulls(&client).await?;
        }
        Some(Commands::Branches(args)) => {
            let client = GitHubClient::from_secrets(config.github.clone())?;
            args.execute_branches(&client).await?;
        }
        Some(Commands::Dashboard(args)) => {
            let client = GitHubClient::from_secrets(config.github.clone())?;
            args.execute(&client, cli.verbose).await?;
        }
        Some(Commands::Limits) => {
            let client = GitHubClient::from_secrets(config.github.clone())?;
            commands::show_limits(&client).await?;
        }
        Some(Commands::Config) => {
            println!("Radar Configuration");
            println!("===================");
            println!();
            println!("GitHub Settings:");
            println!("  api_url: {}", config.github.api_url);
            println!("  web_url: {}", config.github.web_url);
            println!("  user_agent: {}", config.github.user_agent);
            println!("  cache_ttl: {}s", config.github.cache_ttl.as_secs());
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Radar - read-only visibility into a GitHub organization");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
