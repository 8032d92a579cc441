//! Theme CLI - Command line tool for the storefront theme layer.
//!
//! Commands:
//! - `theme decide` - Evaluate the fallback policy for a request
//! - `theme config` - Inspect and validate theme settings
//! - `theme crawlers` - List crawler signatures or test a user agent
//! - `theme render` - Render structured data or the fallback page
//! - `theme bootstrap` - Print the client bootstrap script

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{BootstrapArgs, ConfigArgs, CrawlersArgs, DecideArgs, RenderArgs};

/// Theme CLI - Inspect fallback decisions and storefront markup
#[derive(Parser)]
#[command(name = "theme")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide between the client application and the fallback page
    Decide(DecideArgs),

    /// Inspect theme settings
    Config(ConfigArgs),

    /// List crawler signatures or test a user agent
    Crawlers(CrawlersArgs),

    /// Render structured data or the fallback page
    Render(RenderArgs),

    /// Print the client bootstrap script
    Bootstrap(BootstrapArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Decide(args) => commands::decide::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
        Commands::Crawlers(args) => commands::crawlers::run(args, &ctx).await,
        Commands::Render(args) => commands::render::run(args, &ctx).await,
        Commands::Bootstrap(args) => commands::bootstrap::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
