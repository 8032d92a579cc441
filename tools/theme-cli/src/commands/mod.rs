//! CLI command implementations.

pub mod bootstrap;
pub mod config;
pub mod crawlers;
pub mod decide;
pub mod render;

use clap::{Args, Subcommand};

/// Arguments for the decide command.
#[derive(Args)]
pub struct DecideArgs {
    /// User-Agent header of the request.
    #[arg(short, long, default_value = "")]
    pub user_agent: String,

    /// Cookie header of the request.
    #[arg(long)]
    pub cookie: Option<String>,

    /// Store code to resolve settings for.
    #[arg(short, long)]
    pub store: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved settings for a store.
    Show {
        /// Store code.
        #[arg(short, long)]
        store: Option<String>,
    },
    /// Get a single resolved setting.
    Get {
        /// Setting name or storage path.
        key: String,

        /// Store code.
        #[arg(short, long)]
        store: Option<String>,
    },
    /// List every setting with its storage path and default.
    Keys,
    /// Report settings whose stored values cannot be parsed.
    Validate,
    /// Write a starter config file.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for the crawlers command.
#[derive(Args)]
pub struct CrawlersArgs {
    /// Test a user agent against the signatures.
    #[arg(long)]
    pub check: Option<String>,
}

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    #[command(subcommand)]
    pub command: RenderCommand,
}

#[derive(Subcommand)]
pub enum RenderCommand {
    /// Render category structured data from a snapshot file.
    Category {
        /// Category snapshot (TOML or JSON).
        #[arg(short, long)]
        input: String,

        /// Store code.
        #[arg(short, long)]
        store: Option<String>,
    },
    /// Render product structured data from a snapshot file.
    Product {
        /// Product snapshot (TOML or JSON).
        #[arg(short, long)]
        input: String,

        /// Store code.
        #[arg(short, long)]
        store: Option<String>,

        /// Image URL used when the product has no base image.
        #[arg(long)]
        placeholder: Option<String>,
    },
    /// Render the website structured data.
    Website {
        /// Store code.
        #[arg(short, long)]
        store: Option<String>,
    },
    /// Render the default fallback page.
    Fallback {
        /// Store name shown in the page heading.
        #[arg(long)]
        store_name: Option<String>,

        /// Store code.
        #[arg(short, long)]
        store: Option<String>,

        /// Replace the welcome message.
        #[arg(short, long)]
        message: Option<String>,

        /// Render without wrapper elements.
        #[arg(long)]
        minimal: bool,
    },
}

/// Arguments for the bootstrap command.
#[derive(Args)]
pub struct BootstrapArgs {
    /// Store code.
    #[arg(short, long)]
    pub store: Option<String>,

    /// Path prefix of the client assets (defaults to the config value).
    #[arg(long)]
    pub asset_base: Option<String>,

    /// Service worker script URL.
    #[arg(long)]
    pub service_worker_url: Option<String>,

    /// Service worker cache version.
    #[arg(long)]
    pub service_worker_version: Option<String>,

    /// Base URL of the CanvasKit renderer files.
    #[arg(long)]
    pub canvas_kit_base_url: Option<String>,

    /// Also emit the loading and mount elements.
    #[arg(long)]
    pub shell: bool,
}
