//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use pressmark_capture::{CaptureRequest, capture, http_client};
use pressmark_schema::{default_registry, load_all};
use pressmark_shared::{SiteConfig, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Pressmark — capture bookmarks and validate site content.
#[derive(Parser)]
#[command(
    name = "pressmark",
    version,
    about = "Capture bookmarks and validate content collections for a static site.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Capture a bookmark: fetch a page, extract its title, and write a
    /// record into the bookmarks collection.
    Add {
        /// URL to bookmark, passed verbatim to the fetch step.
        url: String,

        /// Date string stored on the record, opaquely. Defaults to the
        /// current timestamp.
        date: Option<String>,
    },

    /// Validate every content collection against its schema, reporting
    /// all violations at once.
    Check,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize pressmark.toml with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "pressmark=info",
        1 => "pressmark=debug",
        _ => "pressmark=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Add { url, date } => cmd_add(url, date).await,
        Command::Check => cmd_check().await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_add(url: String, date: Option<String>) -> Result<()> {
    let cwd = site_root()?;
    let config = load_config(&cwd)?;
    let out_dir = config.collection_dir(&cwd, "bookmarks");

    info!(%url, "capturing bookmark");

    let client = http_client()?;
    let request = CaptureRequest { url, date, out_dir };

    let spinner = fetch_spinner(&request.url);
    let result = capture(&client, &request).await;
    spinner.finish_and_clear();

    let outcome = result?;

    println!();
    println!("  Bookmark captured!");
    println!("  Title: {}", outcome.record.title);
    println!("  Date:  {}", outcome.record.date);
    println!("  Path:  {}", outcome.path.display());
    println!();

    Ok(())
}

async fn cmd_check() -> Result<()> {
    let cwd = site_root()?;
    let config = load_config(&cwd)?;
    let registry = default_registry()?;
    let content_root = config.content_root(&cwd);

    info!(root = %content_root.display(), "checking content collections");

    let loaded = load_all(&content_root, &registry)?;

    println!();
    for (name, entries) in &loaded {
        println!("  {name}: {} valid entries", entries.len());
    }
    println!();

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config(&site_root()?)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: SiteConfig = load_config(&site_root()?)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The site root: the directory the tool was invoked from.
fn site_root() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| eyre!("cannot determine working directory: {e}"))
}

/// Spinner shown while the fetch is in flight.
fn fetch_spinner(url: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message(format!("Fetching {url}"));
    spinner
}
