//! Pressmark CLI — content pipeline for a statically generated site.
//!
//! Captures bookmarks into the content directory and validates every
//! content collection against its schema before a build.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
