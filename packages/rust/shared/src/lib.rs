//! Shared types, error model, and configuration for Pressmark.
//!
//! This crate is the foundation depended on by the other Pressmark crates.
//! It provides:
//! - [`PressmarkError`] — the unified error type
//! - Domain types ([`BookmarkRecord`])
//! - Configuration ([`SiteConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    ContentConfig, SiteConfig, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{PressmarkError, Result};
pub use types::BookmarkRecord;
