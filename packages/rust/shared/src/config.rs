//! Site configuration for Pressmark.
//!
//! Config lives at `pressmark.toml` in the site root (the directory the
//! tool is invoked from). CLI flags override config file values, which
//! override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PressmarkError, Result};

/// Default configuration file name, looked up in the working directory.
const CONFIG_FILE_NAME: &str = "pressmark.toml";

// ---------------------------------------------------------------------------
// Config structs (matching pressmark.toml schema)
// ---------------------------------------------------------------------------

/// Top-level site config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Content directory settings.
    #[serde(default)]
    pub content: ContentConfig,
}

/// `[content]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Root directory holding one subdirectory per collection.
    #[serde(default = "default_content_root")]
    pub root: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_content_root(),
        }
    }
}

fn default_content_root() -> String {
    "src/content".into()
}

impl SiteConfig {
    /// Absolute content root, resolved against `base` (normally the cwd).
    pub fn content_root(&self, base: &Path) -> PathBuf {
        let root = Path::new(&self.content.root);
        if root.is_absolute() {
            root.to_path_buf()
        } else {
            base.join(root)
        }
    }

    /// Directory for one collection: `<content_root>/<name>/`.
    pub fn collection_dir(&self, base: &Path, name: &str) -> PathBuf {
        self.content_root(base).join(name)
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path to the config file under `base`.
pub fn config_file_path(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE_NAME)
}

/// Load the site config from `base`. Returns defaults if the file does
/// not exist.
pub fn load_config(base: &Path) -> Result<SiteConfig> {
    let path = config_file_path(base);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(SiteConfig::default());
    }

    load_config_from(&path)
}

/// Load the site config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<SiteConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PressmarkError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| PressmarkError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Write a default config file under `base` and return its path.
pub fn init_config(base: &Path) -> Result<PathBuf> {
    let path = config_file_path(base);
    let config = SiteConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PressmarkError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PressmarkError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
