//! Build-time collection loading.
//!
//! Enumerates each collection's directory under the content root, parses
//! every file (whole-file JSON for record collections, YAML front-matter +
//! body for document collections), and validates each raw record against
//! the collection schema. Any failure in any file fails the whole load —
//! a broken record must block the build, never be silently dropped.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, instrument};

use pressmark_shared::{PressmarkError, Result};

use crate::registry::{CollectionDefinition, CollectionKind, Registry};
use crate::validate::{ValidatedRecord, validate};

/// One successfully loaded and validated collection member.
#[derive(Debug, Clone)]
pub struct LoadedEntry {
    /// File stem; the record's stable key within its collection.
    pub slug: String,
    /// The typed, schema-validated record.
    pub record: ValidatedRecord,
    /// Free-text body, for document collections only.
    pub body: Option<String>,
}

/// Load and validate every member of one collection.
///
/// A missing collection directory is an I/O error. Parse and validation
/// failures are collected across all files and reported together.
#[instrument(skip_all, fields(collection = %def.name))]
pub fn load_collection(content_root: &Path, def: &CollectionDefinition) -> Result<Vec<LoadedEntry>> {
    let dir = content_root.join(&def.name);
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .map_err(|e| PressmarkError::io(&dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| matches_kind(path, def.kind))
        .collect();
    paths.sort();

    let mut entries = Vec::with_capacity(paths.len());
    let mut failures: Vec<String> = Vec::new();

    for path in &paths {
        let content =
            std::fs::read_to_string(path).map_err(|e| PressmarkError::io(path, e))?;

        let (raw, body) = match parse_raw(&content, def.kind) {
            Ok(parsed) => parsed,
            Err(msg) => {
                failures.push(format!("{}: {msg}", display_path(path, content_root)));
                continue;
            }
        };

        match validate(&raw, def) {
            Ok(record) => {
                let slug = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                debug!(%slug, "loaded entry");
                entries.push(LoadedEntry { slug, record, body });
            }
            Err(report) => {
                failures.push(format!("{}: {report}", display_path(path, content_root)));
            }
        }
    }

    if failures.is_empty() {
        debug!(count = entries.len(), "collection loaded");
        Ok(entries)
    } else {
        Err(PressmarkError::validation(failures.join("\n")))
    }
}

/// Load every registered collection. Validation failures are aggregated
/// across collections so a single run reports every broken record.
pub fn load_all(
    content_root: &Path,
    registry: &Registry,
) -> Result<Vec<(String, Vec<LoadedEntry>)>> {
    let mut loaded = Vec::new();
    let mut failures: Vec<String> = Vec::new();

    for def in registry.collections() {
        match load_collection(content_root, def) {
            Ok(entries) => loaded.push((def.name.clone(), entries)),
            Err(PressmarkError::Validation { message }) => failures.push(message),
            Err(other) => return Err(other),
        }
    }

    if failures.is_empty() {
        Ok(loaded)
    } else {
        Err(PressmarkError::validation(failures.join("\n")))
    }
}

/// Whether a file belongs to a collection of the given kind.
fn matches_kind(path: &Path, kind: CollectionKind) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match kind {
        CollectionKind::Record => ext == "json",
        CollectionKind::Document => ext == "md" || ext == "mdx",
    }
}

/// Parse a file's contents into a raw record value (+ body for documents).
fn parse_raw(content: &str, kind: CollectionKind) -> std::result::Result<(Value, Option<String>), String> {
    match kind {
        CollectionKind::Record => {
            let value: Value =
                serde_json::from_str(content).map_err(|e| format!("parse error: {e}"))?;
            Ok((value, None))
        }
        CollectionKind::Document => {
            let Some((front_matter, body)) = split_front_matter(content) else {
                // No front-matter block: an empty record, so required
                // fields get reported as missing.
                return Ok((Value::Object(Default::default()), Some(content.to_string())));
            };

            let value: Value =
                serde_yaml::from_str(front_matter).map_err(|e| format!("parse error: {e}"))?;
            // Empty front-matter parses as YAML null.
            let value = if value.is_null() {
                Value::Object(Default::default())
            } else {
                value
            };
            Ok((value, Some(body.to_string())))
        }
    }
}

/// Split a `---`-delimited YAML front-matter block from the body.
fn split_front_matter(input: &str) -> Option<(&str, &str)> {
    const DELIM: &str = "---\n";
    let rest = input.strip_prefix(DELIM)?;
    let (front_matter, body) = rest.split_once("\n---")?;
    Some((front_matter, body.strip_prefix('\n').unwrap_or(body)))
}

/// Path relative to the content root, for diagnostics.
fn display_path(path: &Path, content_root: &Path) -> String {
    path.strip_prefix(content_root)
        .unwrap_or(path)
        .display()
        .to_string()
}
