//! The collection registry: which content collections exist and what
//! shape their records must have.
//!
//! The registry is an explicit value constructed once at process start and
//! passed by reference to whatever consumes it (the loader, the CLI). It
//! is the single source of truth for which collection directories are
//! scanned at build time.

use std::collections::BTreeMap;

use pressmark_shared::{PressmarkError, Result};

// ---------------------------------------------------------------------------
// Field definitions
// ---------------------------------------------------------------------------

/// Primitive type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any string value.
    Str,
    /// A parseable date: RFC 3339 or `YYYY-MM-DD`.
    Date,
}

impl FieldKind {
    /// Human-readable name used in validation diagnostics.
    pub fn expected(self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Date => "date",
        }
    }
}

/// One field in a collection schema.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name as it appears in the raw record.
    pub name: String,
    /// Primitive type the value must have.
    pub kind: FieldKind,
    /// Whether the field must be present. Absence of an optional field is
    /// fine; absence of a required one is a validation failure.
    pub required: bool,
}

impl FieldDef {
    /// A required field.
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
        }
    }

    /// An optional field.
    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }
}

/// Ordered field definitions for one collection.
///
/// The schema is open: fields not listed here are ignored by validation,
/// never rejected.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// What kind of files a collection holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    /// Long-form content: YAML front-matter + free-text body (`.md`/`.mdx`).
    Document,
    /// Structured data: one whole-file JSON object per record, no body.
    Record,
}

/// A named, schema-governed partition of content.
#[derive(Debug, Clone)]
pub struct CollectionDefinition {
    /// Collection name; doubles as its directory name under the content root.
    pub name: String,
    /// Document or record collection.
    pub kind: CollectionKind,
    /// The authoritative shape every member record must satisfy.
    pub schema: Schema,
}

impl CollectionDefinition {
    pub fn new(name: impl Into<String>, kind: CollectionKind, schema: Schema) -> Self {
        Self {
            name: name.into(),
            kind,
            schema,
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Immutable-after-construction mapping from collection name to definition.
#[derive(Debug, Default)]
pub struct Registry {
    collections: BTreeMap<String, CollectionDefinition>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection. Fails on a duplicate name; the registry is
    /// left unchanged in that case.
    pub fn register(&mut self, def: CollectionDefinition) -> Result<()> {
        if self.collections.contains_key(&def.name) {
            return Err(PressmarkError::config(format!(
                "collection '{}' registered twice",
                def.name
            )));
        }
        self.collections.insert(def.name.clone(), def);
        Ok(())
    }

    /// Look up a collection by name.
    pub fn get(&self, name: &str) -> Option<&CollectionDefinition> {
        self.collections.get(name)
    }

    /// All registered collections, in name order.
    pub fn collections(&self) -> impl Iterator<Item = &CollectionDefinition> {
        self.collections.values()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

/// The deployed registry: `blog` (documents) and `bookmarks` (records).
pub fn default_registry() -> Result<Registry> {
    let mut registry = Registry::new();

    registry.register(CollectionDefinition::new(
        "blog",
        CollectionKind::Document,
        Schema::new(vec![
            FieldDef::required("title", FieldKind::Str),
            FieldDef::required("date", FieldKind::Date),
            FieldDef::optional("description", FieldKind::Str),
            FieldDef::optional("image", FieldKind::Str),
        ]),
    ))?;

    registry.register(CollectionDefinition::new(
        "bookmarks",
        CollectionKind::Record,
        Schema::new(vec![
            FieldDef::required("title", FieldKind::Str),
            FieldDef::required("url", FieldKind::Str),
            // Stored opaquely: any string round-trips, parseability is not
            // checked at capture or validation time.
            FieldDef::required("date", FieldKind::Str),
        ]),
    ))?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_shape() {
        let registry = default_registry().expect("default registry");
        assert_eq!(registry.len(), 2);

        let blog = registry.get("blog").expect("blog");
        assert_eq!(blog.kind, CollectionKind::Document);
        assert_eq!(blog.schema.fields().len(), 4);

        let bookmarks = registry.get("bookmarks").expect("bookmarks");
        assert_eq!(bookmarks.kind, CollectionKind::Record);
        let names: Vec<&str> = bookmarks
            .schema
            .fields()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["title", "url", "date"]);
        assert!(bookmarks.schema.fields().iter().all(|f| f.required));
    }

    #[test]
    fn duplicate_registration_is_a_config_error() {
        let mut registry = Registry::new();
        let def = || {
            CollectionDefinition::new(
                "notes",
                CollectionKind::Record,
                Schema::new(vec![FieldDef::required("title", FieldKind::Str)]),
            )
        };

        registry.register(def()).expect("first registration");
        let err = registry.register(def()).unwrap_err();
        assert!(err.to_string().contains("'notes' registered twice"));
        // Registry unchanged by the failed registration.
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn collections_iterate_in_name_order() {
        let registry = default_registry().expect("default registry");
        let names: Vec<&str> = registry.collections().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["blog", "bookmarks"]);
    }
}
