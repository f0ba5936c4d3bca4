//! Content collection schemas and build-time validation for Pressmark.
//!
//! Three pieces:
//! - [`Registry`] — which collections exist and the schema each record
//!   must satisfy, constructed once and passed by reference.
//! - [`validate`] — a single generic validator driven by the declarative
//!   schema, reporting every violation at once.
//! - [`load_collection`] / [`load_all`] — the build-time loader that scans
//!   collection directories and refuses to hand over invalid content.

pub mod loader;
pub mod registry;
pub mod validate;

pub use loader::{LoadedEntry, load_all, load_collection};
pub use registry::{
    CollectionDefinition, CollectionKind, FieldDef, FieldKind, Registry, Schema, default_registry,
};
pub use validate::{FieldValue, ValidatedRecord, ValidationReport, Violation, ViolationKind, validate};
