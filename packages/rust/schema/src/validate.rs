//! Generic record validation driven by collection schemas.
//!
//! A single validator walks the declarative field definitions, so new
//! collections and fields require no new validation code. Validation makes
//! one full pass and reports **every** violation, never just the first —
//! a build failure should show all content errors at once.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::registry::{CollectionDefinition, FieldKind};

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A required field is absent (or JSON `null`).
    Missing,
    /// The field is present but has the wrong type or an unparseable value.
    WrongType { expected: &'static str },
    /// The record itself is not a JSON object.
    NotAnObject,
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the offending field (`$` for record-level violations).
    pub field: String,
    pub kind: ViolationKind,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "missing required field `{}`", self.field),
            ViolationKind::WrongType { expected } => {
                write!(f, "field `{}` is not a {expected}", self.field)
            }
            ViolationKind::NotAnObject => write!(f, "record is not an object"),
        }
    }
}

/// All violations found in one record. Non-empty by construction.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", render(.violations))]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

fn render(violations: &[Violation]) -> String {
    let parts: Vec<String> = violations.iter().map(ToString::to_string).collect();
    parts.join("; ")
}

impl ValidationReport {
    /// Names of all violating fields, in schema order.
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// Validated output
// ---------------------------------------------------------------------------

/// A typed field value after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Str(String),
    Date(DateTime<Utc>),
}

/// A record that passed validation against its collection's schema.
#[derive(Debug, Clone)]
pub struct ValidatedRecord {
    /// Name of the collection the record belongs to.
    pub collection: String,
    /// Typed values for every schema field present in the record. Fields
    /// outside the schema are dropped; the schema stays open on input.
    pub fields: BTreeMap<String, FieldValue>,
}

impl ValidatedRecord {
    /// Typed value of one field, if present.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// String value of one field, if present and a string.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Str(s)) => Some(s),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a raw record (parsed JSON or parsed front-matter) against a
/// collection definition.
///
/// Returns the typed record, or a report enumerating every violation.
pub fn validate(
    value: &Value,
    def: &CollectionDefinition,
) -> Result<ValidatedRecord, ValidationReport> {
    let Some(obj) = value.as_object() else {
        return Err(ValidationReport {
            violations: vec![Violation {
                field: "$".into(),
                kind: ViolationKind::NotAnObject,
            }],
        });
    };

    let mut fields = BTreeMap::new();
    let mut violations = Vec::new();

    for field in def.schema.fields() {
        match obj.get(&field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    violations.push(Violation {
                        field: field.name.clone(),
                        kind: ViolationKind::Missing,
                    });
                }
            }
            Some(raw) => match typed_value(raw, field.kind) {
                Some(typed) => {
                    fields.insert(field.name.clone(), typed);
                }
                None => violations.push(Violation {
                    field: field.name.clone(),
                    kind: ViolationKind::WrongType {
                        expected: field.kind.expected(),
                    },
                }),
            },
        }
    }

    if violations.is_empty() {
        Ok(ValidatedRecord {
            collection: def.name.clone(),
            fields,
        })
    } else {
        Err(ValidationReport { violations })
    }
}

/// Coerce a raw JSON value to the declared field kind.
fn typed_value(raw: &Value, kind: FieldKind) -> Option<FieldValue> {
    let s = raw.as_str()?;
    match kind {
        FieldKind::Str => Some(FieldValue::Str(s.to_string())),
        FieldKind::Date => parse_date(s).map(FieldValue::Date),
    }
}

/// Parse an RFC 3339 datetime or a bare `YYYY-MM-DD` date (midnight UTC).
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::default_registry;
    use serde_json::json;

    fn bookmarks() -> CollectionDefinition {
        default_registry()
            .expect("registry")
            .get("bookmarks")
            .expect("bookmarks")
            .clone()
    }

    fn blog() -> CollectionDefinition {
        default_registry()
            .expect("registry")
            .get("blog")
            .expect("blog")
            .clone()
    }

    #[test]
    fn valid_bookmark_passes_with_typed_fields() {
        let raw = json!({
            "title": "Example Site",
            "url": "https://example.com",
            "date": "2024-03-01T12:00:00.000Z",
        });

        let record = validate(&raw, &bookmarks()).expect("valid record");
        assert_eq!(record.collection, "bookmarks");
        assert_eq!(record.str_field("title"), Some("Example Site"));
        assert_eq!(record.str_field("url"), Some("https://example.com"));
        // Bookmark dates are typed Str: stored opaquely.
        assert_eq!(record.str_field("date"), Some("2024-03-01T12:00:00.000Z"));
    }

    #[test]
    fn missing_fields_are_all_reported() {
        // {"title":"X"} is missing both url and date.
        let raw = json!({ "title": "X" });

        let report = validate(&raw, &bookmarks()).unwrap_err();
        assert_eq!(report.fields(), vec!["url", "date"]);
        assert!(
            report
                .violations
                .iter()
                .all(|v| v.kind == ViolationKind::Missing)
        );
        let msg = report.to_string();
        assert!(msg.contains("`url`"));
        assert!(msg.contains("`date`"));
    }

    #[test]
    fn wrong_type_reported_alongside_missing() {
        let raw = json!({ "title": 42, "url": "https://example.com" });

        let report = validate(&raw, &bookmarks()).unwrap_err();
        assert_eq!(report.fields(), vec!["title", "date"]);
        assert_eq!(
            report.violations[0].kind,
            ViolationKind::WrongType { expected: "string" }
        );
        assert_eq!(report.violations[1].kind, ViolationKind::Missing);
    }

    #[test]
    fn opaque_bookmark_date_accepts_any_string() {
        let raw = json!({ "title": "X", "url": "https://x.example", "date": "last tuesday" });
        assert!(validate(&raw, &bookmarks()).is_ok());
    }

    #[test]
    fn null_counts_as_missing() {
        let raw = json!({ "title": "X", "url": null, "date": "2024-01-01" });
        let report = validate(&raw, &bookmarks()).unwrap_err();
        assert_eq!(report.fields(), vec!["url"]);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let raw = json!({
            "title": "X",
            "url": "https://x.example",
            "date": "2024-01-01",
            "tags": ["unrecognized"],
        });
        let record = validate(&raw, &bookmarks()).expect("open schema");
        assert!(record.get("tags").is_none());
    }

    #[test]
    fn blog_date_must_be_parseable() {
        let raw = json!({ "title": "Post", "date": "not a date" });
        let report = validate(&raw, &blog()).unwrap_err();
        assert_eq!(report.fields(), vec!["date"]);
        assert_eq!(
            report.violations[0].kind,
            ViolationKind::WrongType { expected: "date" }
        );

        let raw = json!({ "title": "Post", "date": "2024-03-01" });
        let record = validate(&raw, &blog()).expect("bare date");
        assert!(matches!(record.get("date"), Some(FieldValue::Date(_))));
    }

    #[test]
    fn optional_blog_fields_may_be_absent() {
        let raw = json!({ "title": "Post", "date": "2024-03-01" });
        let record = validate(&raw, &blog()).expect("valid without optionals");
        assert!(record.get("description").is_none());

        // But when present, they must still type-check.
        let raw = json!({ "title": "Post", "date": "2024-03-01", "image": 7 });
        let report = validate(&raw, &blog()).unwrap_err();
        assert_eq!(report.fields(), vec!["image"]);
    }

    #[test]
    fn non_object_record_is_reported() {
        let raw = json!(["not", "an", "object"]);
        let report = validate(&raw, &bookmarks()).unwrap_err();
        assert_eq!(report.violations[0].kind, ViolationKind::NotAnObject);
        assert!(report.to_string().contains("not an object"));
    }
}
