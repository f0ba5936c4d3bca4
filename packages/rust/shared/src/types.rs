//! Core domain types for Pressmark content.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BookmarkRecord
// ---------------------------------------------------------------------------

/// A captured bookmark, persisted as one JSON file per bookmark in the
/// `bookmarks` collection directory.
///
/// The record carries exactly these three fields; its identity is the
/// slug-derived filename, never an explicit id field. The `date` string is
/// stored opaquely — it is whatever the author passed on the command line,
/// or an RFC 3339 timestamp when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    /// The bookmarked URL, verbatim as given.
    pub url: String,
    /// Text of the page's first `<title>` element; may be empty.
    pub title: String,
    /// Capture date, as an opaque string.
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookmark_roundtrip() {
        let record = BookmarkRecord {
            url: "https://example.com".into(),
            title: "Example Site".into(),
            date: "2024-03-01T12:00:00Z".into(),
        };

        let json = serde_json::to_string_pretty(&record).expect("serialize");
        let parsed: BookmarkRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, record);
    }

    #[test]
    fn bookmark_has_exactly_three_keys() {
        let record = BookmarkRecord {
            url: "https://example.com".into(),
            title: String::new(),
            date: "whenever".into(),
        };

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&record).expect("serialize"))
                .expect("reparse");
        let obj = value.as_object().expect("object");
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["date", "title", "url"]);
        assert_eq!(obj["title"], "");
    }

    #[test]
    fn opaque_date_survives() {
        // The date field is not parsed or normalized on the way through.
        let json = r#"{"url":"https://a.example","title":"A","date":"last tuesday"}"#;
        let parsed: BookmarkRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(parsed.date, "last tuesday");
    }
}
