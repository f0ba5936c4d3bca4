//! Bookmark capture: fetch a page, extract its title, persist a record.
//!
//! A single linear pipeline per invocation — one GET, one file write, no
//! retries and no partial state. The record lands at
//! `<bookmarks dir>/<slugified-title>.json`; writing is an unconditional
//! overwrite, so two titles that slugify identically are last-writer-wins.
//! That collision behavior is intentional: the tool is a manually-invoked
//! authoring aid, and the slug is the record's identity.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};

use pressmark_shared::{BookmarkRecord, PressmarkError, Result};

/// User-Agent string for capture requests.
const USER_AGENT: &str = concat!("Pressmark/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Request/outcome types
// ---------------------------------------------------------------------------

/// Inputs for one capture invocation.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    /// Target URL, passed to the fetch verbatim — invalid syntax fails
    /// naturally at fetch time.
    pub url: String,
    /// Explicit date string; stored opaquely. `None` means "now".
    pub date: Option<String>,
    /// The bookmarks collection directory. Must already exist.
    pub out_dir: PathBuf,
}

/// Result of a successful capture.
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    /// Path of the written record file.
    pub path: PathBuf,
    /// The record as written.
    pub record: BookmarkRecord,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Build the HTTP client used for captures.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(5))
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| PressmarkError::Fetch(format!("failed to build HTTP client: {e}")))
}

/// Capture one bookmark: fetch → extract title → slugify → write JSON.
///
/// Every failure is fatal; a failed capture leaves the content directory
/// unchanged.
#[instrument(skip_all, fields(url = %request.url))]
pub async fn capture(client: &Client, request: &CaptureRequest) -> Result<CaptureOutcome> {
    debug!("fetching page");

    let response = client
        .get(&request.url)
        .send()
        .await
        .map_err(|e| PressmarkError::Fetch(format!("{}: {e}", request.url)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PressmarkError::Fetch(format!(
            "{}: HTTP {status}",
            request.url
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| PressmarkError::Fetch(format!("{}: body read failed: {e}", request.url)))?;

    let title = extract_title(&body);
    let slug = slugify(&title);

    let record = BookmarkRecord {
        url: request.url.clone(),
        title,
        date: request
            .date
            .clone()
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    };

    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| PressmarkError::parse(format!("record serialization failed: {e}")))?;

    let path = request.out_dir.join(format!("{slug}.json"));
    std::fs::write(&path, json).map_err(|e| PressmarkError::io(&path, e))?;

    info!(path = %path.display(), title = %record.title, "bookmark captured");

    Ok(CaptureOutcome { path, record })
}

// ---------------------------------------------------------------------------
// Title extraction
// ---------------------------------------------------------------------------

/// Text content of the document's first `<title>` element, trimmed.
///
/// Returns the empty string when no `<title>` exists — a title-less page
/// is still capturable. Malformed HTML is handled best-effort by the
/// parser.
pub fn extract_title(html: &str) -> String {
    let doc = Html::parse_document(html);
    let title_sel = Selector::parse("title").unwrap();
    doc.select(&title_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Slugs
// ---------------------------------------------------------------------------

/// Derive the record's filename stem from a title.
///
/// Transliterates to ASCII, lowercases, and collapses every run of
/// non-alphanumeric characters to a single `-`. Output alphabet is exactly
/// `[a-z0-9-]`, with no leading or trailing dash.
pub fn slugify(title: &str) -> String {
    let mut output = String::with_capacity(title.len());

    let mut need_dash = false;
    for ch in title.chars() {
        for b in deunicode::deunicode_char(ch).unwrap_or("-").bytes() {
            match b {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' => {
                    if need_dash {
                        output.push('-');
                        need_dash = false;
                    }
                    output.push(b.to_ascii_lowercase() as char);
                }
                _ => {
                    need_dash = !output.is_empty();
                }
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_title_exact_trimmed_text() {
        let html = "<html><head><title>  Example Site \n</title></head><body></body></html>";
        assert_eq!(extract_title(html), "Example Site");
    }

    #[test]
    fn extract_title_empty_when_absent() {
        let html = "<html><head></head><body><h1>No title element</h1></body></html>";
        assert_eq!(extract_title(html), "");
    }

    #[test]
    fn extract_title_first_element_wins() {
        let html = "<html><head><title>First</title><title>Second</title></head></html>";
        assert_eq!(extract_title(html), "First");
    }

    #[test]
    fn extract_title_tolerates_malformed_html() {
        // Unclosed tags after the title: best-effort parsing still finds it.
        let html = "<title>Still Works</title><p>unclosed<div><span>";
        assert_eq!(extract_title(html), "Still Works");
    }

    #[test]
    fn extract_title_unclosed_title_swallows_rest() {
        // <title> is RCDATA: without a closing tag, everything that follows
        // is title text, markup included.
        let html = "<title>Runs On</h1><p>to the end";
        assert_eq!(extract_title(html), "Runs On</h1><p>to the end");
    }

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Example Site"), "example-site");
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn slugify_transliterates_unicode() {
        assert_eq!(slugify("Café São Paulo"), "cafe-sao-paulo");
        assert_eq!(slugify("Überblick"), "uberblick");
    }

    #[test]
    fn slugify_alphabet_is_closed() {
        let slug = slugify("A/B: testing? (100%) — results & more_stuff");
        assert!(!slug.is_empty());
        assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!slug.starts_with('-'));
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn slugify_empty_title() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("???"), "");
    }
}
