//! Utility functions for URL normalization, text cleanup, and file system checks.
//!
//! This module provides helpers used throughout the application:
//! - Resolving possibly-relative references against the page's base URL
//! - Collapsing an element's visible text into a single trimmed line
//! - String truncation for logging
//! - Output directory validation before a run starts

use crate::error::ScrapeError;
use scraper::ElementRef;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument};
use url::Url;

/// Resolve `reference` against `base` into an absolute URL.
///
/// A reference that already carries a scheme is returned unchanged (apart
/// from surrounding whitespace). Anything else is joined onto `base` using
/// standard relative resolution, so `..`, query strings and fragments behave
/// the way a browser would treat them.
///
/// This never fails: if the reference cannot be resolved the raw string is
/// returned.
///
/// # Examples
///
/// ```ignore
/// let base = Url::parse("https://x.test/docs/").unwrap();
/// assert_eq!(normalize(&base, "../a.html?q=1#top"), "https://x.test/a.html?q=1#top");
/// assert_eq!(normalize(&base, "mailto:help@x.test"), "mailto:help@x.test");
/// ```
pub fn normalize(base: &Url, reference: &str) -> String {
    let reference = reference.trim();
    if Url::parse(reference).is_ok() {
        return reference.to_string();
    }
    match base.join(reference) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            debug!(%base, reference, error = %e, "Malformed URL; keeping raw reference");
            reference.to_string()
        }
    }
}

/// Normalize an optional attribute value.
///
/// Missing or blank attributes stay empty rather than resolving to the base
/// URL.
pub fn normalize_attr(base: &Url, value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => normalize(base, v),
        _ => String::new(),
    }
}

/// Visible text of an element, trimmed, with every internal whitespace run
/// (newlines included) collapsed to a single space.
pub fn element_text(element: &ElementRef<'_>) -> String {
    collapse_whitespace(element.text())
}

/// Join text fragments, collapsing any whitespace run into a single space.
pub fn collapse_whitespace<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for word in fragments.into_iter().flat_map(str::split_whitespace) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and
/// byte count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Ensure the directory that will hold `output_path` exists and is writable.
///
/// The directory is created if missing, then checked by creating and removing
/// a throwaway file.
#[instrument(level = "info", skip_all, fields(path = %output_path.display()))]
pub async fn ensure_writable_parent(output_path: &Path) -> Result<(), ScrapeError> {
    let dir = match output_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    let sink_err = |e: std::io::Error| ScrapeError::sink(dir.display().to_string(), e);
    fs::create_dir_all(&dir).await.map_err(sink_err)?;
    let check_path = dir.join(".write_check");
    stdfs::File::create(&check_path).map_err(sink_err)?;
    let _ = stdfs::remove_file(&check_path);
    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn base() -> Url {
        Url::parse("https://x.test/docs/guide/").unwrap()
    }

    #[test]
    fn test_normalize_relative_paths() {
        assert_eq!(normalize(&base(), "intro.html"), "https://x.test/docs/guide/intro.html");
        assert_eq!(normalize(&base(), "/about"), "https://x.test/about");
        assert_eq!(normalize(&base(), "../faq"), "https://x.test/docs/faq");
    }

    #[test]
    fn test_normalize_keeps_query_and_fragment() {
        assert_eq!(
            normalize(&base(), "../search?q=rust&page=2#results"),
            "https://x.test/docs/search?q=rust&page=2#results"
        );
        assert_eq!(normalize(&base(), "#top"), "https://x.test/docs/guide/#top");
    }

    #[test]
    fn test_normalize_resolved_url_shares_scheme_and_host() {
        for r in ["a", "./b/c", "../../d", "/e?x=1", "f#g"] {
            let out = Url::parse(&normalize(&base(), r)).unwrap();
            assert_eq!(out.scheme(), "https");
            assert_eq!(out.host_str(), Some("x.test"));
        }
    }

    #[test]
    fn test_normalize_absolute_unchanged() {
        for r in [
            "https://other.test/path?a=1",
            "http://x.test/../weird",
            "mailto:help@x.test",
            "tel:+61000000",
        ] {
            assert_eq!(normalize(&base(), r), r);
        }
    }

    #[test]
    fn test_normalize_protocol_relative() {
        assert_eq!(normalize(&base(), "//cdn.x.test/logo.png"), "https://cdn.x.test/logo.png");
    }

    #[test]
    fn test_normalize_malformed_returns_raw() {
        let base = Url::parse("mailto:someone@x.test").unwrap();
        assert_eq!(normalize(&base, "relative/path"), "relative/path");
    }

    #[test]
    fn test_normalize_attr_empty_and_missing() {
        assert_eq!(normalize_attr(&base(), None), "");
        assert_eq!(normalize_attr(&base(), Some("   ")), "");
        assert_eq!(normalize_attr(&base(), Some(" x.png ")), "https://x.test/docs/guide/x.png");
    }

    #[test]
    fn test_element_text_collapses_whitespace() {
        let html = Html::parse_fragment("<p>\n  Hello   <b>big</b>\n world  </p>");
        let p = html.select(&Selector::parse("p").unwrap()).next().unwrap();
        assert_eq!(element_text(&p), "Hello big world");
    }

    #[test]
    fn test_element_text_joins_wrapped_anchor_text() {
        let html = Html::parse_fragment("<a href=\"/about\">  About\n   us </a>");
        let a = html.select(&Selector::parse("a").unwrap()).next().unwrap();
        assert_eq!(element_text(&a), "About us");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let result = truncate_for_log("ééééé", 2);
        assert_eq!(result, "éé…(+6 bytes)");
    }

    #[tokio::test]
    async fn test_ensure_writable_parent_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("nested").join("out.csv");
        ensure_writable_parent(&out).await.unwrap();
        assert!(tmp.path().join("nested").is_dir());
        assert!(!tmp.path().join("nested").join(".write_check").exists());
    }
}
