//! Data models for extracted page content.
//!
//! This module defines the row schema shared by every region extractor:
//! - [`Section`]: the page region a record was taken from
//! - [`RecordType`]: what kind of element produced the record
//! - [`ExtractedRecord`]: one output row
//! - [`Dataset`]: the ordered collection of rows for one page
//!
//! Navbar and footer rows historically used a `Name` column where the other
//! regions used `Content`. Both are written to a single `Content` column.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named structural region of the page.
///
/// Serialized names are the labels used in the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Section {
    #[serde(alias = "navbar")]
    Navbar,
    #[serde(alias = "footer")]
    Footer,
    #[serde(alias = "banner")]
    Banner,
    #[serde(rename = "Important Notice", alias = "important_notice")]
    ImportantNotice,
    #[serde(rename = "CLIK Libraries", alias = "libraries")]
    Libraries,
    #[serde(alias = "images")]
    Images,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::Navbar => "Navbar",
            Section::Footer => "Footer",
            Section::Banner => "Banner",
            Section::ImportantNotice => "Important Notice",
            Section::Libraries => "CLIK Libraries",
            Section::Images => "Images",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The kind of element a record was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    #[serde(rename = "Link")]
    Link,
    H1,
    H2,
    H3,
    P,
    #[serde(rename = "Image")]
    Image,
}

impl RecordType {
    /// Map a text element's tag name to its record type.
    ///
    /// Returns `None` for tags that never produce a text record.
    pub fn from_tag(tag: &str) -> Option<RecordType> {
        match tag.to_ascii_lowercase().as_str() {
            "h1" => Some(RecordType::H1),
            "h2" => Some(RecordType::H2),
            "h3" => Some(RecordType::H3),
            "p" => Some(RecordType::P),
            _ => None,
        }
    }
}

/// One row of the output dataset.
///
/// `content` and `url` are always present; a missing attribute or a record
/// type without a URL is represented by an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtractedRecord {
    #[serde(rename = "Section")]
    pub section: Section,
    #[serde(rename = "Type")]
    pub kind: RecordType,
    #[serde(rename = "Content")]
    pub content: String,
    #[serde(rename = "URL")]
    pub url: String,
}

impl ExtractedRecord {
    pub fn link(section: Section, content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            section,
            kind: RecordType::Link,
            content: content.into(),
            url: url.into(),
        }
    }

    pub fn text(section: Section, kind: RecordType, content: impl Into<String>) -> Self {
        Self {
            section,
            kind,
            content: content.into(),
            url: String::new(),
        }
    }

    pub fn image(alt: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            section: Section::Images,
            kind: RecordType::Image,
            content: alt.into(),
            url: src.into(),
        }
    }
}

/// Ordered records for one page. Duplicates are permitted.
pub type Dataset = Vec<ExtractedRecord>;
