//! Region extraction policies.
//!
//! - **Link list** (navbar, footer): one `Link` record per anchor.
//! - **Mixed block** (notice, libraries): headings, paragraphs and anchors in
//!   document order.
//! - **Banner**: the first `h1` and every `p`, as plain text.
//! - **Images**: every `img` in the document.

use crate::models::{Dataset, ExtractedRecord, RecordType, Section};
use crate::utils::{element_text, normalize_attr, truncate_for_log};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::trace;
use url::Url;

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());
static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static P: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Elements the mixed-block policy visits. Anchors are handled separately.
const TEXT_TAGS: [&str; 3] = ["h2", "h3", "p"];

fn link_record(section: Section, anchor: &ElementRef<'_>, base: &Url) -> ExtractedRecord {
    let record = ExtractedRecord::link(
        section,
        element_text(anchor),
        normalize_attr(base, anchor.value().attr("href")),
    );
    trace!(%section, content = %truncate_for_log(&record.content, 60), url = %record.url, "Link");
    record
}

/// Every anchor under `region`, including anchors without an `href`.
pub fn link_list(section: Section, region: ElementRef<'_>, base: &Url) -> Dataset {
    region
        .select(&ANCHOR)
        .map(|a| link_record(section, &a, base))
        .collect()
}

fn is_text_tag(name: &str) -> bool {
    TEXT_TAGS.iter().any(|t| name.eq_ignore_ascii_case(t))
}

/// True if `el` sits inside a visited text element below `region`.
fn inside_text_element(el: &ElementRef<'_>, region: &ElementRef<'_>) -> bool {
    el.ancestors()
        .take_while(|node| node.id() != region.id())
        .filter_map(ElementRef::wrap)
        .any(|ancestor| is_text_tag(ancestor.value().name()))
}

/// Headings, paragraphs and anchors under `region`, in document order.
///
/// A heading or paragraph that contains anchors yields one `Link` record per
/// anchor and its own text is discarded. This mirrors the historical output
/// of the scraper and is kept as-is. Without anchors it yields a single text
/// record typed after its tag. Anchors outside any heading or paragraph
/// yield a `Link` record of their own; anchors already reported by their
/// enclosing element are not repeated.
pub fn mixed_block(section: Section, region: ElementRef<'_>, base: &Url) -> Dataset {
    let mut records = Dataset::new();
    for el in region.descendants().filter_map(ElementRef::wrap) {
        let name = el.value().name();
        if is_text_tag(name) {
            let links: Vec<_> = el.select(&ANCHOR).collect();
            if links.is_empty() {
                if let Some(kind) = RecordType::from_tag(name) {
                    records.push(ExtractedRecord::text(section, kind, element_text(&el)));
                }
            } else {
                records.extend(links.iter().map(|a| link_record(section, a, base)));
            }
        } else if name.eq_ignore_ascii_case("a") && !inside_text_element(&el, &region) {
            records.push(link_record(section, &el, base));
        }
    }
    records
}

/// The banner's first `h1` followed by every `p`, links ignored.
pub fn banner_block(region: ElementRef<'_>) -> Dataset {
    let heading = region
        .select(&H1)
        .next()
        .map(|h| ExtractedRecord::text(Section::Banner, RecordType::H1, element_text(&h)));
    let paragraphs = region
        .select(&P)
        .map(|p| ExtractedRecord::text(Section::Banner, RecordType::P, element_text(&p)));
    heading.into_iter().chain(paragraphs).collect()
}

/// Every `img` in the document, with empty strings for a missing `alt` or `src`.
pub fn images(document: &Html, base: &Url) -> Dataset {
    document
        .select(&IMG)
        .map(|img| {
            ExtractedRecord::image(
                img.value().attr("alt").unwrap_or_default(),
                normalize_attr(base, img.value().attr("src")),
            )
        })
        .collect()
}
