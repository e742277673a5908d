//! Region locators.
//!
//! Each locator finds the root element of one named region, or `None` when
//! the page has no such region.

use crate::config::Matcher;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static NAV: Lazy<Selector> = Lazy::new(|| Selector::parse("nav").unwrap());
static FOOTER: Lazy<Selector> = Lazy::new(|| Selector::parse("footer").unwrap());

/// The first `<nav>` landmark.
pub fn navbar(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&NAV).next()
}

/// The first `<footer>` landmark.
pub fn footer(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&FOOTER).next()
}

/// The first element matching the banner's class signature.
pub fn banner<'a>(document: &'a Html, signature: &Selector) -> Option<ElementRef<'a>> {
    document.select(signature).next()
}

/// The first `heading` whose text matches `label`.
pub fn heading<'a>(
    document: &'a Html,
    heading: &Selector,
    label: &str,
    matcher: Matcher,
) -> Option<ElementRef<'a>> {
    document
        .select(heading)
        .find(|h| matcher.matches(&h.text().collect::<String>(), label))
}

/// The first `name` element after `from` in document order.
///
/// Document order includes `from`'s own descendants, so a block nested inside
/// the heading is found before anything following it.
pub fn next_element_named<'a>(
    document: &'a Html,
    from: ElementRef<'a>,
    name: &str,
) -> Option<ElementRef<'a>> {
    document
        .tree
        .root()
        .descendants()
        .skip_while(|node| node.id() != from.id())
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name().eq_ignore_ascii_case(name))
}

/// The block following the first heading that matches `label`.
pub fn block_after_heading<'a>(
    document: &'a Html,
    heading_selector: &Selector,
    label: &str,
    matcher: Matcher,
    block: &str,
) -> Option<ElementRef<'a>> {
    let found = heading(document, heading_selector, label, matcher)?;
    next_element_named(document, found, block)
}
