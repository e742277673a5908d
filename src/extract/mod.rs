//! Section-driven extraction engine.
//!
//! Extraction runs in a single pass over an already-parsed document:
//!
//! 1. **Locate**: find each region's root element ([`locators`])
//! 2. **Extract**: apply the region's policy to produce records ([`policies`])
//! 3. **Merge**: concatenate the per-region records in a fixed order
//!
//! | Order | Section | Locator | Policy |
//! |-------|---------|---------|--------|
//! | 1 | Navbar | first `<nav>` | link list |
//! | 2 | Banner | banner class signature | banner |
//! | 3.. | Important Notice, CLIK Libraries | block after matching heading | mixed block |
//! | n-1 | Footer | first `<footer>` | link list |
//! | n | Images | whole document | images |
//!
//! A region that cannot be located contributes no records.

pub mod locators;
pub mod policies;

use crate::config::{HeadingRule, Matcher, ScrapeConfig};
use crate::error::{Result, ScrapeError};
use crate::models::{Dataset, Section};
use itertools::Itertools;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

/// A heading rule with its selector compiled.
#[derive(Debug, Clone)]
pub struct HeadingRegion {
    pub section: Section,
    pub heading: Selector,
    pub label: String,
    pub matcher: Matcher,
    pub block: String,
}

/// Compiled region locator configuration.
#[derive(Debug, Clone)]
pub struct RegionRules {
    pub banner: Selector,
    pub headings: Vec<HeadingRegion>,
}

fn compile(css: &str, what: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Config(format!("invalid {what} selector {css:?}: {e}")))
}

impl HeadingRegion {
    fn from_rule(rule: &HeadingRule) -> Result<Self> {
        Ok(Self {
            section: rule.section,
            heading: compile(&rule.tag, "heading")?,
            label: rule.label.clone(),
            matcher: rule.matcher,
            block: rule.block.clone(),
        })
    }
}

impl RegionRules {
    pub fn from_config(config: &ScrapeConfig) -> Result<Self> {
        Ok(Self {
            banner: compile(&config.banner_selector, "banner")?,
            headings: config
                .headings
                .iter()
                .map(HeadingRegion::from_rule)
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

fn region_not_found(section: Section) -> Dataset {
    info!(%section, "Region not found; no records");
    Dataset::new()
}

/// Extract every region of `document` and merge the results in region order.
#[instrument(level = "info", skip_all, fields(base = %base))]
pub fn extract_all(document: &Html, base: &Url, rules: &RegionRules) -> Dataset {
    let navbar = match locators::navbar(document) {
        Some(nav) => policies::link_list(Section::Navbar, nav, base),
        None => region_not_found(Section::Navbar),
    };

    let banner = match locators::banner(document, &rules.banner) {
        Some(region) => policies::banner_block(region),
        None => region_not_found(Section::Banner),
    };

    let blocks: Vec<Dataset> = rules
        .headings
        .iter()
        .map(|rule| {
            match locators::block_after_heading(document, &rule.heading, &rule.label, rule.matcher, &rule.block) {
                Some(region) => policies::mixed_block(rule.section, region, base),
                None => region_not_found(rule.section),
            }
        })
        .collect();

    let footer = match locators::footer(document) {
        Some(region) => policies::link_list(Section::Footer, region, base),
        None => region_not_found(Section::Footer),
    };

    let images = policies::images(document, base);

    merge(
        std::iter::once(navbar)
            .chain(std::iter::once(banner))
            .chain(blocks)
            .chain([footer, images]),
    )
}

/// Concatenate per-region outputs, preserving the order given.
pub fn merge(parts: impl IntoIterator<Item = Dataset>) -> Dataset {
    let mut dataset = Dataset::new();
    for part in parts {
        debug!(records = part.len(), "Merging region");
        dataset.extend(part);
    }
    dataset
}

/// Record count per section, in the order sections first appear.
pub fn section_counts(dataset: &Dataset) -> Vec<(Section, usize)> {
    let counts = dataset.iter().counts_by(|r| r.section);
    dataset
        .iter()
        .map(|r| r.section)
        .unique()
        .map(|section| (section, counts[&section]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExtractedRecord, RecordType};

    fn rules() -> RegionRules {
        RegionRules::from_config(&ScrapeConfig::default()).unwrap()
    }

    fn base() -> Url {
        Url::parse("https://x.test/").unwrap()
    }

    fn sections(dataset: &Dataset) -> Vec<Section> {
        dataset.iter().map(|r| r.section).collect()
    }

    #[test]
    fn test_region_order_follows_merge_order_not_page_order() {
        let doc = Html::parse_document(
            r#"<html><body>
                 <img src="top.png" alt="Top">
                 <footer><a href="/f">F</a></footer>
                 <h2>CLIK Libraries</h2><div><p>Libs</p></div>
                 <h2>Important Notice</h2><div><p>Notice</p></div>
                 <div class="site-banner-outter bg-with-image"><h1>Hi</h1></div>
                 <nav><a href="/n">N</a></nav>
               </body></html>"#,
        );
        let dataset = extract_all(&doc, &base(), &rules());
        assert_eq!(
            sections(&dataset),
            vec![
                Section::Navbar,
                Section::Banner,
                Section::ImportantNotice,
                Section::Libraries,
                Section::Footer,
                Section::Images,
            ]
        );
    }

    #[test]
    fn test_section_counts_follow_region_order() {
        let doc = Html::parse_document(
            r#"<html><body>
                 <h2>CLIK Libraries</h2><div><p>L1</p><p>L2</p></div>
                 <nav><a href="/a">A</a><a href="/b">B</a><a href="/c">C</a></nav>
                 <img src="i.png">
               </body></html>"#,
        );
        let dataset = extract_all(&doc, &base(), &rules());
        assert_eq!(
            section_counts(&dataset),
            vec![(Section::Navbar, 3), (Section::Libraries, 2), (Section::Images, 1)]
        );
        assert!(section_counts(&Dataset::new()).is_empty());
    }

    #[test]
    fn test_missing_regions_produce_no_records() {
        let doc = Html::parse_document("<html><body><p>Nothing to see</p></body></html>");
        assert!(extract_all(&doc, &base(), &rules()).is_empty());
    }

    #[test]
    fn test_missing_notice_keeps_other_regions() {
        let doc = Html::parse_document(
            r#"<html><body><nav><a href="/">Home</a></nav><h2>Other</h2><div><p>x</p></div></body></html>"#,
        );
        let dataset = extract_all(&doc, &base(), &rules());
        assert_eq!(dataset, vec![ExtractedRecord::link(Section::Navbar, "Home", "https://x.test/")]);
    }

    #[test]
    fn test_notice_heading_matches_by_substring_only() {
        let doc = Html::parse_document(
            r#"<html><body>
                 <h2>CLIK Libraries (new)</h2><div><p>not exact</p></div>
                 <h2>An Important Notice for users</h2><div><h3>Heads up</h3></div>
               </body></html>"#,
        );
        let dataset = extract_all(&doc, &base(), &rules());
        assert_eq!(
            dataset,
            vec![ExtractedRecord::text(Section::ImportantNotice, RecordType::H3, "Heads up")]
        );
    }

    #[test]
    fn test_duplicate_rows_are_kept() {
        let doc = Html::parse_document(r#"<html><body><img src="a.png"><img src="a.png"></body></html>"#);
        let dataset = extract_all(&doc, &base(), &rules());
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[0], dataset[1]);
    }

    #[test]
    fn test_merge_preserves_order() {
        let merged = merge(vec![
            vec![ExtractedRecord::image("1", "")],
            vec![],
            vec![ExtractedRecord::image("2", ""), ExtractedRecord::image("3", "")],
        ]);
        let alts: Vec<_> = merged.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(alts, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_invalid_banner_selector_is_config_error() {
        let mut config = ScrapeConfig::default();
        config.banner_selector = "div..".into();
        assert!(matches!(RegionRules::from_config(&config), Err(ScrapeError::Config(_))));
    }
}
