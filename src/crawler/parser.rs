//! HTML parser for extracting anchors and page text
//!
//! This module parses fetched HTML to produce the three things the crawler
//! reads from a page:
//! - the page title
//! - every anchor with its href and trimmed label text
//! - the rendered text content, for email extraction

use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// All text content of the document, space-joined
    pub text: String,

    /// All anchors found on the page, in document order
    pub anchors: Vec<Anchor>,
}

/// An anchor element with its raw href and label text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Raw href attribute value, not yet resolved
    pub href: String,

    /// Whitespace-trimmed link text
    pub text: String,
}

/// Parses HTML content into title, text, and anchors
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        text: extract_text(&document),
        anchors: extract_anchors(&document),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects all text nodes of the document into one string
///
/// Text nodes are joined with single spaces so that tokens from adjacent
/// elements do not run together.
fn extract_text(document: &Html) -> String {
    document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts every anchor that carries an href attribute
fn extract_anchors(document: &Html) -> Vec<Anchor> {
    let mut anchors = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                let text = element.text().collect::<String>().trim().to_string();
                anchors.push(Anchor {
                    href: href.to_string(),
                    text,
                });
            }
        }
    }

    anchors
}
