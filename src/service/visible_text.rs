//! HTML to visible-text reduction
//!
//! Reduces a page to the text a human viewer would see, so markup, scripts
//! and hidden elements never contribute IOC candidates.

use scraper::node::Element;
use scraper::{ElementRef, Html, Node};

/// Subtrees that never carry visible content
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "head", "meta", "link", "title"];

/// Inline-style fragments that hide an element
const HIDDEN_STYLE_MARKERS: &[&str] = &[
    "display:none",
    "display: none",
    "visibility:hidden",
    "visibility: hidden",
];

/// Class names conventionally used to hide content from sighted users
const HIDDEN_CLASSES: &[&str] = &["hidden", "sr-only", "visually-hidden"];

/// Reduce raw HTML to its human-visible text
///
/// Input that carries no markup at all cannot be reduced structurally; it
/// is returned unchanged as a recoverable degradation rather than an
/// error, since the extractor can still scan raw text.
pub fn reduce_visible_text(html: &str) -> String {
    if !html.contains('<') {
        tracing::warn!(
            length = html.len(),
            "No markup found in body, falling back to raw content"
        );
        return html.to_string();
    }

    let document = Html::parse_document(html);

    let mut parts: Vec<&str> = Vec::new();
    collect_visible(document.root_element(), &mut parts);

    parts
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect_visible<'a>(element: ElementRef<'a>, parts: &mut Vec<&'a str>) {
    if SKIPPED_TAGS.contains(&element.value().name()) || is_hidden(element.value()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => parts.push(&**text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_visible(child_element, parts);
                }
            }
            // Comments and other node kinds carry no visible text
            _ => {}
        }
    }
}

fn is_hidden(element: &Element) -> bool {
    if let Some(style) = element.attr("style") {
        let style = style.to_lowercase();
        if HIDDEN_STYLE_MARKERS
            .iter()
            .any(|marker| style.contains(marker))
        {
            return true;
        }
    }

    if element
        .classes()
        .any(|class| HIDDEN_CLASSES.contains(&class))
    {
        return true;
    }

    if element.attr("aria-hidden") == Some("true") {
        return true;
    }

    element.attr("hidden").is_some()
}
