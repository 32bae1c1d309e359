//! Display transform: replaces each detected profile URL with its platform label.

use std::ops::Range;

use serde::Serialize;

use crate::links::detector::{detect_links, DetectedLink};

/// A detected link plus where its label landed in the rewritten string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayLink {
    #[serde(flatten)]
    pub link: DetectedLink,
    pub label_range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayText {
    pub rewritten: String,
    /// In source order.
    pub links: Vec<DisplayLink>,
}

/// Rewrites `text` for display, substituting labels for profile URLs.
pub fn rewrite_for_display(text: &str) -> DisplayText {
    let detected = detect_links(text);
    if detected.is_empty() {
        return DisplayText {
            rewritten: text.to_string(),
            links: Vec::new(),
        };
    }

    // Right to left, so offsets of links not yet substituted stay valid.
    let mut rewritten = text.to_string();
    for link in detected.iter().rev() {
        rewritten.replace_range(link.start_offset..link.end_offset, &link.platform_label);
    }

    // Label positions: each earlier substitution shifts later ones by its delta.
    let mut shift: isize = 0;
    let links = detected
        .into_iter()
        .map(|link| {
            let start = (link.start_offset as isize + shift) as usize;
            let end = start + link.platform_label.len();
            shift += link.platform_label.len() as isize - link.original_text.len() as isize;
            DisplayLink {
                link,
                label_range: start..end,
            }
        })
        .collect();

    DisplayText { rewritten, links }
}
