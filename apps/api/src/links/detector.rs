//! Social-profile link detection.
//!
//! A permissive URL pattern finds candidate tokens; a token is a link only when its
//! host/path contains a key from `PLATFORMS`. The table is scanned top to bottom and
//! the first hit wins, so path-qualified keys are listed before their bare domains.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One row of the platform table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Substring searched for in the scheme- and `www.`-stripped token (lowercase).
    pub key: &'static str,
    pub label: &'static str,
    /// Canonical URL prefix; whatever follows `key` in the token is appended.
    pub root: &'static str,
}

pub const PLATFORMS: &[Platform] = &[
    Platform { key: "linkedin.com/in/", label: "LinkedIn", root: "https://www.linkedin.com/in/" },
    Platform { key: "linkedin.com", label: "LinkedIn", root: "https://www.linkedin.com/" },
    Platform { key: "github.com/", label: "GitHub", root: "https://github.com/" },
    Platform { key: "github.com", label: "GitHub", root: "https://github.com/" },
    Platform { key: "gitlab.com", label: "GitLab", root: "https://gitlab.com/" },
    Platform { key: "stackoverflow.com/users/", label: "Stack Overflow", root: "https://stackoverflow.com/users/" },
    Platform { key: "stackoverflow.com", label: "Stack Overflow", root: "https://stackoverflow.com/" },
    Platform { key: "twitter.com", label: "Twitter", root: "https://twitter.com/" },
    Platform { key: "x.com", label: "X", root: "https://x.com/" },
    Platform { key: "instagram.com", label: "Instagram", root: "https://www.instagram.com/" },
    Platform { key: "facebook.com", label: "Facebook", root: "https://www.facebook.com/" },
    Platform { key: "behance.net", label: "Behance", root: "https://www.behance.net/" },
    Platform { key: "dribbble.com", label: "Dribbble", root: "https://dribbble.com/" },
];

/// A profile URL found in a source string.
///
/// `start_offset..end_offset` are byte offsets into the scanned string; slicing the
/// source with them yields `original_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedLink {
    pub original_text: String,
    pub platform_label: String,
    pub canonical_url: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

static URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| {
        Regex::new(r"(?i)(?:https?://)?(?:www\.)?[a-z0-9-]+(?:\.[a-z0-9-]+)+(?:/[^\s|,;()<>]*)?")
            .expect("Invalid URL regex")
    })
}

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ':', ';', '!', '?', ')', '\'', '"'];

/// Scans `text` for social-profile URLs, in left-to-right order.
pub fn detect_links(text: &str) -> Vec<DetectedLink> {
    url_regex()
        .find_iter(text)
        .filter_map(|m| {
            // e-mail domains are not profile links
            if text[..m.start()].ends_with('@') {
                return None;
            }
            let token = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
            if token.is_empty() {
                return None;
            }
            let (platform, canonical_url) = classify(token)?;
            Some(DetectedLink {
                original_text: token.to_string(),
                platform_label: platform.label.to_string(),
                canonical_url,
                start_offset: m.start(),
                end_offset: m.start() + token.len(),
            })
        })
        .collect()
}

/// Matches a URL-shaped token against the platform table.
///
/// Returns the winning platform and the canonical URL for the token.
pub fn classify(token: &str) -> Option<(&'static Platform, String)> {
    let stripped = strip_prefixes(token);
    let lowered = stripped.to_ascii_lowercase();

    PLATFORMS.iter().find_map(|platform| {
        let at = find_key(&lowered, platform.key)?;
        let remainder = stripped[at + platform.key.len()..].trim_start_matches('/');
        let canonical = if remainder.is_empty() {
            platform.root.trim_end_matches('/').to_string()
        } else {
            format!("{}{}", platform.root, remainder)
        };
        Some((platform, canonical))
    })
}

/// Drops an `http(s)://` scheme and a leading `www.`, case-insensitively.
fn strip_prefixes(token: &str) -> &str {
    let mut rest = token;
    for prefix in ["https://", "http://", "www."] {
        if rest.len() >= prefix.len() && rest[..prefix.len()].eq_ignore_ascii_case(prefix) {
            rest = &rest[prefix.len()..];
        }
    }
    rest
}

/// First occurrence of `key` in `haystack` that starts a host label and, for bare
/// domain keys, ends the host. `x.com` must not match inside `dropbox.com`, and
/// `github.com` must not match `github.com.evil.io`.
fn find_key(haystack: &str, key: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    haystack.match_indices(key).map(|(at, _)| at).find(|&at| {
        let starts_label = at == 0 || bytes[at - 1] == b'.';
        let end = at + key.len();
        let ends_label = key.ends_with('/')
            || bytes
                .get(end)
                .map_or(true, |b| !(b.is_ascii_alphanumeric() || *b == b'-' || *b == b'.'));
        starts_label && ends_label
    })
}
