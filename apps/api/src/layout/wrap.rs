//! Greedy word wrap shared by the canvas height estimate and the exporter.
//!
//! Lines are returned as byte ranges into the source line rather than owned strings,
//! so callers can map substrings (e.g. link labels) onto the physical line they landed
//! on. Whitespace between words on the same physical line is kept verbatim; whitespace
//! at a break point is dropped.

use std::ops::Range;

/// Wraps `line` so that no physical line measures wider than `max_width`.
///
/// Words wider than `max_width` on their own are split between characters. A line
/// containing only whitespace yields no ranges.
pub fn wrap_ranges<F>(line: &str, max_width: f64, measure: F) -> Vec<Range<usize>>
where
    F: Fn(&str) -> f64,
{
    let mut lines: Vec<Range<usize>> = Vec::new();
    let mut current: Option<Range<usize>> = None;

    for word in word_ranges(line) {
        if let Some(range) = current.as_mut() {
            if measure(&line[range.start..word.end]) <= max_width {
                range.end = word.end;
                continue;
            }
            lines.push(range.clone());
        }
        current = Some(place_word(line, word, max_width, &measure, &mut lines));
    }

    if let Some(range) = current {
        lines.push(range);
    }
    lines
}

/// Starts a new physical line with `word`, splitting it when it cannot fit alone.
///
/// Full chunks are pushed onto `lines`; the returned range is the trailing chunk,
/// which stays open so following words can join it.
fn place_word<F>(
    line: &str,
    word: Range<usize>,
    max_width: f64,
    measure: &F,
    lines: &mut Vec<Range<usize>>,
) -> Range<usize>
where
    F: Fn(&str) -> f64,
{
    if measure(&line[word.clone()]) <= max_width {
        return word;
    }

    let mut start = word.start;
    let mut width = 0.0_f64;
    for (offset, ch) in line[word.clone()].char_indices() {
        let at = word.start + offset;
        let glyph = measure(&line[at..at + ch.len_utf8()]);
        if at > start && width + glyph > max_width {
            lines.push(start..at);
            start = at;
            width = 0.0;
        }
        width += glyph;
    }
    start..word.end
}

/// Byte ranges of the whitespace-separated words in `line`.
fn word_ranges(line: &str) -> Vec<Range<usize>> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (i, ch) in line.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push(s..i);
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push(s..line.len());
    }
    words
}
