use crate::page::{Page, PageKind};

use super::{PAGE_DELIMITER, PAGE_DELIMITER_CLOSE};

/// Delimiter split strategies, tried in fixed fallback order
///
/// The generator currently emits a `<page>` marker before every page, while
/// older prompts put the marker after each page (or omitted it entirely for
/// single-page outlines). Keeping the two layouts as separate strategies
/// makes each independently testable instead of spreading the compatibility
/// branches through one function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SplitStrategy {
    /// Segments bounded by `<page>` markers. Tolerates the marker coming
    /// before or after a segment's text because empty pieces are discarded.
    /// Does not apply when no marker is present.
    MarkerBounded,
    /// Legacy fallback for marker-free text: the whole text is one segment.
    WholeText,
}

impl SplitStrategy {
    /// Split `text` into trimmed, non-empty segments
    ///
    /// Returns `None` when the strategy does not apply, handing the input to
    /// the next strategy in order.
    pub(crate) fn try_split(self, text: &str) -> Option<Vec<String>> {
        match self {
            SplitStrategy::MarkerBounded => {
                find_ci(text, PAGE_DELIMITER, 0)?;
                Some(
                    split_ci(text, PAGE_DELIMITER)
                        .into_iter()
                        .map(str::trim)
                        .filter(|piece| !piece.is_empty())
                        .map(str::to_string)
                        .collect(),
                )
            }
            SplitStrategy::WholeText => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Some(Vec::new())
                } else {
                    Some(vec![trimmed.to_string()])
                }
            }
        }
    }
}

/// Raw per-segment texts from accumulated outline text
///
/// Closing markers are stripped first (they carry no content), then the text
/// is split by the first applicable strategy. Type tags are left in place;
/// this is the text a still-streaming page displays.
pub fn raw_segments(accumulated: &str) -> Vec<String> {
    let text = strip_ci(accumulated, PAGE_DELIMITER_CLOSE);
    for strategy in [SplitStrategy::MarkerBounded, SplitStrategy::WholeText] {
        if let Some(segments) = strategy.try_split(&text) {
            return segments;
        }
    }
    Vec::new()
}

/// Segment accumulated text into classified pages
///
/// Total and idempotent: the same text always yields the same list, and
/// extending the text only ever moves the last segment's boundary. Indices
/// are assigned positionally on every re-parse. Streaming flags start out
/// cleared; the coordinator owns them.
pub fn segment(accumulated: &str) -> Vec<Page> {
    raw_segments(accumulated)
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let (kind, content) = classify(&raw);
            Page::new(index, kind, content.to_string())
        })
        .collect()
}

/// Classify a raw segment by its leading bracket tag
///
/// A recognized tag maps to its kind and is stripped together with one
/// following whitespace run. Unrecognized brackets stay in the content so
/// unknown tags are not silently dropped.
pub(crate) fn classify(segment: &str) -> (PageKind, &str) {
    if let Some((tag, rest)) = leading_bracket_tag(segment) {
        if let Some(kind) = PageKind::from_tag(tag) {
            return (kind, rest.trim_start());
        }
    }
    (PageKind::Content, segment)
}

/// Leading `[tag]` where the tag is a non-empty run of non-whitespace
fn leading_bracket_tag(segment: &str) -> Option<(&str, &str)> {
    let body = segment.strip_prefix('[')?;
    let close = body.find(']')?;
    let tag = &body[..close];
    if tag.is_empty() || tag.chars().any(char::is_whitespace) {
        return None;
    }
    Some((tag, &body[close + 1..]))
}

/// Byte offset of the next case-insensitive occurrence of `token` at or
/// after `from`
///
/// The token must be ASCII, so matches always land on char boundaries even
/// in CJK text.
fn find_ci(text: &str, token: &str, from: usize) -> Option<usize> {
    debug_assert!(token.is_ascii() && !token.is_empty());
    let haystack = text.as_bytes().get(from..)?;
    let needle = token.as_bytes();
    haystack
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|pos| from + pos)
}

/// Split on every case-insensitive occurrence of an ASCII token
fn split_ci<'a>(text: &'a str, token: &str) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    while let Some(pos) = find_ci(text, token, start) {
        pieces.push(&text[start..pos]);
        start = pos + token.len();
    }
    pieces.push(&text[start..]);
    pieces
}

/// Remove every case-insensitive occurrence of an ASCII token
fn strip_ci(text: &str, token: &str) -> String {
    split_ci(text, token).concat()
}
