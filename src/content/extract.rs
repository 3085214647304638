//! Title, body and image-suggestion extraction from finalized page content
//!
//! These run after a page has completed streaming. The segmenter already
//! strips recognized type tags, but content edited by hand or restored from
//! older sessions may still carry one, so every entry point cleans markers
//! first.

use serde::{Deserialize, Serialize};

use crate::page::PageKind;

/// Main and optional sub title extracted from a cover page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverTitles {
    pub main_title: Option<String>,
    pub sub_title: Option<String>,
}

/// Body text with its image suggestion split out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBody {
    /// Body without the suggestion block
    pub body_content: String,
    /// `None` when the page carries no suggestion marker
    pub image_suggestion: Option<String>,
}

/// Strip a leading page-type marker from content, then trim
///
/// The bracket characters are optional, so `[内容]正文` and `内容\n正文` both
/// lose the marker. Content without a marker passes through trimmed.
pub fn clean_page_markers(content: &str) -> String {
    match strip_leading_marker(content) {
        Some(rest) => rest.trim().to_string(),
        None => content.trim().to_string(),
    }
}

fn strip_leading_marker(content: &str) -> Option<&str> {
    let body = content.strip_prefix('[').unwrap_or(content);
    for kind in [PageKind::Cover, PageKind::Content, PageKind::Summary] {
        if let Some(rest) = body.strip_prefix(kind.tag()) {
            let rest = rest.strip_prefix(']').unwrap_or(rest);
            return Some(rest.trim_start());
        }
    }
    None
}

/// Extract the main and sub title from cover content
///
/// Lines with explicit `标题：` / `副标题：` keywords win; otherwise the
/// first non-empty line is the main title and the second the sub title.
pub fn parse_cover_titles(content: &str) -> CoverTitles {
    let cleaned = clean_page_markers(content);
    if cleaned.is_empty() {
        return CoverTitles::default();
    }

    let mut titles = CoverTitles::default();
    for line in cleaned.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if titles.main_title.is_none() {
            if let Some(value) = keyword_value(line, "标题") {
                titles.main_title = Some(value.to_string());
                continue;
            }
        }
        if titles.sub_title.is_none() {
            if let Some(value) = keyword_value(line, "副标题") {
                titles.sub_title = Some(value.to_string());
                continue;
            }
        }
        if titles.main_title.is_none() {
            titles.main_title = Some(line.to_string());
        } else if titles.sub_title.is_none() {
            titles.sub_title = Some(line.to_string());
        }
    }
    titles
}

/// The page's title: cover pages use the cover main title, other kinds the
/// first line
pub fn parse_title(content: &str, kind: PageKind) -> Option<String> {
    let cleaned = clean_page_markers(content);
    if cleaned.is_empty() {
        return None;
    }
    if kind == PageKind::Cover {
        return parse_cover_titles(&cleaned).main_title;
    }
    cleaned
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
}

/// Everything except the title lines
///
/// Cover pages drop the recognized title and subtitle lines from the top;
/// other kinds drop the first line.
pub fn parse_body(content: &str, kind: PageKind) -> String {
    let cleaned = clean_page_markers(content);
    if cleaned.is_empty() {
        return String::new();
    }
    let lines: Vec<&str> = cleaned.split('\n').collect();

    if kind == PageKind::Cover {
        let titles = parse_cover_titles(&cleaned);
        let mut skip = 0;
        for (i, raw_line) in lines.iter().enumerate() {
            let line = raw_line.trim();
            let is_main_title = titles.main_title.as_deref().is_some_and(|main| {
                line.contains(main) && (has_keyword_prefix(line, "标题") || i == 0)
            });
            if is_main_title {
                skip += 1;
                continue;
            }
            let is_sub_title = titles
                .sub_title
                .as_deref()
                .is_some_and(|sub| line.contains(sub) && has_keyword_prefix(line, "副标题"));
            if is_sub_title {
                skip += 1;
                continue;
            }
            break;
        }
        return lines[skip..].join("\n").trim().to_string();
    }

    if lines.len() <= 1 {
        return String::new();
    }
    lines[1..].join("\n")
}

/// Split the body at a `配图建议：` or `背景：` line marker
///
/// Cover pages use 背景, other pages 配图建议; both are accepted everywhere
/// because the generator is not consistent about it.
pub fn parse_image_suggestion(content: &str, kind: PageKind) -> ParsedBody {
    let body = parse_body(content, kind);
    if body.is_empty() {
        return ParsedBody {
            body_content: String::new(),
            image_suggestion: None,
        };
    }

    for keyword in ["配图建议", "背景"] {
        if let Some((before, after)) = split_at_line_marker(&body, keyword) {
            return ParsedBody {
                body_content: before.trim().to_string(),
                image_suggestion: Some(after.trim().to_string()),
            };
        }
    }
    ParsedBody {
        body_content: body,
        image_suggestion: None,
    }
}

/// Character count of the body, excluding title and markers
pub fn count_body_chars(content: &str, kind: PageKind) -> usize {
    parse_body(content, kind).chars().count()
}

/// Whether the page yields a non-empty title
pub fn has_title(content: &str, kind: PageKind) -> bool {
    parse_title(content, kind).is_some()
}

/// Value of a `标题：值` style line, accepting half- and full-width colons
fn keyword_value<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    let value = rest
        .strip_prefix('：')
        .or_else(|| rest.strip_prefix(':'))?
        .trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Whether the line starts with `keyword` followed by a colon
fn has_keyword_prefix(line: &str, keyword: &str) -> bool {
    line.strip_prefix(keyword)
        .map(|rest| rest.starts_with('：') || rest.starts_with(':'))
        .unwrap_or(false)
}

/// Find `\n<keyword>：` and split the text around the marker
fn split_at_line_marker<'a>(text: &'a str, keyword: &str) -> Option<(&'a str, &'a str)> {
    let mut search = 0;
    while let Some(rel) = text[search..].find('\n') {
        let at = search + rel;
        let line = &text[at + 1..];
        if let Some(rest) = line.strip_prefix(keyword) {
            if let Some(value) = rest.strip_prefix('：').or_else(|| rest.strip_prefix(':')) {
                return Some((&text[..at], value));
            }
        }
        search = at + 1;
    }
    None
}
