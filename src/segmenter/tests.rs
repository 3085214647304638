use super::*;
use crate::page::PageKind;

#[test]
fn test_empty_text_yields_no_pages() {
    assert!(segment("").is_empty());
    assert!(segment("   \n  ").is_empty());
}

#[test]
fn test_marker_free_text_falls_back_to_single_page() {
    let pages = segment("今天聊聊秋季穿搭");

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].index, 0);
    assert_eq!(pages[0].kind, PageKind::Content);
    assert_eq!(pages[0].content, "今天聊聊秋季穿搭");
}

#[test]
fn test_tagged_marker_free_text() {
    let pages = segment("[封面]标题A");

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].kind, PageKind::Cover);
    assert_eq!(pages[0].content, "标题A");
}

#[test]
fn test_marker_before_content_layout() {
    let pages = segment("<page>[封面]标题A<page>[内容]正文B<page>[总结]回顾C");

    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].kind, PageKind::Cover);
    assert_eq!(pages[0].content, "标题A");
    assert_eq!(pages[1].kind, PageKind::Content);
    assert_eq!(pages[1].content, "正文B");
    assert_eq!(pages[2].kind, PageKind::Summary);
    assert_eq!(pages[2].content, "回顾C");
}

#[test]
fn test_marker_after_content_layout() {
    // Legacy prompt placed the marker after each page.
    let pages = segment("[封面]标题A<page>[内容]正文B<page>");

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].kind, PageKind::Cover);
    assert_eq!(pages[0].content, "标题A");
    assert_eq!(pages[1].kind, PageKind::Content);
    assert_eq!(pages[1].content, "正文B");
}

#[test]
fn test_marker_case_insensitive() {
    let pages = segment("<PAGE>[封面]标题A<Page>[内容]正文B");

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].kind, PageKind::Cover);
    assert_eq!(pages[1].kind, PageKind::Content);
}

#[test]
fn test_closing_markers_removed_anywhere() {
    let pages = segment("<page>[内容]文本</page>");
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].content, "文本");

    // Closing marker in the middle of a segment carries no content either.
    let pages = segment("<page>[内容]前半</PAGE>后半");
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].content, "前半后半");
}

#[test]
fn test_marker_only_text_yields_no_pages() {
    assert!(segment("<page>").is_empty());
    assert!(segment(" <page> \n <page> ").is_empty());
    assert!(segment("</page>").is_empty());
}

#[test]
fn test_indices_are_positional() {
    let pages = segment("<page>a<page> <page>b");

    // The blank middle piece is discarded and does not leave an index hole.
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].index, 0);
    assert_eq!(pages[0].content, "a");
    assert_eq!(pages[1].index, 1);
    assert_eq!(pages[1].content, "b");
}

#[test]
fn test_streaming_flags_start_cleared() {
    for page in segment("<page>[封面]标题A<page>[内容]正文B") {
        assert!(!page.is_streaming);
        assert!(!page.is_stream_complete);
        assert!(page.streaming_content.is_empty());
    }
}

#[test]
fn test_idempotent_on_identical_input() {
    let text = "<page>[封面]标题A<page>[内容]正文B<page>[总结]回";
    let first = segment(text);
    let second = segment(text);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.index, b.index);
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.content, b.content);
    }
}

#[test]
fn test_prefix_stable_under_extension() {
    let full = "<page>[封面]标题A\n副标题：秋日<page>[内容]正文B<page>[总结]回顾C";

    // Replay the text one char at a time; completed prefix segments must
    // keep their index and kind as the stream grows.
    let mut previous = segment("");
    for (offset, _) in full.char_indices().skip(1) {
        let current = segment(&full[..offset]);
        let stable = previous.len().saturating_sub(1);
        for k in 0..stable {
            assert_eq!(current[k].index, previous[k].index);
            assert_eq!(current[k].kind, previous[k].kind);
            assert_eq!(current[k].content, previous[k].content);
        }
        previous = current;
    }

    let final_pages = segment(full);
    assert_eq!(final_pages.len(), 3);
    assert_eq!(final_pages[2].content, "回顾C");
}

#[test]
fn test_raw_segments_keep_tags() {
    let raw = raw_segments("<page>[封面]标题A<page>[内容]正文B");

    assert_eq!(raw, vec!["[封面]标题A".to_string(), "[内容]正文B".to_string()]);
}
