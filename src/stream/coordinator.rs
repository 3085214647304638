use tracing::debug;

use crate::page::Page;
use crate::segmenter::segment;

/// Owns the live page list and active streaming index for one generation
/// session
///
/// The caller feeds the full accumulated text once per received chunk, in
/// receive order, and calls [`finalize`](Self::finalize) at stream end.
/// Every update is a synchronous re-derivation from the accumulated text;
/// the coordinator holds no timers and does no I/O.
#[derive(Debug, Default)]
pub struct StreamCoordinator {
    pages: Vec<Page>,
    active: Option<usize>,
}

impl StreamCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live page list, in index order
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Consume the coordinator, keeping the page list
    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    /// Index of the page currently receiving text, or `None` when nothing
    /// is streaming
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// True once every page has completed
    pub fn is_complete(&self) -> bool {
        !self.pages.is_empty() && self.pages.iter().all(|p| p.is_stream_complete)
    }

    /// Per-chunk update tick
    ///
    /// `accumulated` is the full text received so far this session, not the
    /// latest chunk. Re-segments from scratch, appends newly visible pages,
    /// refreshes live text, freezes pages that gained a later sibling, and
    /// re-derives the active index.
    pub fn apply_update(&mut self, accumulated: &str) {
        let parsed = segment(accumulated);

        // Newly visible indices join the live list in ascending order so
        // positional order always matches index order.
        for index in detect_new_pages(&self.pages, &parsed) {
            let mut page = parsed[index].clone();
            page.is_streaming = true;
            debug!(index, kind = ?page.kind, "new page detected");
            self.pages.push(page);
        }

        for (pos, page) in self.pages.iter_mut().enumerate() {
            if page.is_stream_complete {
                // Frozen pages never change again.
                continue;
            }
            if let Some(fresh) = parsed.get(pos) {
                // A type tag can straddle chunk boundaries, so kind and the
                // stripped content track the latest parse until the freeze.
                page.kind = fresh.kind;
                page.content = fresh.content.clone();
                page.streaming_content = fresh.content.clone();
                if page.is_streaming && pos + 1 < parsed.len() {
                    // A later page is visible, so no more text can arrive
                    // for this one.
                    page.freeze();
                    debug!(index = pos, "page stream complete");
                }
            }
        }

        self.active = next_streaming_index(&self.pages, self.active);

        // Guard against a refresh ordering where the just-selected page was
        // not touched by the loop above.
        if let Some(idx) = self.active {
            if let Some(fresh) = parsed.get(idx) {
                self.pages[idx].streaming_content = fresh.content.clone();
            }
        }
    }

    /// Stream end: force every page complete with best-available content
    ///
    /// The per-chunk freeze rule never completes the final page (no later
    /// sibling ever appears for it), so the caller must invoke this once the
    /// transport reports the stream finished.
    pub fn finalize(&mut self) {
        for page in &mut self.pages {
            page.is_stream_complete = true;
            page.is_streaming = false;
            if page.content.is_empty() && !page.streaming_content.is_empty() {
                page.content = page.streaming_content.clone();
            }
            page.streaming_content = page.content.clone();
        }
        self.active = None;
        debug!(pages = self.pages.len(), "stream finalized");
    }

    /// Session start: drop all pages and the active index
    pub fn reset(&mut self) {
        self.pages.clear();
        self.active = None;
    }
}

/// Indices present in `new` but absent from `old`, compared by `index`
pub fn detect_new_pages(old: &[Page], new: &[Page]) -> Vec<usize> {
    new.iter()
        .map(|page| page.index)
        .filter(|index| !old.iter().any(|existing| existing.index == *index))
        .collect()
}

/// Select the page that should keep receiving live text
///
/// The current index stays active while it refers to an incomplete page;
/// otherwise the first incomplete page wins. `None` means every page has
/// completed. An out-of-range current index is treated as "no page".
pub fn next_streaming_index(pages: &[Page], current: Option<usize>) -> Option<usize> {
    if let Some(idx) = current {
        if let Some(page) = pages.get(idx) {
            if !page.is_stream_complete {
                return Some(idx);
            }
        }
    }
    pages.iter().position(|page| !page.is_stream_complete)
}

#[cfg(test)]
mod helper_tests {
    use super::*;
    use crate::page::PageKind;

    fn make_page(index: usize, complete: bool) -> Page {
        let mut page = Page::new(index, PageKind::Content, format!("页{index}"));
        page.is_stream_complete = complete;
        page
    }

    #[test]
    fn test_detect_new_pages_returns_appended_indices() {
        let old = vec![make_page(0, true), make_page(1, false)];
        let new = vec![make_page(0, false), make_page(1, false), make_page(2, false)];

        assert_eq!(detect_new_pages(&old, &new), vec![2]);
        assert_eq!(detect_new_pages(&new, &old), Vec::<usize>::new());
        assert_eq!(detect_new_pages(&[], &old), vec![0, 1]);
    }

    #[test]
    fn test_next_streaming_index_advances_past_complete_page() {
        let pages = vec![make_page(0, true), make_page(1, false)];
        assert_eq!(next_streaming_index(&pages, Some(0)), Some(1));
    }

    #[test]
    fn test_next_streaming_index_keeps_incomplete_current() {
        let pages = vec![make_page(0, true), make_page(1, false), make_page(2, false)];
        assert_eq!(next_streaming_index(&pages, Some(1)), Some(1));
    }

    #[test]
    fn test_next_streaming_index_all_complete() {
        let pages = vec![make_page(0, true), make_page(1, true)];
        assert_eq!(next_streaming_index(&pages, Some(1)), None);
        assert_eq!(next_streaming_index(&[], None), None);
    }

    #[test]
    fn test_next_streaming_index_out_of_range_current() {
        let pages = vec![make_page(0, false)];
        // A stale index from a deleted page is treated as absent.
        assert_eq!(next_streaming_index(&pages, Some(7)), Some(0));
    }
}
