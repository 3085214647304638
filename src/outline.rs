//! Editing operations on a finished outline
//!
//! Streaming owns the page list only while text is arriving; once the user
//! starts editing, the outline is an ordinary document. These operations
//! reassign indices explicitly (the only place that happens outside the
//! segmenter) and keep the raw text in sync so a regenerate request can feed
//! it back to the model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::page::{Page, PageKind};
use crate::segmenter::PAGE_DELIMITER;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OutlineError {
    #[error("no page with index {index}")]
    PageNotFound { index: usize },

    #[error("page position {position} out of range (len: {len})")]
    PositionOutOfRange { position: usize, len: usize },
}

/// A finished outline: the raw generator text plus its pages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outline {
    pub raw: String,
    pub pages: Vec<Page>,
}

impl Outline {
    /// Build an outline from finalized pages, deriving the raw text
    pub fn from_pages(pages: Vec<Page>) -> Self {
        let mut outline = Self {
            raw: String::new(),
            pages,
        };
        outline.sync_raw();
        outline
    }

    /// Replace a page's content by its stable index
    pub fn update_page(&mut self, index: usize, content: impl Into<String>) -> Result<(), OutlineError> {
        let page = self
            .pages
            .iter_mut()
            .find(|p| p.index == index)
            .ok_or(OutlineError::PageNotFound { index })?;
        page.content = content.into();
        self.sync_raw();
        Ok(())
    }

    /// Remove a page by its stable index; remaining pages are reindexed
    pub fn delete_page(&mut self, index: usize) {
        self.pages.retain(|p| p.index != index);
        self.reindex();
        self.sync_raw();
    }

    /// Append a page at the end
    pub fn add_page(&mut self, kind: PageKind, content: impl Into<String>) {
        let index = self.pages.len();
        self.pages.push(Page::new(index, kind, content.into()));
        self.sync_raw();
    }

    /// Insert a page after the given position
    pub fn insert_page(
        &mut self,
        after: usize,
        kind: PageKind,
        content: impl Into<String>,
    ) -> Result<(), OutlineError> {
        if after >= self.pages.len() {
            return Err(OutlineError::PositionOutOfRange {
                position: after,
                len: self.pages.len(),
            });
        }
        self.pages
            .insert(after + 1, Page::new(after + 1, kind, content.into()));
        self.reindex();
        self.sync_raw();
        Ok(())
    }

    /// Drag-reorder: move the page at `from` to position `to`
    pub fn move_page(&mut self, from: usize, to: usize) -> Result<(), OutlineError> {
        let len = self.pages.len();
        for position in [from, to] {
            if position >= len {
                return Err(OutlineError::PositionOutOfRange { position, len });
            }
        }
        let page = self.pages.remove(from);
        self.pages.insert(to, page);
        self.reindex();
        self.sync_raw();
        Ok(())
    }

    /// Rebuild `raw` from the pages
    ///
    /// Each page becomes `[label]\ncontent` and pages are joined with the
    /// page delimiter, so the result round-trips through the segmenter with
    /// kinds intact.
    pub fn sync_raw(&mut self) {
        let parts: Vec<String> = self
            .pages
            .iter()
            .filter(|page| !page.content.trim().is_empty())
            .map(|page| format!("{}\n{}", page.kind.label(), page.content.trim()))
            .collect();
        self.raw = parts.join(&format!("\n\n{PAGE_DELIMITER}\n\n"));
    }

    fn reindex(&mut self) {
        for (position, page) in self.pages.iter_mut().enumerate() {
            page.index = position;
        }
    }
}
