// Public API exports
pub mod content;
pub mod outline;
pub mod page;
pub mod segmenter;
pub mod stream;

// Re-export main types for convenience
pub use page::{Page, PageKind};

pub use segmenter::{raw_segments, segment, PAGE_DELIMITER, PAGE_DELIMITER_CLOSE};

pub use stream::{detect_new_pages, next_streaming_index, StreamCoordinator};

pub use outline::{Outline, OutlineError};

pub use content::{
    clean_page_markers, count_body_chars, has_title, parse_body, parse_cover_titles,
    parse_image_suggestion, parse_title, CoverTitles, ParsedBody,
};
