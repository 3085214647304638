mod splitter;

#[cfg(test)]
mod tests;

pub use splitter::{raw_segments, segment};

/// Opening delimiter the generator emits between pages (matched case-insensitively)
pub const PAGE_DELIMITER: &str = "<page>";

/// Optional closing delimiter; carries no content and is stripped wherever it appears
pub const PAGE_DELIMITER_CLOSE: &str = "</page>";
