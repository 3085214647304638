use serde::{Deserialize, Serialize};

/// Classification of outline pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// Opening slide with the deck title
    Cover,
    /// Regular body slide
    #[default]
    Content,
    /// Closing recap slide
    Summary,
}

impl PageKind {
    /// Map a bracket tag word to a kind
    ///
    /// Returns `None` for unrecognized tags; callers treat those segments
    /// as ordinary content and leave the bracket in place.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "封面" => Some(PageKind::Cover),
            "内容" => Some(PageKind::Content),
            "总结" => Some(PageKind::Summary),
            _ => None,
        }
    }

    /// The tag word the generator emits for this kind
    pub fn tag(&self) -> &'static str {
        match self {
            PageKind::Cover => "封面",
            PageKind::Content => "内容",
            PageKind::Summary => "总结",
        }
    }

    /// Bracketed label used when rebuilding raw outline text
    pub fn label(&self) -> &'static str {
        match self {
            PageKind::Cover => "[封面]",
            PageKind::Content => "[内容]",
            PageKind::Summary => "[总结]",
        }
    }
}

/// One segment of the outline with its streaming lifecycle flags
///
/// Serialized as camelCase JSON with the kind under `type`, matching the
/// shape the persistence layer stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Zero-based position in the outline; stable identity for the page
    pub index: usize,
    /// Page classification
    #[serde(rename = "type")]
    pub kind: PageKind,
    /// Finalized text payload, tag marker stripped
    pub content: String,
    /// In-progress text while the page is still being written
    #[serde(default)]
    pub streaming_content: String,
    /// True while this page is the active receiver of new text
    #[serde(default)]
    pub is_streaming: bool,
    /// True once no further text will be appended to this page
    #[serde(default)]
    pub is_stream_complete: bool,
}

impl Page {
    /// Create a freshly segmented page
    ///
    /// The segmenter only proposes identity, kind and content; the streaming
    /// flags are owned by the coordinator and start out cleared.
    pub fn new(index: usize, kind: PageKind, content: String) -> Self {
        Self {
            index,
            kind,
            content,
            streaming_content: String::new(),
            is_streaming: false,
            is_stream_complete: false,
        }
    }

    /// One-way transition from streaming to finalized
    ///
    /// `content` already holds the tag-stripped parse of the latest text, so
    /// freezing mirrors it into `streaming_content` and flips the flags.
    pub(crate) fn freeze(&mut self) {
        self.is_stream_complete = true;
        self.is_streaming = false;
        self.streaming_content = self.content.clone();
    }
}
