mod extract;


pub use extract::{
    clean_page_markers, count_body_chars, has_title, parse_body, parse_cover_titles,
    parse_image_suggestion, parse_title, CoverTitles, ParsedBody,
};
