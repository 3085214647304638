mod coordinator;


pub use coordinator::{detect_new_pages, next_streaming_index, StreamCoordinator};
