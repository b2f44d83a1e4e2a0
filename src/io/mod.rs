mod source;
mod walk;

pub use source::{BytesSource, ContentSource, FileSource};
pub use walk::collect_entries;
