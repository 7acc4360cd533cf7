pub mod chunker;
pub mod locator;
pub mod metadata;
pub mod normalize;
pub mod section;

// Re-export key extraction types for convenience
pub use chunker::Chunker;
pub use locator::{locate_region, HandlerRegistry};
pub use metadata::{extract_metadata, Metadata};
pub use section::{SectionExtractor, SectionMap, TocEntry};
