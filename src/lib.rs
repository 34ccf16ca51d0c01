pub mod index;
pub mod text;
pub mod util;

pub use text::chunking::{Chunker, ChunkingConfig, chunk_text};
pub use text::context::{ContextDocument, format_context};
