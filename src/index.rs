//! Offline indexing of the textbook's Markdown sources into chunk records

pub mod config;
pub mod loader;
pub mod pipeline;

pub use config::IndexerConfig;
pub use loader::{SourceDocument, load_markdown_files};
pub use pipeline::{ChunkRecord, IndexSummary, chunk_documents, run, write_jsonl};
