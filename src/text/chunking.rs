//! Sentence-aware text chunking for RAG embedding
//!
//! Text is split at sentence terminators, sentences are packed greedily into
//! chunks of a bounded character length (falling back to word boundaries for
//! oversized sentences), and each chunk after the first is prefixed with the
//! tail of its predecessor.

pub mod chunker;
pub mod config;
pub mod error;
pub mod types;

// Re-export main public interfaces
pub use chunker::{Chunker, chunk_text};
pub use config::{ChunkingConfig, ChunkingStatistics};
pub use error::{ChunkingError, Result};
pub use types::{ChunkType, TextChunk};
