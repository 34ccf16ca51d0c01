//! Configuration and statistics for sentence-aware text chunking

use super::types::{ChunkType, TextChunk};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::{Duration, Instant};

/// Configuration for sentence-aware text chunking
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Target maximum characters per chunk (before overlap augmentation)
    pub chunk_size: usize,
    /// Characters carried from the end of the previous chunk (0 disables overlap)
    pub overlap: usize,
    /// Keep the original sentence terminators (`!`, `?`, `...`) instead of normalizing to `.`
    pub preserve_punctuation: bool,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            overlap: Self::DEFAULT_OVERLAP,
            preserve_punctuation: false,
        }
    }
}

impl ChunkingConfig {
    pub const DEFAULT_CHUNK_SIZE: usize = 1000;
    pub const DEFAULT_OVERLAP: usize = 100;
    pub const ENV_PREFIX: &'static str = "CHUNKING_";

    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
            ..Default::default()
        }
    }

    /// Load from `CHUNKING_*` environment variables, falling back to defaults per field
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(Self::ENV_PREFIX)
            .from_iter::<_, ChunkingConfig>(vars)
            .context("cannot read chunking config from env:")
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Statistical information for one chunking run
#[derive(Debug, Clone, Default)]
pub struct ChunkingStatistics {
    pub total_processing_time: Duration,

    /// Input text statistics
    pub input_char_count: usize,
    pub sentence_count: usize,

    /// Output chunk statistics
    pub total_chunks_created: usize,
    pub sentence_group_chunks: usize,
    pub word_split_chunks: usize,
    /// Chunks whose own content exceeds chunk_size (a single unsplittable word)
    pub oversized_chunks: usize,
    /// Characters added by overlap prefixes, separators included
    pub overlap_chars_added: usize,

    /// Sum of pre-overlap chunk lengths
    pub total_chunk_chars: usize,
    pub avg_chunk_chars: f32,
    pub max_chunk_chars: usize,
    pub min_chunk_chars: usize,

    pub sentence_boundary_preservation_rate: f32,
}

impl ChunkingStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_total_timing(&mut self) -> Instant {
        Instant::now()
    }

    pub fn finish_total_timing(&mut self, start: Instant) {
        self.total_processing_time = start.elapsed();
    }

    pub fn record_input_stats(&mut self, text: &str, sentence_count: usize) {
        self.input_char_count = text.chars().count();
        self.sentence_count = sentence_count;
    }

    /// Record a finished chunk (after overlap augmentation)
    pub fn record_chunk(&mut self, chunk: &TextChunk, chunk_size: usize) {
        self.total_chunks_created += 1;
        match chunk.chunk_type {
            ChunkType::SentenceGroup => self.sentence_group_chunks += 1,
            ChunkType::WordSplit => self.word_split_chunks += 1,
        }

        let own_chars = chunk.own_char_length();
        if own_chars > chunk_size {
            self.oversized_chunks += 1;
        }
        self.overlap_chars_added += chunk.char_length() - own_chars;
        self.total_chunk_chars += own_chars;

        if self.max_chunk_chars == 0 || own_chars > self.max_chunk_chars {
            self.max_chunk_chars = own_chars;
        }
        if self.min_chunk_chars == 0 || own_chars < self.min_chunk_chars {
            self.min_chunk_chars = own_chars;
        }
    }

    /// Calculate derived metrics (call this after all chunks are recorded)
    pub fn calculate_derived_metrics(&mut self) {
        if self.total_chunks_created > 0 {
            self.avg_chunk_chars =
                self.total_chunk_chars as f32 / self.total_chunks_created as f32;
            self.sentence_boundary_preservation_rate =
                self.sentence_group_chunks as f32 / self.total_chunks_created as f32;
        }
    }

    /// Get summary as string for logging
    pub fn summary(&self) -> String {
        format!(
            "Chunking Stats: {} chars, {} sentences -> {} chunks ({} word-split, {} oversized) in {}ms | \
            chunk chars min/avg/max: {}/{:.1}/{} | overlap chars: {} | Sent preservation: {:.1}%",
            self.input_char_count,
            self.sentence_count,
            self.total_chunks_created,
            self.word_split_chunks,
            self.oversized_chunks,
            self.total_processing_time.as_millis(),
            self.min_chunk_chars,
            self.avg_chunk_chars,
            self.max_chunk_chars,
            self.overlap_chars_added,
            self.sentence_boundary_preservation_rate * 100.0,
        )
    }
}
