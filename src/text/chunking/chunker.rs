//! Sentence-aware chunker with word-level fallback and character overlap

use super::{
    config::{ChunkingConfig, ChunkingStatistics},
    error::{ChunkingError, Result},
    types::{ChunkType, TextChunk},
};
use crate::text::SentenceSplitter;
use tracing::{debug, info, warn};

/// Greedy packing state: the chunk being built plus the chunks already flushed.
///
/// Lengths are counted in `char`s. The buffer never carries leading or trailing
/// whitespace, so a piece joins it with exactly one space.
#[derive(Debug)]
struct ChunkAccumulator {
    chunk_size: usize,
    flushed: Vec<(String, ChunkType)>,
    current: String,
    current_chars: usize,
    current_type: ChunkType,
}

impl ChunkAccumulator {
    fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            flushed: Vec::new(),
            current: String::new(),
            current_chars: 0,
            current_type: ChunkType::SentenceGroup,
        }
    }

    fn fits(&self, piece_chars: usize) -> bool {
        let separator = usize::from(!self.current.is_empty());
        self.current_chars + separator + piece_chars <= self.chunk_size
    }

    fn append(&mut self, piece: &str, piece_chars: usize) {
        if !self.current.is_empty() {
            self.current.push(' ');
            self.current_chars += 1;
        }
        self.current.push_str(piece);
        self.current_chars += piece_chars;
    }

    fn flush(&mut self) {
        let content = std::mem::take(&mut self.current);
        let content = content.trim();
        if !content.is_empty() {
            self.flushed.push((content.to_string(), self.current_type));
        }
        self.current_chars = 0;
        self.current_type = ChunkType::SentenceGroup;
    }

    fn push_sentence(&mut self, sentence: &str) {
        let sentence_chars = sentence.chars().count();
        if self.fits(sentence_chars) {
            self.append(sentence, sentence_chars);
            return;
        }

        self.flush();
        if sentence_chars > self.chunk_size {
            debug!(
                "Sentence of {} chars exceeds chunk size {}, splitting by words",
                sentence_chars, self.chunk_size
            );
            self.push_words(sentence);
        } else {
            self.append(sentence, sentence_chars);
        }
    }

    /// Word-level fallback. The last partial group stays in the buffer so the
    /// following sentences can still join it.
    fn push_words(&mut self, sentence: &str) {
        self.current_type = ChunkType::WordSplit;
        for word in sentence.split_whitespace() {
            let word_chars = word.chars().count();
            if !self.current.is_empty() && !self.fits(word_chars) {
                self.flush();
                self.current_type = ChunkType::WordSplit;
            }
            if word_chars > self.chunk_size {
                warn!(
                    "Word of {} chars exceeds chunk size {}, keeping it whole",
                    word_chars, self.chunk_size
                );
            }
            self.append(word, word_chars);
        }
    }

    fn finish(mut self) -> Vec<(String, ChunkType)> {
        self.flush();
        self.flushed
    }
}

/// Last `count` characters of `text` (all of it when shorter)
fn tail_chars(text: &str, count: usize) -> &str {
    if count == 0 {
        return "";
    }
    text.char_indices()
        .rev()
        .nth(count - 1)
        .map(|(start, _)| &text[start..])
        .unwrap_or(text)
}

/// Splits documents into bounded, overlapping chunks along sentence boundaries.
///
/// Immutable after construction; one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkingConfig,
    sentence_splitter: SentenceSplitter,
}

impl Chunker {
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate().map_err(ChunkingError::configuration)?;
        if config.overlap >= config.chunk_size {
            warn!(
                "overlap ({}) is not smaller than chunk_size ({}), whole chunks will be repeated",
                config.overlap, config.chunk_size
            );
        }
        let sentence_splitter = SentenceSplitter::new(None, config.preserve_punctuation)?;
        Ok(Self {
            config,
            sentence_splitter,
        })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Chunk text into overlap-augmented chunks, in document order
    pub fn chunk(&self, text: &str) -> Vec<TextChunk> {
        self.chunk_with_statistics(text).0
    }

    /// Chunk text and return only the chunk contents
    pub fn chunk_strings(&self, text: &str) -> Vec<String> {
        self.chunk(text)
            .into_iter()
            .map(|chunk| chunk.content)
            .collect()
    }

    pub fn chunk_with_statistics(&self, text: &str) -> (Vec<TextChunk>, ChunkingStatistics) {
        let mut statistics = ChunkingStatistics::new();
        if text.is_empty() {
            return (Vec::new(), statistics);
        }
        debug!("Starting chunking for text of {} bytes", text.len());
        let total_start = statistics.start_total_timing();

        // Step 1: sentence segmentation
        let sentences = self.sentence_splitter.split(text);
        statistics.record_input_stats(text, sentences.len());
        debug!("Split text into {} sentences", sentences.len());

        // Step 2-4: greedy packing with word-level fallback
        let mut accumulator = ChunkAccumulator::new(self.config.chunk_size);
        for sentence in &sentences {
            accumulator.push_sentence(sentence);
        }
        let base_chunks = accumulator.finish();

        // Step 5: overlap augmentation
        let chunks = self.apply_overlap(base_chunks);
        for chunk in &chunks {
            statistics.record_chunk(chunk, self.config.chunk_size);
        }

        statistics.finish_total_timing(total_start);
        statistics.calculate_derived_metrics();
        info!("Chunking completed: {} chunks", chunks.len());
        debug!("{}", statistics.summary());

        (chunks, statistics)
    }

    /// Prefix every chunk after the first with the tail of its predecessor's own content
    fn apply_overlap(&self, base_chunks: Vec<(String, ChunkType)>) -> Vec<TextChunk> {
        let overlap = self.config.overlap;
        if overlap == 0 || base_chunks.len() < 2 {
            return base_chunks
                .into_iter()
                .enumerate()
                .map(|(index, (content, chunk_type))| TextChunk::new(content, index, chunk_type))
                .collect();
        }

        let mut chunks: Vec<TextChunk> = Vec::with_capacity(base_chunks.len());
        let mut previous: Option<&str> = None;
        for (index, (content, chunk_type)) in base_chunks.iter().enumerate() {
            let chunk = match previous {
                None => TextChunk::new(content.clone(), index, *chunk_type),
                Some(previous) => {
                    let carried = tail_chars(previous, overlap);
                    TextChunk::with_overlap(carried, content, index, *chunk_type)
                }
            };
            chunks.push(chunk);
            previous = Some(content.as_str());
        }
        chunks
    }
}

/// Chunk `text` into windows of at most `chunk_size` characters with `overlap`
/// characters carried between neighbours.
///
/// Fails only for an invalid configuration (`chunk_size == 0`).
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>> {
    let chunker = Chunker::new(ChunkingConfig::new(chunk_size, overlap))?;
    Ok(chunker.chunk_strings(text))
}
