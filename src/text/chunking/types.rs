//! Core data structures for sentence-aware text chunking

/// A chunk produced by [`super::Chunker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Chunk content, including the overlap prefix carried from the previous chunk
    pub content: String,
    /// Index of this chunk in the sequence
    pub chunk_index: usize,
    /// How the chunk was packed
    pub chunk_type: ChunkType,
    /// Byte length of the overlap prefix (carried characters plus separating space)
    overlap_prefix_len: usize,
}

impl TextChunk {
    /// Create a new chunk without overlap prefix
    pub fn new(content: String, chunk_index: usize, chunk_type: ChunkType) -> Self {
        Self {
            content,
            chunk_index,
            chunk_type,
            overlap_prefix_len: 0,
        }
    }

    /// Create a chunk whose content is `carried`, one space, then `own`
    pub fn with_overlap(
        carried: &str,
        own: &str,
        chunk_index: usize,
        chunk_type: ChunkType,
    ) -> Self {
        Self {
            content: format!("{carried} {own}"),
            chunk_index,
            chunk_type,
            overlap_prefix_len: carried.len() + 1,
        }
    }

    pub fn overlap_prefix_len(&self) -> usize {
        self.overlap_prefix_len
    }

    /// Content of this chunk before overlap augmentation.
    ///
    /// Falls back to the whole content if `content` was changed so that the
    /// recorded prefix no longer lines up with it.
    pub fn own_content(&self) -> &str {
        self.content
            .get(self.overlap_prefix_len..)
            .unwrap_or(&self.content)
    }

    /// Characters carried over from the previous chunk (without the separator)
    pub fn overlap_text(&self) -> &str {
        self.content
            .get(..self.overlap_prefix_len)
            .and_then(|prefix| prefix.strip_suffix(' '))
            .unwrap_or("")
    }

    pub fn has_overlap(&self) -> bool {
        self.overlap_prefix_len > 0
    }

    /// Get the length of the chunk in characters
    pub fn char_length(&self) -> usize {
        self.content.chars().count()
    }

    /// Get the length of the pre-overlap content in characters
    pub fn own_char_length(&self) -> usize {
        self.own_content().chars().count()
    }

    /// Check if this chunk is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Packing strategy that produced a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkType {
    /// One or more whole sentences
    SentenceGroup,
    /// Contains words split out of a sentence longer than the chunk size
    WordSplit,
}

impl ChunkType {
    /// Check if this chunk type keeps sentence boundaries intact
    pub fn preserves_boundaries(&self) -> bool {
        matches!(self, ChunkType::SentenceGroup)
    }

    /// Check if the word-level fallback was needed
    pub fn is_forced_split(&self) -> bool {
        matches!(self, ChunkType::WordSplit)
    }

    /// Get a human-readable description of the chunk type
    pub fn description(&self) -> &'static str {
        match self {
            ChunkType::SentenceGroup => "Sentence group",
            ChunkType::WordSplit => "Word-level split",
        }
    }
}

impl std::fmt::Display for ChunkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_chunk_creation() {
        let chunk = TextChunk::new(
            "This is a test sentence.".to_string(),
            0,
            ChunkType::SentenceGroup,
        );

        assert_eq!(chunk.content, "This is a test sentence.");
        assert_eq!(chunk.own_content(), "This is a test sentence.");
        assert_eq!(chunk.overlap_text(), "");
        assert_eq!(chunk.chunk_index, 0);
        assert_eq!(chunk.char_length(), 24);
        assert!(!chunk.has_overlap());
        assert!(!chunk.is_empty());
    }

    #[test]
    fn test_chunk_with_overlap_prefix() {
        let chunk = TextChunk::with_overlap(
            "ence.",
            "Here is another sentence.",
            1,
            ChunkType::SentenceGroup,
        );

        assert_eq!(chunk.content, "ence. Here is another sentence.");
        assert_eq!(chunk.overlap_prefix_len(), "ence. ".len());
        assert!(chunk.has_overlap());
        assert_eq!(chunk.overlap_text(), "ence.");
        assert_eq!(chunk.own_content(), "Here is another sentence.");
        assert_eq!(chunk.own_char_length(), 25);
    }

    #[test]
    fn test_edited_content_does_not_panic() {
        let mut chunk = TextChunk::with_overlap("ßen.", "Grüße.", 1, ChunkType::SentenceGroup);
        assert_eq!(chunk.overlap_text(), "ßen.");
        assert_eq!(chunk.own_content(), "Grüße.");

        // recorded prefix now ends inside 'ü'
        chunk.content = "abcdeü aus Wien.".to_string();
        assert_eq!(chunk.own_content(), "abcdeü aus Wien.");
        assert_eq!(chunk.overlap_text(), "");

        chunk.content = "ab".to_string();
        assert_eq!(chunk.own_content(), "ab");
        assert_eq!(chunk.overlap_text(), "");
        assert_eq!(chunk.own_char_length(), 2);
    }

    #[test]
    fn test_multibyte_lengths() {
        let chunk = TextChunk::new("ロボット工学.".to_string(), 0, ChunkType::WordSplit);
        assert_eq!(chunk.char_length(), 7);
        assert!(chunk.content.len() > chunk.char_length());
    }

    #[test]
    fn test_chunk_type_properties() {
        assert!(ChunkType::SentenceGroup.preserves_boundaries());
        assert!(!ChunkType::WordSplit.preserves_boundaries());
        assert!(ChunkType::WordSplit.is_forced_split());
        assert!(!ChunkType::SentenceGroup.is_forced_split());
    }

    #[test]
    fn test_chunk_type_display() {
        assert_eq!(format!("{}", ChunkType::SentenceGroup), "Sentence group");
        assert_eq!(format!("{}", ChunkType::WordSplit), "Word-level split");
    }
}
