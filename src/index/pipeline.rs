use super::config::IndexerConfig;
use super::loader::{SourceDocument, load_markdown_files, resolve_docs_dir};
use crate::text::chunking::Chunker;
use crate::text::context::ContextDocument;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// One chunk as handed to the embedding service and stored as vector payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// `{original_id}_chunk_{chunk_index}`
    pub id: String,
    pub content: String,
    pub original_id: String,
    pub chunk_index: usize,
    pub file_path: String,
    pub title: String,
    pub source: String,
}

impl ChunkRecord {
    pub fn record_id(original_id: &str, chunk_index: usize) -> String {
        format!("{original_id}_chunk_{chunk_index}")
    }

    /// Fragment view used when this record comes back from retrieval
    pub fn to_context_document(&self) -> ContextDocument {
        ContextDocument::new(self.content.clone())
            .with_source(self.source.clone())
            .with_title(self.title.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub docs_dir: PathBuf,
    pub documents: usize,
    pub chunks: usize,
    pub output_path: Option<PathBuf>,
}

pub fn chunk_document(chunker: &Chunker, document: &SourceDocument) -> Vec<ChunkRecord> {
    chunker
        .chunk(&document.content)
        .into_iter()
        .map(|chunk| ChunkRecord {
            id: ChunkRecord::record_id(&document.id, chunk.chunk_index),
            content: chunk.content,
            original_id: document.id.clone(),
            chunk_index: chunk.chunk_index,
            file_path: document.file_path.clone(),
            title: document.title.clone(),
            source: document.source.clone(),
        })
        .collect()
}

/// Chunk all documents, keeping document order and chunk order within each
pub fn chunk_documents(chunker: &Chunker, documents: &[SourceDocument]) -> Vec<ChunkRecord> {
    let records: Vec<ChunkRecord> = documents
        .iter()
        .flat_map(|document| {
            let records = chunk_document(chunker, document);
            debug!("{}: {} chunks", document.file_path, records.len());
            records
        })
        .collect();
    info!(
        "Created {} chunks from {} documents",
        records.len(),
        documents.len()
    );
    records
}

/// Write one JSON object per line, returns the number of records written
pub fn write_jsonl<W: Write>(records: &[ChunkRecord], mut writer: W) -> Result<usize> {
    for record in records {
        serde_json::to_writer(&mut writer, record)
            .with_context(|| format!("serialize chunk record {}", record.id))?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(records.len())
}

/// Resolve the docs root, load and chunk every Markdown file and write the records
pub fn run(config: &IndexerConfig) -> Result<IndexSummary> {
    let chunker = Chunker::new(config.chunking.clone())?;
    let candidates = config.candidate_dirs();
    let docs_dir = resolve_docs_dir(&candidates).ok_or_else(|| {
        anyhow!(
            "none of the docs directories exist: {}",
            candidates
                .iter()
                .map(|c| c.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })?;

    let documents = load_markdown_files(&docs_dir)?;
    if documents.is_empty() {
        warn!("No documents found to index in {}", docs_dir.display());
        return Ok(IndexSummary {
            docs_dir,
            documents: 0,
            chunks: 0,
            output_path: None,
        });
    }

    let records = chunk_documents(&chunker, &documents);
    let file = File::create(&config.output_path)
        .with_context(|| format!("create output file {}", config.output_path.display()))?;
    let written = write_jsonl(&records, BufWriter::new(file))?;
    info!(
        "Wrote {} chunk records to {}",
        written,
        config.output_path.display()
    );

    Ok(IndexSummary {
        docs_dir,
        documents: documents.len(),
        chunks: written,
        output_path: Some(config.output_path.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::chunking::ChunkingConfig;
    use crate::text::context::format_context;
    use std::fs;

    fn document(file_path: &str, content: &str) -> SourceDocument {
        SourceDocument {
            id: crate::index::loader::content_id(content),
            content: content.to_string(),
            file_path: file_path.to_string(),
            title: file_path.to_string(),
            source: format!("docs/{file_path}"),
        }
    }

    #[test]
    fn test_chunk_documents() {
        let chunker = Chunker::new(ChunkingConfig::new(30, 5)).unwrap();
        let documents = vec![
            document(
                "intro.md",
                "This is a test sentence. Here is another sentence.",
            ),
            document("empty.md", ""),
            document("ch1.md", "Short."),
        ];
        let records = chunk_documents(&chunker, &documents);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, format!("{}_chunk_0", documents[0].id));
        assert_eq!(records[1].id, format!("{}_chunk_1", documents[0].id));
        assert_eq!(records[1].content, "ence. Here is another sentence.");
        assert_eq!(records[1].file_path, "intro.md");
        assert_eq!(records[2].id, format!("{}_chunk_0", documents[2].id));
        assert_eq!(records[2].source, "docs/ch1.md");
        assert_eq!(records[2].original_id, documents[2].id);
    }

    #[test]
    fn test_write_jsonl() {
        let chunker = Chunker::new(ChunkingConfig::new(30, 0)).unwrap();
        let records = chunk_documents(
            &chunker,
            &[document("a.md", "First sentence here. Second sentence here.")],
        );
        let mut out = Vec::new();
        assert_eq!(write_jsonl(&records, &mut out).unwrap(), 2);

        let text = String::from_utf8(out).unwrap();
        let parsed: Vec<ChunkRecord> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_records_feed_the_context_formatter() {
        let chunker = Chunker::new(ChunkingConfig::default()).unwrap();
        let records = chunk_documents(&chunker, &[document("intro.md", "Robots move.")]);
        let payload = serde_json::to_value(&records[0]).unwrap();
        let from_payload = ContextDocument::from_payload(&payload);
        assert_eq!(from_payload, records[0].to_context_document());
        assert!(format_context(&[from_payload])
            .starts_with("Document 1 (Source: docs/intro.md, Title: intro.md):\nRobots move.\n"));
    }

    #[test]
    fn test_run() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir_all(docs.join("module-1")).unwrap();
        fs::write(docs.join("intro.md"), "Welcome to the book. It covers robots.").unwrap();
        fs::write(docs.join("module-1").join("index.md"), "Sensors! Actuators?").unwrap();

        let config = IndexerConfig {
            docs_dir: Some(docs.clone()),
            output_path: dir.path().join("chunks.jsonl"),
            chunking: ChunkingConfig::new(25, 4),
        };
        let summary = run(&config).unwrap();
        assert_eq!(summary.docs_dir, docs);
        assert_eq!(summary.documents, 2);
        assert_eq!(summary.chunks, 3);

        let written = fs::read_to_string(dir.path().join("chunks.jsonl")).unwrap();
        let records: Vec<ChunkRecord> = written
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        let contents: Vec<&str> = records.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(
            contents,
            vec!["Welcome to the book.", "ook. It covers robots.", "Sensors. Actuators."]
        );
    }

    #[test]
    fn test_run_with_empty_docs_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = IndexerConfig {
            docs_dir: Some(dir.path().to_path_buf()),
            output_path: dir.path().join("chunks.jsonl"),
            ..IndexerConfig::default()
        };
        let summary = run(&config).unwrap();
        assert_eq!(summary.documents, 0);
        assert_eq!(summary.output_path, None);
        assert!(!dir.path().join("chunks.jsonl").exists());
    }

    #[test]
    fn test_run_without_docs_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = IndexerConfig {
            docs_dir: Some(dir.path().join("missing")),
            ..IndexerConfig::default()
        };
        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("none of the docs directories exist"));
    }

    #[test]
    fn test_run_rejects_invalid_chunking() {
        let config = IndexerConfig {
            chunking: ChunkingConfig::new(0, 0),
            ..IndexerConfig::default()
        };
        assert!(run(&config).is_err());
    }
}
