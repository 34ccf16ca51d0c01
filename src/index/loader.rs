use crate::util::encoding::decode_to_utf8;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// A Markdown source file of the textbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// hex sha256 of the content
    pub id: String,
    pub content: String,
    /// path relative to the docs root
    pub file_path: String,
    /// file name
    pub title: String,
    /// path as found under the docs root
    pub source: String,
}

impl SourceDocument {
    pub fn new(content: String, path: &Path, docs_dir: &Path) -> Self {
        let file_path = path
            .strip_prefix(docs_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();
        let title = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.clone());
        Self {
            id: content_id(&content),
            content,
            file_path,
            title,
            source: path.to_string_lossy().to_string(),
        }
    }
}

pub fn content_id(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|md| ext.eq_ignore_ascii_case(md))
        })
}

/// First candidate that is an existing directory
pub fn resolve_docs_dir<P: AsRef<Path>>(candidates: &[P]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|c| c.as_ref())
        .find(|c| c.is_dir())
        .map(Path::to_path_buf)
}

/// Markdown files below `docs_dir`, sorted by path
pub fn find_markdown_files(docs_dir: &Path) -> Result<Vec<PathBuf>> {
    if !docs_dir.is_dir() {
        bail!("docs directory does not exist: {}", docs_dir.display());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(docs_dir).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_file() && is_markdown(entry.path()) => {
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(e) => warn!("skipping unreadable entry under {}: {}", docs_dir.display(), e),
        }
    }
    files.sort();
    Ok(files)
}

/// Load every Markdown file below `docs_dir`. Files that cannot be read or
/// decoded are logged and skipped.
pub fn load_markdown_files(docs_dir: &Path) -> Result<Vec<SourceDocument>> {
    let files = find_markdown_files(docs_dir)?;
    info!(
        "Found {} Markdown files in {}",
        files.len(),
        docs_dir.display()
    );

    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let content = match std::fs::read(&path)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| decode_to_utf8(&bytes))
        {
            Ok(content) => content,
            Err(e) => {
                warn!("Error loading {}: {:?}", path.display(), e);
                continue;
            }
        };
        let document = SourceDocument::new(content, &path, docs_dir);
        debug!("Loaded: {}", document.file_path);
        documents.push(document);
    }
    Ok(documents)
}
