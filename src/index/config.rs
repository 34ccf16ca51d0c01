use crate::text::chunking::ChunkingConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Settings for one indexing run, read from `INDEXER_*` and `CHUNKING_*` variables
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Explicit docs root; when unset the default candidates are tried in order
    pub docs_dir: Option<PathBuf>,
    /// JSON lines file receiving the chunk records
    pub output_path: PathBuf,
    #[serde(skip)]
    pub chunking: ChunkingConfig,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            docs_dir: None,
            output_path: PathBuf::from(Self::DEFAULT_OUTPUT_PATH),
            chunking: ChunkingConfig::default(),
        }
    }
}

impl IndexerConfig {
    pub const ENV_PREFIX: &'static str = "INDEXER_";
    pub const DEFAULT_DOCS_DIRS: [&'static str; 2] = ["../docs", "docs"];
    pub const DEFAULT_OUTPUT_PATH: &'static str = "chunks.jsonl";

    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();
        let mut conf = envy::prefixed(Self::ENV_PREFIX)
            .from_iter::<_, IndexerConfig>(vars.clone())
            .context("cannot read indexer config from env:")?;
        conf.chunking = ChunkingConfig::from_vars(vars)?;
        Ok(conf)
    }

    /// Directories to look for the docs root in, first existing one wins
    pub fn candidate_dirs(&self) -> Vec<PathBuf> {
        match &self.docs_dir {
            Some(dir) => vec![dir.clone()],
            None => Self::DEFAULT_DOCS_DIRS.iter().map(PathBuf::from).collect(),
        }
    }
}
