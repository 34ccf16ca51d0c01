use anyhow::Result;
use textbook_rag::index::{self, IndexerConfig};
use textbook_rag::util::tracing::tracing_init_from_env;

fn main() -> Result<()> {
    tracing_init_from_env()?;
    let config = IndexerConfig::from_env()?;
    tracing::info!(
        "Indexing with chunk_size={} overlap={}",
        config.chunking.chunk_size,
        config.chunking.overlap
    );

    let summary = index::run(&config)?;
    match &summary.output_path {
        Some(path) => tracing::info!(
            "Indexed {} documents from {} into {} chunks at {}",
            summary.documents,
            summary.docs_dir.display(),
            summary.chunks,
            path.display()
        ),
        None => tracing::info!("Nothing indexed from {}", summary.docs_dir.display()),
    }
    Ok(())
}
