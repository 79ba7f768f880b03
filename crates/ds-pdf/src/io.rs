//! Reading and writing PDF files
//!
//! Parsing and serialization run on the blocking pool; file access goes
//! through `tokio::fs`.

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Read and parse one PDF file
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| io_error_at(e, &path))?;

    let size = bytes.len();
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    log::debug!(
        "Loaded {} ({} bytes, {} pages)",
        path.display(),
        size,
        doc.get_pages().len()
    );
    Ok(doc)
}

/// Read several PDF files concurrently.
///
/// The result keeps the order of `paths`; the first failure in that order
/// is returned.
pub async fn load_multiple_pdfs(paths: &[impl AsRef<Path>]) -> Result<Vec<Document>> {
    let handles: Vec<_> = paths
        .iter()
        .map(|path| tokio::spawn(load_pdf(path.as_ref().to_owned())))
        .collect();

    let mut documents = Vec::with_capacity(handles.len());
    for handle in handles {
        documents.push(handle.await??);
    }
    Ok(documents)
}

/// Serialize `doc` to `path`, creating missing parent directories
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error_at(e, parent))?;
    }

    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, PdfError>(writer)
    })
    .await??;

    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| io_error_at(e, &path))?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Keep the error kind, add the offending path to the message
fn io_error_at(err: std::io::Error, path: &Path) -> PdfError {
    PdfError::Io(std::io::Error::new(
        err.kind(),
        format!("{}: {}", path.display(), err),
    ))
}
