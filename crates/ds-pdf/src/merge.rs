//! Whole-document concatenation
//!
//! Each input is renumbered above the objects already merged, its pages are
//! detached from their old page tree and appended to one flat tree. Old
//! catalogs and page tree nodes are pruned at the end.

use crate::constants::OUTPUT_PDF_VERSION;
use crate::page_tree::{detach_page, install_page_tree, page_ids};
use crate::types::*;
use lopdf::Document;

/// Concatenate `documents` in order into a single document
pub async fn merge_documents(documents: &[Document]) -> Result<Document> {
    if documents.is_empty() {
        return Err(PdfError::NoPages);
    }

    let documents = documents.to_vec();

    tokio::task::spawn_blocking(move || merge_sync(documents)).await?
}

fn merge_sync(documents: Vec<Document>) -> Result<Document> {
    let mut output = Document::with_version(OUTPUT_PDF_VERSION);
    let pages_tree_id = output.new_object_id();
    let mut merged_pages = Vec::new();

    let document_count = documents.len();
    for (index, mut doc) in documents.into_iter().enumerate() {
        doc.renumber_objects_with(output.max_id + 1);

        let doc_pages = page_ids(&doc);
        for &page_id in &doc_pages {
            detach_page(&mut doc, page_id, pages_tree_id)?;
        }
        log::debug!(
            "Appending document {}/{} ({} pages)",
            index + 1,
            document_count,
            doc_pages.len()
        );

        let doc_max_id = doc.objects.keys().map(|id| id.0).max().unwrap_or(0);
        output.max_id = output.max_id.max(doc_max_id);
        output.objects.extend(doc.objects);
        merged_pages.extend(doc_pages);
    }

    if merged_pages.is_empty() {
        return Err(PdfError::NoPages);
    }

    install_page_tree(&mut output, pages_tree_id, &merged_pages);
    output.prune_objects();

    log::info!(
        "Merged {} documents into {} pages",
        document_count,
        merged_pages.len()
    );

    Ok(output)
}
