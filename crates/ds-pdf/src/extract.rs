//! Page range extraction

use crate::page_tree::{detach_page, page_ids, pages_root_id};
use crate::types::*;
use lopdf::{Document, Object};

/// Extract pages `start..=end` (1-indexed) into a new document
pub async fn extract_pages(document: &Document, start: u32, end: u32) -> Result<Document> {
    let document = document.clone();

    tokio::task::spawn_blocking(move || extract_sync(document, start, end)).await?
}

/// Check that `start..=end` is a non-empty 1-indexed range within `total` pages
pub fn check_page_range(start: u32, end: u32, total: u32) -> Result<()> {
    if start < 1 || end > total || start > end {
        return Err(PdfError::InvalidRange { start, end, total });
    }
    Ok(())
}

/// Page count as a range bound. Saturates, since every `u32` end page is
/// in range once the document has `u32::MAX` pages or more.
fn page_total(page_count: usize) -> u32 {
    u32::try_from(page_count).unwrap_or(u32::MAX)
}

fn extract_sync(mut doc: Document, start: u32, end: u32) -> Result<Document> {
    let all_pages = page_ids(&doc);
    check_page_range(start, end, page_total(all_pages.len()))?;

    let keep = &all_pages[(start - 1) as usize..end as usize];
    log::info!(
        "Extracting pages {}-{} of {}",
        start,
        end,
        all_pages.len()
    );

    // Re-hang the kept pages directly under the root so nested page trees
    // lose every page outside the range
    let root_id = pages_root_id(&doc)?;
    for &page_id in keep {
        detach_page(&mut doc, page_id, root_id)?;
    }

    let kids: Vec<Object> = keep.iter().map(|&id| Object::Reference(id)).collect();
    let root = doc.get_object_mut(root_id)?.as_dict_mut()?;
    root.set("Kids", Object::Array(kids));
    root.set("Count", Object::Integer(keep.len() as i64));

    let pruned = doc.prune_objects();
    log::debug!("Pruned {} unreachable objects", pruned.len());

    Ok(doc)
}
