use crate::constants::PAGES_PER_SHEET;
use crate::layout::sheet_count;
use crate::types::*;
use lopdf::Document;

/// Calculate statistics for a collage of `document`
pub fn calculate_statistics(document: &Document) -> Result<CollageStatistics> {
    let source_pages = document.get_pages().len();
    if source_pages == 0 {
        return Err(PdfError::NoPages);
    }

    Ok(collage_statistics(source_pages))
}

/// Statistics for a collage of `source_pages` pages
pub fn collage_statistics(source_pages: usize) -> CollageStatistics {
    let output_pages = sheet_count(source_pages);

    CollageStatistics {
        source_pages,
        output_pages,
        empty_slots: output_pages * PAGES_PER_SHEET - source_pages,
    }
}
