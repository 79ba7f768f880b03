//! 1x2 collage composition
//!
//! Every output page carries two consecutive source pages, each rotated a
//! quarter turn and scaled into one half of the sheet:
//! 1. Pair source pages (bottom, top)
//! 2. Compute each page's transform from its MediaBox
//! 3. Draw the pages as Form XObjects onto blank output pages

use crate::constants::OUTPUT_PDF_VERSION;
use crate::layout::pair_pages;
use crate::options::LayoutConfig;
use crate::page_tree::{install_page_tree, page_ids};
use crate::render::render_collage_page;
use crate::types::*;
use lopdf::Document;
use std::collections::HashMap;

/// Compose `document` into a collage document
pub async fn collage(document: &Document, config: &LayoutConfig) -> Result<Document> {
    config.validate()?;

    let document = document.clone();
    let config = *config;

    tokio::task::spawn_blocking(move || collage_sync(&document, &config)).await?
}

fn collage_sync(source: &Document, config: &LayoutConfig) -> Result<Document> {
    let source_page_ids = page_ids(source);
    if source_page_ids.is_empty() {
        return Err(PdfError::NoPages);
    }

    let sheets = pair_pages(source_page_ids.len());
    log::info!(
        "Composing {} source pages onto {} collage pages ({} x {} pt)",
        source_page_ids.len(),
        sheets.len(),
        config.output.width,
        config.output.height
    );

    let mut output = Document::with_version(OUTPUT_PDF_VERSION);
    let pages_tree_id = output.new_object_id();
    let mut object_cache = HashMap::new();
    let mut output_page_ids = Vec::with_capacity(sheets.len());

    for sheet in &sheets {
        let page_id = render_collage_page(
            &mut output,
            source,
            &source_page_ids,
            sheet,
            config,
            pages_tree_id,
            &mut object_cache,
        )?;
        output_page_ids.push(page_id);
    }

    install_page_tree(&mut output, pages_tree_id, &output_page_ids);

    Ok(output)
}
