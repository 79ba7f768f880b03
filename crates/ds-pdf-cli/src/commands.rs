//! File-level operations shared by the subcommands and the interactive menu

use anyhow::{Context, Result};
use ds_pdf::{CollageStatistics, LayoutConfig};
use std::path::{Path, PathBuf};

/// Collage `input` into `output`, returning what was produced
pub async fn collage_file(
    input: &Path,
    output: &Path,
    config: &LayoutConfig,
) -> Result<CollageStatistics> {
    let document = ds_pdf::load_pdf(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let stats = ds_pdf::calculate_statistics(&document)?;

    let collaged = ds_pdf::collage(&document, config).await?;
    ds_pdf::save_pdf(collaged, output)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(stats)
}

/// Copy pages `start..=end` of `input` into `output`
pub async fn extract_file(input: &Path, output: &Path, start: u32, end: u32) -> Result<u32> {
    let document = ds_pdf::load_pdf(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let extracted = ds_pdf::extract_pages(&document, start, end).await?;
    ds_pdf::save_pdf(extracted, output)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(end - start + 1)
}

/// Concatenate `inputs` in order into `output`, returning the page count
pub async fn merge_files(inputs: &[PathBuf], output: &Path) -> Result<usize> {
    let documents = ds_pdf::load_multiple_pdfs(inputs)
        .await
        .context("Failed to read input PDFs")?;

    let merged = ds_pdf::merge_documents(&documents).await?;
    let pages = merged.get_pages().len();
    ds_pdf::save_pdf(merged, output)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(pages)
}
