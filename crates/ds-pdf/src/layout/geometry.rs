//! Collage placement geometry
//!
//! A source page is rotated a quarter turn, so a page of width `W` and
//! height `H` covers `H` horizontally and `W` vertically. It is scaled to fit
//! the full output width and half the output height, right-aligned, and
//! centered vertically within its half. The offsets in [`PlacementOffsets`]
//! are then added on top.

use crate::constants::{COLLAGE_ROTATION_DEGREES, OVERSCAN};
use crate::options::LayoutConfig;
use crate::types::*;

use super::Transform;

// =============================================================================
// Scale
// =============================================================================

/// Scale factor for a rotated source page, using the default overscan.
pub fn compute_scale(source: PageDimensions, output: OutputPageSpec) -> Result<f64> {
    compute_scale_with_overscan(source, output, OVERSCAN)
}

/// Scale factor for a rotated source page.
///
/// `min(output.width / source.height, half_height / source.width) * overscan`
///
/// Fails with [`PdfError::InvalidDimensions`] when either page has a
/// non-positive side and with [`PdfError::Config`] for a non-positive
/// overscan, so a returned scale is always finite and positive.
pub fn compute_scale_with_overscan(
    source: PageDimensions,
    output: OutputPageSpec,
    overscan: f64,
) -> Result<f64> {
    if !is_positive(overscan) {
        return Err(PdfError::Config(format!(
            "Overscan must be a positive number, got {}",
            overscan
        )));
    }
    source.validate()?;
    if !is_positive(output.width) || !is_positive(output.height) {
        return Err(PdfError::InvalidDimensions {
            width: output.width,
            height: output.height,
        });
    }

    let fit_width = output.width / source.height;
    let fit_half_height = output.half_height() / source.width;
    Ok(fit_width.min(fit_half_height) * overscan)
}

// =============================================================================
// Offsets
// =============================================================================

/// Translation `(tx, ty)` applied after rotation and scaling.
///
/// Horizontal placement right-aligns the rotated page against the output's
/// right edge for both slots. Vertical placement centers it within
/// `[0, half)` for [`LayoutSlot::Bottom`] or `[half, height)` for
/// [`LayoutSlot::Top`].
pub fn compute_offsets(
    source: PageDimensions,
    scale: f64,
    output: OutputPageSpec,
    slot: LayoutSlot,
    offsets: PlacementOffsets,
) -> (f64, f64) {
    let rotated_width = source.height * scale;
    let rotated_height = source.width * scale;
    let half_height = output.half_height();

    let tx = output.width - rotated_width + offsets.horizontal_offset;

    let centered = (half_height - rotated_height) / 2.0;
    let ty = match slot {
        LayoutSlot::Bottom => centered + offsets.vertical_adjust,
        LayoutSlot::Top => half_height + centered + offsets.vertical_adjust,
    };

    (tx, ty)
}

// =============================================================================
// Transform
// =============================================================================

/// Full placement transform for one source page in `slot`.
pub fn compute_transform(
    source: PageDimensions,
    slot: LayoutSlot,
    config: &LayoutConfig,
) -> Result<Transform> {
    let scale = compute_scale_with_overscan(source, config.output, config.overscan)?;
    let (tx, ty) = compute_offsets(source, scale, config.output, slot, config.offsets);

    Ok(Transform {
        rotation_degrees: COLLAGE_ROTATION_DEGREES,
        scale,
        tx,
        ty,
    })
}
