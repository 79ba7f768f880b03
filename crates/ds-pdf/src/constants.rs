//! Shared constants for page manipulation
//!
//! The collage defaults are tuned values and must be carried over exactly:
//! changing them changes every composed page.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Page Dimensions
// =============================================================================

/// US Letter width in points (8.5")
pub const LETTER_WIDTH_PT: f64 = 612.0;

/// US Letter height in points (11")
pub const LETTER_HEIGHT_PT: f64 = 792.0;

/// Fallback source page size when a page carries no usable MediaBox
pub const DEFAULT_PAGE_DIMENSIONS: (f64, f64) = (LETTER_WIDTH_PT, LETTER_HEIGHT_PT);

// =============================================================================
// Collage Layout
// =============================================================================

/// Scale-up applied on top of the exact-fit scale.
///
/// Lets the rotated page slightly exceed its half of the sheet for a
/// tighter fit; edges may clip.
pub const OVERSCAN: f64 = 1.05;

/// Rotation applied to every collage placement, in degrees
pub const COLLAGE_ROTATION_DEGREES: f64 = 90.0;

/// Default shift added to the right-aligned x translation (points)
pub const DEFAULT_HORIZONTAL_OFFSET: f64 = 550.0;

/// Default shift added to the centered y translation (points)
pub const DEFAULT_VERTICAL_ADJUST: f64 = -10.0;

/// Source pages per collage output page
pub const PAGES_PER_SHEET: usize = 2;

// =============================================================================
// Output Document
// =============================================================================

/// PDF version written by composed documents
pub const OUTPUT_PDF_VERSION: &str = "1.7";
