use thiserror::Error;

use crate::constants::{LETTER_HEIGHT_PT, LETTER_WIDTH_PT, mm_to_pt};

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to process")]
    NoPages,
    #[error("Invalid page dimensions: {width} x {height}")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("Invalid page range: {start}-{end} (document has {total} pages)")]
    InvalidRange { start: u32, end: u32, total: u32 },
}

pub type Result<T> = std::result::Result<T, PdfError>;

/// Size of a source page in points, read from its MediaBox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDimensions {
    pub width: f64,
    pub height: f64,
}

impl PageDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Fails unless both sides are finite and strictly positive
    pub fn validate(&self) -> Result<()> {
        if is_positive(self.width) && is_positive(self.height) {
            Ok(())
        } else {
            Err(PdfError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Size of the collage output page in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputPageSpec {
    pub width: f64,
    pub height: f64,
}

impl Default for OutputPageSpec {
    fn default() -> Self {
        Self::letter()
    }
}

impl OutputPageSpec {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// US Letter, 612 x 792 points
    pub fn letter() -> Self {
        Self::new(LETTER_WIDTH_PT, LETTER_HEIGHT_PT)
    }

    /// Height of one collage slot
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }
}

impl From<PaperSize> for OutputPageSpec {
    fn from(paper: PaperSize) -> Self {
        let (width, height) = paper.dimensions_pt();
        Self::new(width, height)
    }
}

/// Standard output paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PaperSize {
    #[default]
    Letter,
    A4,
    Legal,
    Custom { width_pt: f64, height_pt: f64 },
}

impl PaperSize {
    /// Portrait dimensions in points
    pub fn dimensions_pt(self) -> (f64, f64) {
        match self {
            PaperSize::Letter => (LETTER_WIDTH_PT, LETTER_HEIGHT_PT),
            PaperSize::A4 => (mm_to_pt(210.0), mm_to_pt(297.0)),
            PaperSize::Legal => (LETTER_WIDTH_PT, 1008.0),
            PaperSize::Custom {
                width_pt,
                height_pt,
            } => (width_pt, height_pt),
        }
    }
}

/// Which half of the output page a source page occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutSlot {
    /// Upper half, `[half_height, height)`
    Top,
    /// Lower half, `[0, half_height)`
    Bottom,
}

/// Tuning knobs applied to every placement in one run.
///
/// Negative values are valid and move content left / down.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementOffsets {
    /// Added to the right-aligned x translation
    pub horizontal_offset: f64,
    /// Added to the centered y translation
    pub vertical_adjust: f64,
}

impl Default for PlacementOffsets {
    fn default() -> Self {
        Self {
            horizontal_offset: crate::constants::DEFAULT_HORIZONTAL_OFFSET,
            vertical_adjust: crate::constants::DEFAULT_VERTICAL_ADJUST,
        }
    }
}

/// Statistics about a collage run
#[derive(Debug, Clone, PartialEq)]
pub struct CollageStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Number of composed output pages
    pub output_pages: usize,
    /// Slots left blank (1 when the source page count is odd)
    pub empty_slots: usize,
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
