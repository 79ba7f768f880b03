//! Layout data types for the collage
//!
//! These types sit between page pairing and PDF rendering.

use crate::types::LayoutSlot;

/// Affine placement of one source page on a collage sheet.
///
/// Applied in this order: rotate by `rotation_degrees`, scale uniformly by
/// `scale`, then translate by `(tx, ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub rotation_degrees: f64,
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Transform {
    /// Operands `[a b c d e f]` of the PDF `cm` operator for this transform.
    ///
    /// The rotation matrix is `[cos sin -sin cos]`. Quarter turns use exact
    /// trigonometric values.
    pub fn matrix(&self) -> [f64; 6] {
        let (cos, sin) = rotation_cos_sin(self.rotation_degrees);
        [
            cos * self.scale,
            sin * self.scale,
            -sin * self.scale,
            cos * self.scale,
            self.tx,
            self.ty,
        ]
    }

    /// Width and height of the transformed page's footprint
    pub fn footprint(&self, width: f64, height: f64) -> (f64, f64) {
        let (cos, sin) = rotation_cos_sin(self.rotation_degrees);
        let w = (width * cos).abs() + (height * sin).abs();
        let h = (width * sin).abs() + (height * cos).abs();
        (w * self.scale, h * self.scale)
    }
}

fn rotation_cos_sin(degrees: f64) -> (f64, f64) {
    let normalized = degrees.rem_euclid(360.0);
    if normalized == 0.0 {
        (1.0, 0.0)
    } else if normalized == 90.0 {
        (0.0, 1.0)
    } else if normalized == 180.0 {
        (-1.0, 0.0)
    } else if normalized == 270.0 {
        (0.0, -1.0)
    } else {
        let radians = degrees.to_radians();
        (radians.cos(), radians.sin())
    }
}

/// A source page assigned to one half of an output sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAssignment {
    pub slot: LayoutSlot,
    /// Zero-based index into the source document's pages
    pub source_page: usize,
}

/// One collage output page and the source pages placed on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollageSheet {
    /// Zero-based output page index
    pub index: usize,
    /// Assignments in drawing order (bottom first)
    pub assignments: Vec<SlotAssignment>,
}

impl CollageSheet {
    /// Source page placed in `slot`, if any
    pub fn page_in(&self, slot: LayoutSlot) -> Option<usize> {
        self.assignments
            .iter()
            .find(|a| a.slot == slot)
            .map(|a| a.source_page)
    }

    /// Whether both halves are filled
    pub fn is_full(&self) -> bool {
        self.page_in(LayoutSlot::Top).is_some() && self.page_in(LayoutSlot::Bottom).is_some()
    }
}
