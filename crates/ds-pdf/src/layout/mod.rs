//! Layout calculation modules for the collage
//!
//! This module handles all the geometric calculations:
//! - Page pairing (which source page goes in which half of which sheet)
//! - Placement geometry (scale and translation for a rotated page)

mod geometry;
mod pairing;
mod types;

pub use geometry::*;
pub use pairing::*;
pub use types::*;
