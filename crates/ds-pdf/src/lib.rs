pub mod collage;
pub mod constants;
mod extract;
mod io;
pub mod layout;
mod merge;
mod options;
mod page_tree;
pub mod render;
mod stats;
mod types;

pub use collage::collage;
pub use extract::{check_page_range, extract_pages};
pub use io::{load_multiple_pdfs, load_pdf, save_pdf};
pub use layout::{
    CollageSheet, SlotAssignment, Transform, compute_offsets, compute_scale, compute_transform,
    pair_pages,
};
pub use merge::merge_documents;
pub use options::*;
pub use stats::{calculate_statistics, collage_statistics};
pub use types::*;
