//! PDF rendering modules for the collage
//!
//! This module handles all PDF-specific operations:
//! - Creating XObjects from source pages
//! - Building composed output pages
//! - Deep copying PDF objects

mod page;
mod xobject;

pub use page::*;
pub use xobject::{copy_object_deep, create_page_xobject, get_page_dimensions};
