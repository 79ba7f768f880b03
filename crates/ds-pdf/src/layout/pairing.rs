//! Source page pairing
//!
//! Pages are consumed two at a time in document order. The first page of
//! each pair goes to the bottom half, the second to the top half. An odd
//! trailing page sits alone in the bottom half of the last sheet.

use crate::constants::PAGES_PER_SHEET;
use crate::types::LayoutSlot;

use super::{CollageSheet, SlotAssignment};

/// Assign `page_count` source pages to collage sheets.
pub fn pair_pages(page_count: usize) -> Vec<CollageSheet> {
    (0..page_count)
        .step_by(PAGES_PER_SHEET)
        .enumerate()
        .map(|(index, first)| {
            let mut assignments = vec![SlotAssignment {
                slot: LayoutSlot::Bottom,
                source_page: first,
            }];
            if first + 1 < page_count {
                assignments.push(SlotAssignment {
                    slot: LayoutSlot::Top,
                    source_page: first + 1,
                });
            }
            CollageSheet { index, assignments }
        })
        .collect()
}

/// Number of output sheets needed for `page_count` source pages
pub fn sheet_count(page_count: usize) -> usize {
    page_count.div_ceil(PAGES_PER_SHEET)
}
