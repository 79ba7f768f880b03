//! Output page rendering for the collage

use crate::layout::{CollageSheet, Transform, compute_transform};
use crate::options::LayoutConfig;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::xobject::{create_page_xobject, get_page_dimensions, number_object};

/// Render one collage sheet as a new page of `output`.
///
/// Each assigned source page becomes a Form XObject drawn through the
/// matrix of its [`Transform`]. Slots without an assignment stay blank.
///
/// # Arguments
/// * `output` - The output document
/// * `source` - The source document containing the pages
/// * `source_page_ids` - Object IDs of all source pages, in order
/// * `sheet` - Slot assignments for this output page
/// * `config` - Output size and placement policy
/// * `parent_pages_id` - The parent Pages object ID
/// * `cache` - Source-to-output object map shared across the document
pub fn render_collage_page(
    output: &mut Document,
    source: &Document,
    source_page_ids: &[ObjectId],
    sheet: &CollageSheet,
    config: &LayoutConfig,
    parent_pages_id: ObjectId,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            number_object(config.output.width),
            number_object(config.output.height),
        ]),
    );

    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();

    for (idx, assignment) in sheet.assignments.iter().enumerate() {
        let Some(&source_page_id) = source_page_ids.get(assignment.source_page) else {
            continue;
        };

        let dimensions = get_page_dimensions(source, source_page_id)?;
        let transform = compute_transform(dimensions, assignment.slot, config)?;
        log::debug!(
            "sheet {}: page {} -> {:?} (scale {:.4}, tx {:.2}, ty {:.2})",
            sheet.index + 1,
            assignment.source_page + 1,
            assignment.slot,
            transform.scale,
            transform.tx,
            transform.ty
        );

        let xobject_name = format!("P{}", idx);
        let xobject_id = create_page_xobject(output, source, source_page_id, cache)?;
        xobjects.set(xobject_name.as_bytes(), Object::Reference(xobject_id));

        content_ops.push(generate_placement_command(&xobject_name, &transform));
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

/// Generate the content stream command that draws an XObject through `transform`.
pub fn generate_placement_command(xobject_name: &str, transform: &Transform) -> String {
    let [a, b, c, d, e, f] = transform.matrix();
    format!(
        "q {} {} {} {} {} {} cm /{} Do Q\n",
        a, b, c, d, e, f, xobject_name
    )
}
