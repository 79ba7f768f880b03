//! XObject creation for the collage
//!
//! Each source page is wrapped in a Form XObject which the output page then
//! draws through a transformation matrix.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::page_tree::inherited_attribute;
use crate::types::{PageDimensions, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

// =============================================================================
// XObject Creation
// =============================================================================

/// Create a Form XObject from a source page.
///
/// Resources are deep-copied into `output`; `cache` maps source object IDs
/// to their copies so objects shared between pages are copied once.
///
/// # Arguments
/// * `output` - The output document to add the XObject to
/// * `source` - The source document containing the page
/// * `page_id` - The object ID of the source page
/// * `cache` - Source-to-output object ID map
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let page_dict = source.get_dictionary(page_id)?;

    let bbox = page_media_box(source, page_id)
        .unwrap_or(default_media_box())
        .map(number_object);

    let content_data = get_page_content(source, page_dict)?;

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("BBox", Object::Array(bbox.to_vec()));
    xobject_dict.set("FormType", Object::Integer(1));

    if let Some(resources) = inherited_attribute(source, page_id, b"Resources") {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, resources, cache)?,
        );
    }

    Ok(output.add_object(Stream::new(xobject_dict, content_data)))
}

/// MediaBox used when a page has none: US Letter
fn default_media_box() -> [f64; 4] {
    [0.0, 0.0, DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1]
}

/// Integral values are written as PDF integers
pub(super) fn number_object(value: f64) -> Object {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Object::Integer(value as i64)
    } else {
        Object::Real(value as f32)
    }
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Get the decoded content stream data from a page.
fn get_page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        Object::Reference(id) => match doc.get_object(*id)? {
            Object::Array(arr) => get_concatenated_content_streams(doc, arr),
            Object::Stream(stream) => Ok(stream_content(stream)),
            _ => Ok(Vec::new()),
        },
        Object::Array(arr) => get_concatenated_content_streams(doc, arr),
        _ => Ok(Vec::new()),
    }
}

/// Concatenate multiple content streams
fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for obj in refs {
        if let Object::Reference(id) = obj {
            if let Ok(stream) = doc.get_object(*id)?.as_stream() {
                result.extend_from_slice(&stream_content(stream));
                result.push(b'\n');
            }
        }
    }

    Ok(result)
}

fn stream_content(stream: &Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// Uses a cache to avoid copying the same object multiple times.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            // Reserve the ID first so cyclic references resolve to it
            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        // Parent links would drag the whole source page tree along
        if key.as_slice() == b"Parent" {
            continue;
        }
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}

// =============================================================================
// Page Dimensions
// =============================================================================

/// Get source page dimensions in points from its (possibly inherited) MediaBox.
///
/// Width and height are `x1 - x0` and `y1 - y0`; a page without a usable
/// MediaBox is treated as US Letter.
pub fn get_page_dimensions(doc: &Document, page_id: ObjectId) -> Result<PageDimensions> {
    // Fail on a missing page object rather than defaulting
    doc.get_dictionary(page_id)?;

    let [x0, y0, x1, y1] = page_media_box(doc, page_id).unwrap_or(default_media_box());
    Ok(PageDimensions::new((x1 - x0).abs(), (y1 - y0).abs()))
}

/// The page's (possibly inherited) MediaBox as `[x0, y0, x1, y1]`.
///
/// The box and each of its entries may be indirect. `None` when the box is
/// missing or not four numbers.
fn page_media_box(doc: &Document, page_id: ObjectId) -> Option<[f64; 4]> {
    let media_box = inherited_attribute(doc, page_id, b"MediaBox")
        .and_then(|obj| resolve(doc, obj).as_array().ok())?;

    let coords: Vec<f64> = media_box
        .iter()
        .map(|obj| extract_number(resolve(doc, obj)))
        .collect::<Option<_>>()?;
    coords.try_into().ok()
}

/// Follow a single indirect reference, if any
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_page(media_box: Option<Vec<Object>>) -> (Document, ObjectId) {
        let mut doc = Document::with_version("1.7");
        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        if let Some(mb) = media_box {
            page.set("MediaBox", Object::Array(mb));
        }
        let id = doc.add_object(page);
        (doc, id)
    }

    #[test]
    fn test_dimensions_use_box_extent() {
        let (doc, id) = doc_with_page(Some(vec![
            Object::Integer(10),
            Object::Integer(20),
            Object::Real(605.5),
            Object::Integer(862),
        ]));
        let dims = get_page_dimensions(&doc, id).unwrap();
        assert!((dims.width - 595.5).abs() < 1e-9);
        assert_eq!(dims.height, 842.0);
    }

    #[test]
    fn test_dimensions_default_to_letter() {
        let (doc, id) = doc_with_page(None);
        let dims = get_page_dimensions(&doc, id).unwrap();
        assert_eq!(dims, PageDimensions::new(612.0, 792.0));
    }

    #[test]
    fn test_zero_area_box_is_reported_as_is() {
        let (doc, id) = doc_with_page(Some(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(792),
        ]));
        let dims = get_page_dimensions(&doc, id).unwrap();
        assert_eq!(dims.width, 0.0);
        assert!(dims.validate().is_err());
    }

    #[test]
    fn test_indirect_media_box_entries_resolve() {
        let mut doc = Document::with_version("1.7");
        let width_id = doc.add_object(Object::Integer(1000));
        let box_id = doc.add_object(Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Reference(width_id),
            Object::Real(1400.0),
        ]));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("MediaBox", Object::Reference(box_id)),
        ]));

        assert_eq!(page_media_box(&doc, page_id), Some([0.0, 0.0, 1000.0, 1400.0]));
        assert_eq!(
            get_page_dimensions(&doc, page_id).unwrap(),
            PageDimensions::new(1000.0, 1400.0)
        );
    }

    #[test]
    fn test_xobject_bbox_is_resolved_media_box() {
        let mut source = Document::with_version("1.7");
        let box_id = source.add_object(Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(1000),
            Object::Real(1400.5),
        ]));
        let page_id = source.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("MediaBox", Object::Reference(box_id)),
        ]));

        let mut output = Document::with_version("1.7");
        let mut cache = HashMap::new();
        let form_id = create_page_xobject(&mut output, &source, page_id, &mut cache).unwrap();

        let form = output.get_object(form_id).unwrap().as_stream().unwrap();
        let bbox = form.dict.get(b"BBox").unwrap().as_array().unwrap();
        assert!(bbox.iter().all(|o| !matches!(o, Object::Reference(_))));
        assert!(matches!(bbox[2], Object::Integer(1000)));
        assert!(matches!(bbox[3], Object::Real(r) if r == 1400.5));
    }

    #[test]
    fn test_number_object() {
        assert!(matches!(number_object(612.0), Object::Integer(612)));
        assert!(matches!(number_object(595.5), Object::Real(r) if r == 595.5));
    }

    #[test]
    fn test_deep_copy_shares_cached_objects() {
        let mut source = Document::with_version("1.7");
        let font_id = source.add_object(Dictionary::from_iter(vec![(
            "Type",
            Object::Name(b"Font".to_vec()),
        )]));
        let resources = Object::Dictionary(Dictionary::from_iter(vec![(
            "Font",
            Object::Reference(font_id),
        )]));

        let mut output = Document::with_version("1.7");
        let mut cache = HashMap::new();
        let first = copy_object_deep(&mut output, &source, &resources, &mut cache).unwrap();
        let second = copy_object_deep(&mut output, &source, &resources, &mut cache).unwrap();

        let font_ref = |obj: &Object| {
            obj.as_dict()
                .and_then(|d| d.get(b"Font"))
                .and_then(Object::as_reference)
                .unwrap()
        };
        assert_eq!(font_ref(&first), font_ref(&second));
        assert_eq!(output.objects.len(), 1);
    }
}
