//! Page tree helpers shared by the document operations

use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Page attributes that may be set on an ancestor `Pages` node instead of
/// the page itself.
pub(crate) const INHERITABLE_KEYS: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Upper bound on page tree depth, guards against `Parent` cycles
const MAX_TREE_DEPTH: usize = 64;

/// Look up `key` on a page, falling back to its page tree ancestors.
pub(crate) fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent_id).ok()?;
    }

    None
}

/// Object ID of the root `Pages` node
pub(crate) fn pages_root_id(doc: &Document) -> Result<ObjectId> {
    let catalog_id = doc.trailer.get(b"Root")?.as_reference()?;
    let catalog = doc.get_dictionary(catalog_id)?;
    Ok(catalog.get(b"Pages")?.as_reference()?)
}

/// Page object IDs in document order
pub(crate) fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

/// Create a fresh catalog + flat page tree referencing `page_ids`.
///
/// `pages_id` must already be reserved with `new_object_id`.
pub(crate) fn install_page_tree(doc: &mut Document, pages_id: ObjectId, page_ids: &[ObjectId]) {
    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(page_ids.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);
}

/// Copy inherited attributes onto the page and point it at `new_parent`.
///
/// After this the page no longer depends on its old ancestors.
pub(crate) fn detach_page(doc: &mut Document, page_id: ObjectId, new_parent: ObjectId) -> Result<()> {
    let inherited: Vec<(&[u8], Object)> = INHERITABLE_KEYS
        .iter()
        .filter_map(|&key| inherited_attribute(doc, page_id, key).map(|v| (key, v.clone())))
        .collect();

    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    for (key, value) in inherited {
        if !page.has(key) {
            page.set(key, value);
        }
    }
    page.set("Parent", Object::Reference(new_parent));

    Ok(())
}
