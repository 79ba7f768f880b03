use ds_pdf::render::generate_placement_command;
use ds_pdf::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

fn create_test_pdf(page_sizes: &[(i64, i64)]) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for (i, &(width, height)) in page_sizes.iter().enumerate() {
        let content = format!("BT /F1 12 Tf 50 700 Td (Page-{}) Tj ET", i + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(page_sizes.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

fn letter_pages(count: usize) -> Document {
    create_test_pdf(&vec![(612, 792); count])
}

fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

fn xobject_count(doc: &Document, page_id: ObjectId) -> usize {
    doc.get_dictionary(page_id)
        .unwrap()
        .get(b"Resources")
        .and_then(Object::as_dict)
        .and_then(|r| r.get(b"XObject"))
        .and_then(Object::as_dict)
        .map(|x| x.len())
        .unwrap()
}

fn content_string(doc: &Document, page_id: ObjectId) -> String {
    String::from_utf8(doc.get_page_content(page_id).unwrap()).unwrap()
}

#[tokio::test]
async fn test_collage_even_pages() {
    let doc = letter_pages(4);
    let result = collage(&doc, &LayoutConfig::default()).await.unwrap();

    let pages = page_ids(&result);
    assert_eq!(pages.len(), 2);
    for &page_id in &pages {
        assert_eq!(xobject_count(&result, page_id), 2);
    }
}

#[tokio::test]
async fn test_collage_odd_pages_leaves_last_top_blank() {
    let doc = letter_pages(3);
    let result = collage(&doc, &LayoutConfig::default()).await.unwrap();

    let pages = page_ids(&result);
    assert_eq!(pages.len(), 2);
    assert_eq!(xobject_count(&result, pages[0]), 2);
    assert_eq!(xobject_count(&result, pages[1]), 1);

    let last = content_string(&result, pages[1]);
    assert_eq!(last.matches(" Do Q").count(), 1);
}

#[tokio::test]
async fn test_collage_single_page() {
    let doc = letter_pages(1);
    let result = collage(&doc, &LayoutConfig::default()).await.unwrap();
    assert_eq!(result.get_pages().len(), 1);
}

#[tokio::test]
async fn test_collage_output_pages_are_letter() {
    let doc = create_test_pdf(&[(595, 842), (420, 595)]);
    let result = collage(&doc, &LayoutConfig::default()).await.unwrap();

    let page = result.get_dictionary(page_ids(&result)[0]).unwrap();
    let media_box: Vec<i64> = page
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o.as_i64().unwrap())
        .collect();
    assert_eq!(media_box, vec![0, 0, 612, 792]);
}

#[tokio::test]
async fn test_collage_draws_computed_transforms() {
    let doc = create_test_pdf(&[(595, 842), (420, 595)]);
    let config = LayoutConfig::default();
    let result = collage(&doc, &config).await.unwrap();

    let bottom = compute_transform(PageDimensions::new(595.0, 842.0), LayoutSlot::Bottom, &config)
        .unwrap();
    let top =
        compute_transform(PageDimensions::new(420.0, 595.0), LayoutSlot::Top, &config).unwrap();

    let content = content_string(&result, page_ids(&result)[0]);
    assert!(content.contains(&generate_placement_command("P0", &bottom)));
    assert!(content.contains(&generate_placement_command("P1", &top)));
}

#[tokio::test]
async fn test_collage_uses_letter_scenario_values() {
    let doc = letter_pages(1);
    let result = collage(&doc, &LayoutConfig::default()).await.unwrap();
    let content = content_string(&result, page_ids(&result)[0]);

    // q a b c d e f cm /P0 Do Q
    let operands: Vec<f64> = content
        .split_whitespace()
        .skip(1)
        .take(6)
        .map(|t| t.parse().unwrap())
        .collect();
    let scale = operands[1];
    assert_eq!(operands[0], 0.0);
    assert!((scale - 0.6794).abs() < 0.001);
    assert_eq!(operands[2], -scale);
    assert!((operands[4] - 623.9).abs() < 0.1);
    assert!((operands[5] - (-19.9)).abs() < 0.01);
}

#[tokio::test]
async fn test_collage_copies_page_content() {
    let doc = letter_pages(2);
    let result = collage(&doc, &LayoutConfig::default()).await.unwrap();

    let page = result.get_dictionary(page_ids(&result)[0]).unwrap();
    let xobjects = page
        .get(b"Resources")
        .and_then(Object::as_dict)
        .and_then(|r| r.get(b"XObject"))
        .and_then(Object::as_dict)
        .unwrap();

    let form_id = xobjects.get(b"P1").unwrap().as_reference().unwrap();
    let form = result.get_object(form_id).unwrap().as_stream().unwrap();
    assert_eq!(form.dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Form");
    assert!(String::from_utf8_lossy(&form.content).contains("Page-2"));
}

/// One 1000x1400 page whose MediaBox is stored either as an indirect object
/// or only on the parent Pages node
fn create_large_page_pdf(inherited: bool) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let media_box_id = doc.add_object(Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(1000),
        Object::Integer(1400),
    ]));
    let content_id = doc.add_object(Stream::new(Dictionary::new(), b"(Large) Tj".to_vec()));

    let mut page = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        ("Contents", Object::Reference(content_id)),
    ]);
    let mut pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(1)),
    ]);
    if inherited {
        pages.set("MediaBox", Object::Reference(media_box_id));
    } else {
        page.set("MediaBox", Object::Reference(media_box_id));
    }

    let page_id = doc.add_object(page);
    pages.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

fn form_bbox(doc: &Document, page_id: ObjectId) -> Vec<f64> {
    let form_id = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Resources")
        .and_then(Object::as_dict)
        .and_then(|r| r.get(b"XObject"))
        .and_then(Object::as_dict)
        .and_then(|x| x.get(b"P0"))
        .and_then(Object::as_reference)
        .unwrap();
    let form = doc.get_object(form_id).unwrap().as_stream().unwrap();
    form.dict
        .get(b"BBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|o| match o {
            Object::Integer(i) => *i as f64,
            Object::Real(r) => f64::from(*r),
            other => panic!("BBox entry is not a number: {:?}", other),
        })
        .collect()
}

#[tokio::test]
async fn test_collage_indirect_media_box_sets_form_bbox() {
    for inherited in [false, true] {
        let doc = create_large_page_pdf(inherited);
        let config = LayoutConfig::default();
        let result = collage(&doc, &config).await.unwrap();
        let page_id = page_ids(&result)[0];

        assert_eq!(form_bbox(&result, page_id), vec![0.0, 0.0, 1000.0, 1400.0]);

        let expected = compute_transform(
            PageDimensions::new(1000.0, 1400.0),
            LayoutSlot::Bottom,
            &config,
        )
        .unwrap();
        let content = content_string(&result, page_id);
        assert!(content.contains(&generate_placement_command("P0", &expected)));
    }
}

#[tokio::test]
async fn test_collage_no_pages() {
    let doc = letter_pages(0);
    let result = collage(&doc, &LayoutConfig::default()).await;
    assert!(matches!(result, Err(PdfError::NoPages)));
}

#[tokio::test]
async fn test_collage_rejects_degenerate_page() {
    let doc = create_test_pdf(&[(612, 792), (0, 792)]);
    let result = collage(&doc, &LayoutConfig::default()).await;
    assert!(matches!(result, Err(PdfError::InvalidDimensions { .. })));
}

#[tokio::test]
async fn test_collage_rejects_invalid_config() {
    let doc = letter_pages(2);
    let config = LayoutConfig {
        overscan: 0.0,
        ..Default::default()
    };
    let result = collage(&doc, &config).await;
    assert!(matches!(result, Err(PdfError::Config(_))));
}

#[tokio::test]
async fn test_collage_save_and_reload() {
    use tempfile::NamedTempFile;

    let doc = letter_pages(5);
    let result = collage(&doc, &LayoutConfig::default()).await.unwrap();

    let temp = NamedTempFile::new().unwrap();
    save_pdf(result, temp.path()).await.unwrap();

    let loaded = load_pdf(temp.path()).await.unwrap();
    assert_eq!(loaded.get_pages().len(), 3);
}

#[test]
fn test_statistics() {
    let stats = calculate_statistics(&letter_pages(5)).unwrap();
    assert_eq!(stats.source_pages, 5);
    assert_eq!(stats.output_pages, 3);
    assert_eq!(stats.empty_slots, 1);

    let stats = calculate_statistics(&letter_pages(6)).unwrap();
    assert_eq!(stats.output_pages, 3);
    assert_eq!(stats.empty_slots, 0);
}

#[test]
fn test_statistics_no_pages() {
    let result = calculate_statistics(&letter_pages(0));
    assert!(matches!(result, Err(PdfError::NoPages)));
}
