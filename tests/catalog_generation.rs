//! End-to-end catalog generation tests: pagination behavior plus full
//! document output checked by reparsing the saved PDF.

use anyhow::Result;

use catalog_to_pdf::config::{CatalogSettings, InMemoryConfigStore};
use catalog_to_pdf::model::{organize, ElementSpec, LayoutTemplate, ProductRecord, TemplateRegistry,
    ViewerClass};
use catalog_to_pdf::render::{CatalogRenderer, InMemoryImageSource, PaginationEngine,
    RenderSession};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn default_settings() -> CatalogSettings {
    CatalogSettings::load(&InMemoryConfigStore::new())
}

fn product(id: u64, name: &str, category: &str) -> ProductRecord {
    ProductRecord {
        id,
        name: name.to_string(),
        category: Some(category.to_string()),
        price: Some(19.9),
        ..Default::default()
    }
}

fn products_in(category: &str, count: usize) -> Vec<ProductRecord> {
    (0..count)
        .map(|i| product(i as u64, &format!("Produto {:02}", i), category))
        .collect()
}

fn page_count(pdf: &[u8]) -> Result<usize> {
    let doc = lopdf::Document::load_mem(pdf)?;
    Ok(doc.get_pages().len())
}

fn has_image_xobject(pdf: &[u8]) -> Result<bool> {
    let doc = lopdf::Document::load_mem(pdf)?;
    Ok(doc.objects.values().any(|obj| match obj {
        lopdf::Object::Stream(stream) => stream
            .dict
            .get(b"Subtype")
            .ok()
            .and_then(|subtype| subtype.as_name().ok())
            .map(|name| name == b"Image".as_slice())
            .unwrap_or(false),
        _ => false,
    }))
}

/// Ten products on a 4x2 grid: eight fill page one, the ninth forces a
/// break and the remaining two land at the top of page two.
#[tokio::test]
async fn grid_overflow_breaks_page_and_resets_counter() -> Result<()> {
    init_logging();
    let settings = default_settings();
    assert_eq!(settings.grid.capacity(), 8);

    let images = InMemoryImageSource::new();
    let mut doc = printpdf::PdfDocument::new("test");
    let engine = PaginationEngine::new(&settings);
    let mut session = RenderSession::new(&mut doc, engine.geometry(), settings.page.margin_top);

    let groups = organize(products_in("Ferramentas", 10));
    engine
        .render_group(&mut session, &groups[0], None, ViewerClass::Full, &images)
        .await?;

    assert_eq!(session.cursor.page_index, 1);
    assert_eq!(session.cursor.cards_on_current_page, 2);
    Ok(())
}

/// A category title near the page bottom moves to the next page together
/// with its first card row, and the card counter restarts at zero there.
#[tokio::test]
async fn second_category_starts_fresh_when_title_has_no_room() -> Result<()> {
    init_logging();
    let settings = default_settings();
    let images = InMemoryImageSource::new();
    let mut doc = printpdf::PdfDocument::new("test");
    let engine = PaginationEngine::new(&settings);
    let mut session = RenderSession::new(&mut doc, engine.geometry(), settings.page.margin_top);

    let mut all = products_in("Acessórios", 7);
    all.extend(products_in("Ferramentas", 2));
    let groups = organize(all);
    assert_eq!(groups.len(), 2);

    for group in &groups {
        engine
            .render_group(&mut session, group, None, ViewerClass::Full, &images)
            .await?;
    }

    // Seven cards fill four rows on page one; the second title cannot fit
    // another row below them, so its two cards open page two.
    assert_eq!(session.cursor.page_index, 1);
    assert_eq!(session.cursor.cards_on_current_page, 2);
    Ok(())
}

/// When the previous category only partially fills the page, the next
/// title draws mid-page: the card counter restarts at zero but the page
/// and vertical position carry over.
#[tokio::test]
async fn category_counter_resets_while_page_persists() -> Result<()> {
    init_logging();
    let settings = default_settings();
    let images = InMemoryImageSource::new();
    let mut doc = printpdf::PdfDocument::new("test");
    let engine = PaginationEngine::new(&settings);
    let mut session = RenderSession::new(&mut doc, engine.geometry(), settings.page.margin_top);

    let groups = organize(products_in("Acessórios", 2));
    engine
        .render_group(&mut session, &groups[0], None, ViewerClass::Full, &images)
        .await?;
    let y_after_first = session.cursor.content_y;
    assert_eq!(session.cursor.page_index, 0);

    let groups = organize(products_in("Ferramentas", 3));
    engine
        .render_group(&mut session, &groups[0], None, ViewerClass::Full, &images)
        .await?;

    // Same page, counter restarted for the new category, cursor moved down
    assert_eq!(session.cursor.page_index, 0);
    assert_eq!(session.cursor.cards_on_current_page, 3);
    assert!(session.cursor.content_y > y_after_first);
    Ok(())
}

#[tokio::test]
async fn full_catalog_reparses_with_expected_page_count() -> Result<()> {
    init_logging();
    let renderer = CatalogRenderer::new(default_settings());
    let images = InMemoryImageSource::new();

    let bytes = renderer
        .render(products_in("Ferramentas", 10), ViewerClass::Full, &images)
        .await?;

    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(page_count(&bytes)?, 2);
    Ok(())
}

#[tokio::test]
async fn preview_truncates_to_one_grid_of_products() -> Result<()> {
    init_logging();
    let renderer = CatalogRenderer::new(default_settings());
    let images = InMemoryImageSource::new();

    let bytes = renderer
        .render_preview(products_in("Ferramentas", 30), ViewerClass::Full, &images)
        .await?;

    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(page_count(&bytes)?, 1);
    Ok(())
}

#[tokio::test]
async fn cover_section_adds_a_leading_page() -> Result<()> {
    init_logging();
    let mut store = InMemoryConfigStore::new();
    store.set("cover", r##"{"background_color": "#1A2B3C", "show_date": true}"##);
    let renderer = CatalogRenderer::new(CatalogSettings::load(&store));
    let images = InMemoryImageSource::new();

    let bytes = renderer
        .render(products_in("Ferramentas", 4), ViewerClass::Full, &images)
        .await?;

    assert_eq!(page_count(&bytes)?, 2);
    Ok(())
}

/// Multi-template mode drops categories without an assignment instead of
/// falling back to the default card.
#[tokio::test]
async fn unassigned_categories_are_skipped_in_multi_template_mode() -> Result<()> {
    init_logging();
    let renderer = CatalogRenderer::new(default_settings());
    let images = InMemoryImageSource::new();

    let template = LayoutTemplate {
        elements: vec![
            ElementSpec {
                id: "name".to_string(),
                ref_x: 10.0,
                ref_y: 10.0,
                ref_w: 280.0,
                ref_h: 30.0,
                ..Default::default()
            },
            ElementSpec {
                id: "price".to_string(),
                ref_x: 10.0,
                ref_y: 50.0,
                ref_w: 120.0,
                ref_h: 24.0,
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    let mut registry = TemplateRegistry::new();
    registry.register("compact", template);
    registry.assign("Ferramentas", "compact");

    let mut all = products_in("Ferramentas", 2);
    all.extend(products_in("Jardim", 6));

    let bytes = renderer
        .render_multi_template(all, ViewerClass::Full, &images, &registry)
        .await?;

    // Only the two assigned cards render, so one page suffices.
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(page_count(&bytes)?, 1);
    Ok(())
}

/// A record with nothing but a name still renders on the default card.
#[tokio::test]
async fn sparse_records_render_without_error() -> Result<()> {
    init_logging();
    let renderer = CatalogRenderer::new(default_settings());
    let images = InMemoryImageSource::new();

    let sparse = vec![ProductRecord {
        id: 1,
        name: "Trena 5m".to_string(),
        ..Default::default()
    }];
    let bytes = renderer.render(sparse, ViewerClass::Restricted, &images).await?;
    assert!(bytes.starts_with(b"%PDF"));
    Ok(())
}

/// Products with real photo bytes embed; products pointing at a missing
/// location degrade to the placeholder without failing the run.
#[tokio::test]
async fn photos_embed_and_missing_photos_degrade() -> Result<()> {
    init_logging();
    let mut images = InMemoryImageSource::new();
    images.insert("produtos/1.png", test_png(64, 48));

    let mut with_photo = product(1, "Furadeira", "Ferramentas");
    with_photo.photo = Some("produtos/1.png".to_string());
    let mut broken_photo = product(2, "Serra", "Ferramentas");
    broken_photo.photo = Some("produtos/missing.png".to_string());

    let renderer = CatalogRenderer::new(default_settings());
    let bytes = renderer
        .render(vec![with_photo, broken_photo], ViewerClass::Full, &images)
        .await?;
    assert!(bytes.starts_with(b"%PDF"));
    // The good photo must actually land in the document as an image stream
    assert!(has_image_xobject(&bytes)?);
    Ok(())
}

/// Placement is deterministic: two identical runs leave the cursor in the
/// same state.
#[tokio::test]
async fn pagination_is_deterministic() -> Result<()> {
    init_logging();
    let settings = default_settings();
    let images = InMemoryImageSource::new();
    let groups = organize(products_in("Ferramentas", 13));

    let mut cursors = Vec::new();
    for _ in 0..2 {
        let mut doc = printpdf::PdfDocument::new("test");
        let engine = PaginationEngine::new(&settings);
        let mut session =
            RenderSession::new(&mut doc, engine.geometry(), settings.page.margin_top);
        for group in &groups {
            engine
                .render_group(&mut session, group, None, ViewerClass::Full, &images)
                .await?;
        }
        cursors.push((
            session.cursor.page_index,
            session.cursor.cards_on_current_page,
            session.cursor.content_y,
        ));
    }
    assert_eq!(cursors[0], cursors[1]);
    Ok(())
}

fn test_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 120, 40, 255]));
    let mut bytes = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .expect("png encode");
    bytes.into_inner()
}
