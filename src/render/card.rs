//! Card rendering: the default built-in layout and template-driven layouts.

use image::RgbaImage;
use log::warn;
use printpdf::{BuiltinFont, Color, Mm, PaintMode, PdfDocument, Pt, RawImage, XObjectId,
    XObjectTransform};

use crate::config::defaults::{
    DEFAULT_BODY_FONT_SIZE, DEFAULT_CARD_BORDER_WIDTH, DEFAULT_LINE_HEIGHT,
    DEFAULT_NAME_FONT_SIZE, DEFAULT_PHOTO_FRACTION, NO_PHOTO_LABEL, PHOTO_RASTER_PX,
};
use crate::error::RenderError;
use crate::model::{ContentBinding, ContentKind, ElementSpec, FontWeight, HAlign, LayoutTemplate,
    ProductRecord, ViewerClass};
use crate::parser::{parse_markup, TextRun};

use super::helpers::fonts::card_font;
use super::helpers::text_metrics::get_builtin_measurer;
use super::helpers::{colors, parse_hex, parse_hex_or_black, with_opacity};
use super::image::{crop_circular, ImageSource, PhotoStroke};
use super::mapper::{map_element, MappedRect};
use super::pagination::RenderSession;

const MM_TO_PT: f32 = 2.834_645_7;
/// DPI at which photo rasters are registered in the document
const PHOTO_DPI: f32 = 300.0;
/// Inner padding of the default card, mm
const CARD_PADDING: f32 = 3.0;

/// Absolute card rectangle on the page; `y` is the top edge, top-down mm.
#[derive(Debug, Clone, Copy)]
pub struct CardRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Resolve the content an element binding yields for a product, after the
/// capability gate. `None` means the element draws nothing at all.
pub fn resolve_content(
    product: &ProductRecord,
    binding: ContentBinding,
    viewer: ViewerClass,
) -> Option<String> {
    match binding {
        ContentBinding::Name => {
            (!product.name.is_empty()).then(|| product.name.clone())
        }
        ContentBinding::Code => product.code.clone(),
        ContentBinding::Price => product.formatted_price(),
        ContentBinding::Stock => {
            if viewer.can_see_stock() {
                product.formatted_stock()
            } else {
                None
            }
        }
        ContentBinding::Brand => product.brand.clone(),
        ContentBinding::Weight => product.formatted_weight(),
        ContentBinding::Dimensions => product.formatted_dimensions(),
        ContentBinding::Description => product.description.clone(),
        ContentBinding::Photo => product.photo.clone(),
    }
}

/// Draws one product card into the current page layer.
#[derive(Default)]
pub struct CardRenderer;

impl CardRenderer {
    pub fn new() -> Self {
        Self
    }

    pub async fn render(
        &self,
        session: &mut RenderSession<'_>,
        product: &ProductRecord,
        rect: CardRect,
        template: Option<&LayoutTemplate>,
        viewer: ViewerClass,
        images: &dyn ImageSource,
    ) -> Result<(), RenderError> {
        match template {
            Some(t) if !t.elements.is_empty() => {
                self.render_template(session, product, rect, t, viewer, images).await
            }
            _ => self.render_default(session, product, rect, viewer, images).await,
        }
    }

    /// Built-in layout: bordered rectangle, circular photo on the left,
    /// stacked text lines on the right. Absent fields are omitted entirely;
    /// lines stop when the card's vertical space is exhausted.
    async fn render_default(
        &self,
        session: &mut RenderSession<'_>,
        product: &ProductRecord,
        rect: CardRect,
        viewer: ViewerClass,
        images: &dyn ImageSource,
    ) -> Result<(), RenderError> {
        self.draw_card_frame(
            session,
            rect,
            colors::WHITE,
            colors::parse_hex_or_black("#CCCCCC"),
            DEFAULT_CARD_BORDER_WIDTH,
        );

        let diameter = (rect.h * DEFAULT_PHOTO_FRACTION).min(rect.w * 0.4);
        let photo_cx = rect.x + CARD_PADDING + diameter / 2.0;
        let photo_cy = rect.y + rect.h / 2.0;
        self.draw_photo(session, product.photo.as_deref(), photo_cx, photo_cy, diameter, None, images)
            .await?;

        let text_x = rect.x + CARD_PADDING * 2.0 + diameter;
        let text_bottom = rect.y + rect.h - CARD_PADDING;
        let mut lines: Vec<(String, f32, BuiltinFont)> = Vec::new();

        lines.push((
            product.name.clone(),
            DEFAULT_NAME_FONT_SIZE,
            BuiltinFont::HelveticaBold,
        ));
        if let Some(code) = &product.code {
            lines.push((format!("Cód: {}", code), DEFAULT_BODY_FONT_SIZE, BuiltinFont::Helvetica));
        }
        if let Some(price) = product.formatted_price() {
            lines.push((price, DEFAULT_BODY_FONT_SIZE, BuiltinFont::HelveticaBold));
        }
        if let Some(brand) = &product.brand {
            lines.push((
                format!("Marca: {}", brand),
                DEFAULT_BODY_FONT_SIZE,
                BuiltinFont::Helvetica,
            ));
        }
        if let Some(dims) = product.formatted_dimensions() {
            lines.push((dims, DEFAULT_BODY_FONT_SIZE, BuiltinFont::Helvetica));
        }
        if let Some(weight) = product.formatted_weight() {
            lines.push((
                format!("Peso: {}", weight),
                DEFAULT_BODY_FONT_SIZE,
                BuiltinFont::Helvetica,
            ));
        }
        if let Some(stock) = resolve_content(product, ContentBinding::Stock, viewer) {
            lines.push((
                format!("Estoque: {}", stock),
                DEFAULT_BODY_FONT_SIZE,
                BuiltinFont::Helvetica,
            ));
        }

        session.layer.set_fill_color(Color::Rgb(colors::BLACK));
        let mut y = rect.y + CARD_PADDING;
        for (text, size, font) in lines {
            let measurer = get_builtin_measurer(font);
            let baseline = y + measurer.ascender_mm(size);
            if baseline + measurer.descender_mm(size) > text_bottom {
                break;
            }
            let pdf_y = session.pdf_y(baseline);
            session.layer.use_text(text, size, Mm(text_x), pdf_y, font);
            y += DEFAULT_LINE_HEIGHT;
        }

        Ok(())
    }

    /// Template layout: card-level background/border, then the template's
    /// elements in ascending z-order.
    async fn render_template(
        &self,
        session: &mut RenderSession<'_>,
        product: &ProductRecord,
        rect: CardRect,
        template: &LayoutTemplate,
        viewer: ViewerClass,
        images: &dyn ImageSource,
    ) -> Result<(), RenderError> {
        let bg = parse_hex(&template.card_background_color).unwrap_or(colors::WHITE);
        let border = parse_hex_or_black(&template.card_border_color);
        self.draw_card_frame(session, rect, bg, border, template.card_border_width);

        for elem in template.draw_order() {
            let Some(binding) = elem.binding() else {
                warn!("template element '{}' has no known binding, skipped", elem.id);
                continue;
            };

            let mapped = map_element(
                elem,
                rect.x,
                rect.y,
                rect.w,
                rect.h,
                template.ref_card_width,
                template.ref_card_height,
            );

            if elem.content_kind == ContentKind::Image {
                self.render_image_element(session, product, elem, &mapped, viewer, images)
                    .await?;
                continue;
            }

            let Some(content) = resolve_content(product, binding, viewer) else {
                continue;
            };
            let runs = parse_markup(&content);
            let scale_x = rect.w / template.ref_card_width;
            self.draw_text_element(session, elem, &mapped, &runs, scale_x);
        }

        Ok(())
    }

    /// Image elements delegate to the circular crop and never draw their own
    /// rectangle border: the border becomes the stroke ring of the crop.
    async fn render_image_element(
        &self,
        session: &mut RenderSession<'_>,
        product: &ProductRecord,
        elem: &ElementSpec,
        mapped: &MappedRect,
        viewer: ViewerClass,
        images: &dyn ImageSource,
    ) -> Result<(), RenderError> {
        let diameter = mapped.w.min(mapped.h);
        let cx = mapped.x + mapped.w / 2.0;
        let cy = mapped.y + mapped.h / 2.0;

        let stroke = if elem.border_width > 0.0 {
            let rgb = parse_hex_or_black(&elem.border_color);
            let width_mm = elem.border_width * (mapped.w / elem.ref_w.max(1.0));
            let width_px =
                ((width_mm / diameter.max(1.0)) * PHOTO_RASTER_PX as f32).round().max(1.0) as u32;
            Some(PhotoStroke {
                width_px,
                rgb: [
                    (rgb.r * 255.0) as u8,
                    (rgb.g * 255.0) as u8,
                    (rgb.b * 255.0) as u8,
                ],
            })
        } else {
            None
        };

        let location = resolve_content(product, ContentBinding::Photo, viewer);
        self.draw_photo(session, location.as_deref(), cx, cy, diameter, stroke, images)
            .await
    }

    /// Fetch, crop and place a product photo; failures degrade to the
    /// placeholder disc and never abort the run.
    async fn draw_photo(
        &self,
        session: &mut RenderSession<'_>,
        location: Option<&str>,
        cx: f32,
        cy_top_down: f32,
        diameter: f32,
        stroke: Option<PhotoStroke>,
        images: &dyn ImageSource,
    ) -> Result<(), RenderError> {
        if let Some(loc) = location {
            match images.fetch(loc).await {
                Ok(bytes) => match crop_circular(&bytes, PHOTO_RASTER_PX, stroke) {
                    // Embedding failures degrade like load failures: a
                    // placeholder card beats an aborted catalog
                    Ok(raster) => match embed_raster(session.doc, &raster) {
                        Ok(id) => {
                            let cy_pdf = session.geometry.page_h - cy_top_down;
                            session.layer.begin_clip_circle(Mm(cx), Mm(cy_pdf), Mm(diameter / 2.0));
                            session.layer.use_xobject(
                                id,
                                photo_transform(
                                    cx - diameter / 2.0,
                                    cy_pdf - diameter / 2.0,
                                    diameter,
                                ),
                            );
                            session.layer.end_clip();
                            return Ok(());
                        }
                        Err(e) => warn!("photo '{}' could not be embedded: {}", loc, e),
                    },
                    Err(e) => warn!("photo '{}' could not be processed: {}", loc, e),
                },
                Err(e) => warn!("photo '{}' could not be loaded: {}", loc, e),
            }
        }
        self.draw_photo_placeholder(session, cx, cy_top_down, diameter);
        Ok(())
    }

    /// Gray disc with a "no photo" label
    fn draw_photo_placeholder(
        &self,
        session: &mut RenderSession<'_>,
        cx: f32,
        cy_top_down: f32,
        diameter: f32,
    ) {
        let cy = session.geometry.page_h - cy_top_down;
        let layer = &mut session.layer;

        layer.set_fill_color(Color::Rgb(colors::LIGHT_GRAY));
        layer.set_outline_color(Color::Rgb(colors::GRAY));
        layer.set_outline_thickness(0.5);
        layer.add_circle(Mm(cx), Mm(cy), Mm(diameter / 2.0), PaintMode::FillStroke);

        let size = (diameter * 0.6).clamp(4.0, 7.0);
        let measurer = get_builtin_measurer(BuiltinFont::Helvetica);
        let w = measurer.measure_width_mm(NO_PHOTO_LABEL, size);
        layer.set_fill_color(Color::Rgb(colors::GRAY));
        layer.use_text(
            NO_PHOTO_LABEL,
            size,
            Mm(cx - w / 2.0),
            Mm(cy - measurer.ascender_mm(size) / 2.0),
            BuiltinFont::Helvetica,
        );
    }

    fn draw_card_frame(
        &self,
        session: &mut RenderSession<'_>,
        rect: CardRect,
        background: printpdf::Rgb,
        border: printpdf::Rgb,
        border_width: f32,
    ) {
        let y_top = session.pdf_y(rect.y);
        let y_bottom = session.pdf_y(rect.y + rect.h);
        let layer = &mut session.layer;

        layer.set_fill_color(Color::Rgb(background));
        let mode = if border_width > 0.0 {
            layer.set_outline_color(Color::Rgb(border));
            layer.set_outline_thickness(border_width * MM_TO_PT);
            PaintMode::FillStroke
        } else {
            PaintMode::Fill
        };
        layer.add_rect(Mm(rect.x), y_bottom, Mm(rect.x + rect.w), y_top, mode);
    }

    /// Draw a text element's background, border and styled runs.
    ///
    /// Element border radius and padding are authored in reference units and
    /// rescaled with the horizontal axis; font sizes are points and do not
    /// rescale.
    fn draw_text_element(
        &self,
        session: &mut RenderSession<'_>,
        elem: &ElementSpec,
        mapped: &MappedRect,
        runs: &[TextRun],
        scale_x: f32,
    ) {
        let pad = elem.padding * scale_x;
        let radius = elem.border_radius * scale_x;
        let y_top = session.pdf_y(mapped.y + mapped.h);

        if let Some(bg_spec) = &elem.background_color {
            if let Some(bg) = parse_hex(bg_spec) {
                session
                    .layer
                    .set_fill_color(Color::Rgb(with_opacity(bg, elem.opacity)));
                session.layer.add_rounded_rect(
                    Mm(mapped.x),
                    y_top,
                    Mm(mapped.w),
                    Mm(mapped.h),
                    Mm(radius),
                    PaintMode::Fill,
                );
            }
        }
        if elem.border_width > 0.0 {
            let border = with_opacity(parse_hex_or_black(&elem.border_color), elem.opacity);
            session.layer.set_outline_color(Color::Rgb(border));
            session
                .layer
                .set_outline_thickness(elem.border_width * scale_x * MM_TO_PT);
            session.layer.add_rounded_rect(
                Mm(mapped.x),
                y_top,
                Mm(mapped.w),
                Mm(mapped.h),
                Mm(radius),
                PaintMode::Stroke,
            );
        }

        if runs.is_empty() {
            return;
        }

        let base_font = card_font(elem.weight);
        let total_w: f32 = runs
            .iter()
            .map(|run| {
                let font = run_font(run, elem.weight);
                get_builtin_measurer(font).measure_width_mm(run.text(), elem.font_size)
            })
            .sum();

        let x = match elem.text_align {
            HAlign::Left => mapped.x + pad,
            HAlign::Center => mapped.x + (mapped.w - total_w) / 2.0,
            HAlign::Right => mapped.x + mapped.w - pad - total_w,
        };
        let measurer = get_builtin_measurer(base_font);
        let line_h = measurer.line_height_mm(elem.font_size);
        let baseline_top_down =
            mapped.y + (mapped.h - line_h) / 2.0 + measurer.ascender_mm(elem.font_size);
        let baseline_pdf = session.geometry.page_h - baseline_top_down;

        let color = with_opacity(parse_hex_or_black(&elem.color), elem.opacity);
        session.layer.set_fill_color(Color::Rgb(color));

        // Advance along the (possibly rotated) baseline, run by run
        let theta = elem.rotation.to_radians();
        let mut advance = 0.0_f32;
        for run in runs {
            let font = run_font(run, elem.weight);
            let run_x = x + advance * theta.cos();
            let run_y = baseline_pdf + advance * theta.sin();
            session.layer.use_text_rotated(
                run.text(),
                elem.font_size,
                Mm(run_x),
                Mm(run_y),
                elem.rotation,
                font,
            );
            advance += get_builtin_measurer(font).measure_width_mm(run.text(), elem.font_size);
        }
    }
}

fn run_font(run: &TextRun, base_weight: FontWeight) -> BuiltinFont {
    if run.is_bold() {
        BuiltinFont::HelveticaBold
    } else {
        card_font(base_weight)
    }
}

/// Register a processed photo raster in the document as a PNG image
fn embed_raster(doc: &mut PdfDocument, raster: &RgbaImage) -> Result<XObjectId, RenderError> {
    let mut png = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(raster.clone())
        .write_to(&mut png, image::ImageFormat::Png)
        .map_err(|e| RenderError::ImageEmbed(e.to_string()))?;

    let mut warnings = Vec::new();
    let raw = RawImage::decode_from_bytes(png.get_ref(), &mut warnings)
        .map_err(|e| RenderError::ImageEmbed(format!("{}", e)))?;
    Ok(doc.add_image(&raw))
}

/// Transform placing a square photo raster with its lower-left corner at
/// (x, y) in mm, scaled to the requested diameter
fn photo_transform(x_mm: f32, y_mm: f32, diameter_mm: f32) -> XObjectTransform {
    let native_mm = PHOTO_RASTER_PX as f32 / PHOTO_DPI * 25.4;
    let scale = diameter_mm / native_mm;
    XObjectTransform {
        translate_x: Some(Pt(x_mm * MM_TO_PT)),
        translate_y: Some(Pt(y_mm * MM_TO_PT)),
        rotate: None,
        scale_x: Some(scale),
        scale_y: Some(scale),
        dpi: Some(PHOTO_DPI),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restricted_viewer_never_sees_stock() {
        let product = ProductRecord {
            name: "Furadeira".to_string(),
            stock: Some(10.0),
            ..Default::default()
        };
        assert!(resolve_content(&product, ContentBinding::Stock, ViewerClass::Full).is_some());
        assert_eq!(
            resolve_content(&product, ContentBinding::Stock, ViewerClass::Restricted),
            None
        );
    }

    #[test]
    fn absent_fields_resolve_to_none() {
        let product = ProductRecord {
            name: "Trena".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_content(&product, ContentBinding::Brand, ViewerClass::Full), None);
        assert_eq!(resolve_content(&product, ContentBinding::Price, ViewerClass::Full), None);
        assert_eq!(
            resolve_content(&product, ContentBinding::Name, ViewerClass::Full).as_deref(),
            Some("Trena")
        );
    }
}
