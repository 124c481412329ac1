//! Cover page: full-bleed background with an anchored title block.

use chrono::Local;
use image::imageops::FilterType;
use log::warn;
use printpdf::{Color, Mm, PaintMode, Pt, RawImage, XObjectTransform};

use crate::config::{CoverAnchor, CoverSpec, CoverText};
use crate::error::RenderError;
use crate::model::FontWeight;

use super::helpers::fonts::builtin_font;
use super::helpers::text_metrics::get_builtin_measurer;
use super::helpers::{parse_hex, parse_hex_or_black};
use super::image::ImageSource;
use super::pagination::RenderSession;

/// Raster density for the cover background; covers print fine well below
/// photo density
const COVER_DPI: f32 = 150.0;
/// Vertical gap between cover lines, as a multiple of the line height
const LINE_GAP: f32 = 1.6;

/// Draws the cover into the session's current (empty) layer. The caller
/// closes the page afterwards.
pub struct CoverRenderer;

impl CoverRenderer {
    pub async fn render(
        session: &mut RenderSession<'_>,
        cover: &CoverSpec,
        images: &dyn ImageSource,
    ) -> Result<(), RenderError> {
        Self::draw_background(session, cover, images).await?;
        Self::draw_text_block(session, cover);
        Ok(())
    }

    /// Full-bleed background: cover-fit image when one is configured and
    /// loadable, flat color fill otherwise.
    async fn draw_background(
        session: &mut RenderSession<'_>,
        cover: &CoverSpec,
        images: &dyn ImageSource,
    ) -> Result<(), RenderError> {
        if let Some(location) = &cover.background_image {
            match Self::embed_background(session, location, images).await {
                Ok(()) => return Ok(()),
                Err(e) => warn!("cover background '{}' unavailable: {}", location, e),
            }
        }

        let fill = parse_hex(&cover.background_color).unwrap_or(super::helpers::WHITE);
        session.layer.set_fill_color(Color::Rgb(fill));
        session.layer.add_rect(
            Mm(0.0),
            Mm(0.0),
            Mm(session.geometry.page_w),
            Mm(session.geometry.page_h),
            PaintMode::Fill,
        );
        Ok(())
    }

    async fn embed_background(
        session: &mut RenderSession<'_>,
        location: &str,
        images: &dyn ImageSource,
    ) -> Result<(), RenderError> {
        let bytes = images
            .fetch(location)
            .await
            .map_err(|e| RenderError::ImageEmbed(e.to_string()))?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| RenderError::ImageEmbed(e.to_string()))?;

        // Cover-fit: fill the page, cropping the overflowing axis
        let px_w = (session.geometry.page_w / 25.4 * COVER_DPI).round() as u32;
        let px_h = (session.geometry.page_h / 25.4 * COVER_DPI).round() as u32;
        let fitted = decoded.resize_to_fill(px_w, px_h, FilterType::Triangle);

        let mut png = std::io::Cursor::new(Vec::new());
        fitted
            .to_rgb8()
            .write_to(&mut png, image::ImageFormat::Png)
            .map_err(|e| RenderError::ImageEmbed(e.to_string()))?;

        let mut warnings = Vec::new();
        let raw = RawImage::decode_from_bytes(png.get_ref(), &mut warnings)
            .map_err(|e| RenderError::ImageEmbed(format!("{}", e)))?;
        let id = session.doc.add_image(&raw);

        let native_w_mm = px_w as f32 / COVER_DPI * 25.4;
        let scale = session.geometry.page_w / native_w_mm;
        session.layer.use_xobject(
            id,
            XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                rotate: None,
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(COVER_DPI),
            },
        );
        Ok(())
    }

    /// Title, optional subtitle and optional date stamp, horizontally
    /// centered and vertically anchored per the cover spec.
    fn draw_text_block(session: &mut RenderSession<'_>, cover: &CoverSpec) {
        let mut lines: Vec<(String, f32, printpdf::BuiltinFont, printpdf::Rgb)> = Vec::new();

        if !cover.title.text.is_empty() {
            lines.push(Self::styled_line(&cover.title, FontWeight::Bold));
        }
        if !cover.subtitle.text.is_empty() {
            lines.push(Self::styled_line(&cover.subtitle, FontWeight::Normal));
        }
        if cover.show_date {
            let stamp = Local::now().format("%d/%m/%Y").to_string();
            lines.push((
                stamp,
                cover.date_font_size,
                builtin_font(cover.title.family, FontWeight::Normal),
                parse_hex_or_black(&cover.date_color),
            ));
        }
        if lines.is_empty() {
            return;
        }

        let block_h: f32 = lines
            .iter()
            .map(|(_, size, font, _)| {
                get_builtin_measurer(*font).line_height_mm(*size) * LINE_GAP
            })
            .sum();

        let page_h = session.geometry.page_h;
        let mut y = match cover.anchor {
            CoverAnchor::Top => page_h * 0.15,
            CoverAnchor::Center => (page_h - block_h) / 2.0,
            CoverAnchor::Bottom => page_h * 0.85 - block_h,
        };

        for (text, size, font, color) in lines {
            let measurer = get_builtin_measurer(font);
            let width = measurer.measure_width_mm(&text, size);
            let x = (session.geometry.page_w - width) / 2.0;
            let baseline = y + measurer.ascender_mm(size);

            session.layer.set_fill_color(Color::Rgb(color));
            session
                .layer
                .use_text(text, size, Mm(x), session.pdf_y(baseline), font);
            y += measurer.line_height_mm(size) * LINE_GAP;
        }
    }

    fn styled_line(
        text: &CoverText,
        weight: FontWeight,
    ) -> (String, f32, printpdf::BuiltinFont, printpdf::Rgb) {
        (
            text.text.clone(),
            text.font_size,
            builtin_font(text.family, weight),
            parse_hex_or_black(&text.color),
        )
    }
}
