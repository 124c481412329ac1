//! Pagination engine: walks category groups and places cards on a page
//! grid, breaking pages on vertical overflow.
//!
//! All cursor arithmetic is top-down (mm from the page top); conversion to
//! PDF bottom-up coordinates happens only at draw time via
//! [`RenderSession::pdf_y`].

use log::debug;
use printpdf::{Color, Mm, PdfDocument, PdfPage};

use crate::config::CatalogSettings;
use crate::error::RenderError;
use crate::model::{CategoryGroup, HAlign, LayoutTemplate, ViewerClass};

use super::card::{CardRect, CardRenderer};
use super::geometry::PageGeometry;

/// Tolerance for boundary checks: a full grid row lands exactly on the
/// printable bottom, which must not read as overflow under float rounding
const FIT_TOLERANCE: f32 = 0.01;
use super::helpers::fonts::card_font;
use super::helpers::text_metrics::get_builtin_measurer;
use super::helpers::{colors, LayerBuilder};
use super::image::ImageSource;

/// Engine-owned mutable placement state, created once per generation run.
#[derive(Debug, Clone, Copy)]
pub struct PageCursor {
    pub page_index: usize,
    /// Next free vertical position, measured from the page top in mm
    pub content_y: f32,
    /// Cards placed on the current page since the last title or page break
    pub cards_on_current_page: u32,
}

/// Exclusive render state for one generation run: the document (for image
/// registration), the op stream of the page being built, finished pages,
/// and the cursor. The active template is a scoped parameter of the
/// pagination calls, never stored here.
pub struct RenderSession<'a> {
    pub doc: &'a mut PdfDocument,
    pub layer: LayerBuilder,
    pub cursor: PageCursor,
    pub geometry: PageGeometry,
    pages: Vec<PdfPage>,
    margin_top: f32,
}

impl<'a> RenderSession<'a> {
    pub fn new(doc: &'a mut PdfDocument, geometry: PageGeometry, margin_top: f32) -> Self {
        Self {
            doc,
            layer: LayerBuilder::new(),
            cursor: PageCursor {
                page_index: 0,
                content_y: margin_top,
                cards_on_current_page: 0,
            },
            geometry,
            pages: Vec::new(),
            margin_top,
        }
    }

    /// Convert a top-down y position to PDF bottom-up coordinates
    pub fn pdf_y(&self, top_down_y: f32) -> Mm {
        Mm(self.geometry.page_h - top_down_y)
    }

    /// Close the current page and reset the cursor to the top of a new one
    pub fn start_new_page(&mut self) {
        let layer = std::mem::take(&mut self.layer);
        self.pages.push(PdfPage::new(
            Mm(self.geometry.page_w),
            Mm(self.geometry.page_h),
            layer.into_ops(),
        ));
        self.cursor.page_index += 1;
        self.cursor.content_y = self.margin_top;
        self.cursor.cards_on_current_page = 0;
        debug!("page break -> page {}", self.cursor.page_index);
    }

    /// Close the final page and hand back the full page list
    pub fn finish(mut self) -> Vec<PdfPage> {
        let layer = std::mem::take(&mut self.layer);
        self.pages.push(PdfPage::new(
            Mm(self.geometry.page_w),
            Mm(self.geometry.page_h),
            layer.into_ops(),
        ));
        self.pages
    }
}

/// Places one category group after another, handling titles, grid cells,
/// overflow and per-category counter resets.
pub struct PaginationEngine<'s> {
    settings: &'s CatalogSettings,
    geometry: PageGeometry,
}

impl<'s> PaginationEngine<'s> {
    pub fn new(settings: &'s CatalogSettings) -> Self {
        let reserve = settings.category_title.reserved_height();
        let geometry = PageGeometry::resolve(&settings.page, &settings.grid, reserve);
        Self { settings, geometry }
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Render one category: title, then its cards in grid order.
    ///
    /// The counter resets to zero at the first card of every group; the page
    /// and vertical position persist across group boundaries unless overflow
    /// forces a break.
    pub async fn render_group(
        &self,
        session: &mut RenderSession<'_>,
        group: &CategoryGroup,
        template: Option<&LayoutTemplate>,
        viewer: ViewerClass,
        images: &dyn ImageSource,
    ) -> Result<(), RenderError> {
        let page = &self.settings.page;
        let grid = &self.settings.grid;
        let title = &self.settings.category_title;
        let bottom = self.geometry.printable_bottom(page);

        // Room for the title plus at least one card row, unless the page is
        // already fresh (a grid taller than the page must not loop forever)
        let needed = title.reserved_height() + self.geometry.card_h;
        let page_is_fresh = session.cursor.content_y <= session.margin_top;
        if !page_is_fresh && session.cursor.content_y + needed > bottom + FIT_TOLERANCE {
            session.start_new_page();
        }

        self.draw_title(session, &group.category_name);
        session.cursor.content_y += title.reserved_height();
        session.cursor.cards_on_current_page = 0;

        let mut block_top = session.cursor.content_y;
        let card_renderer = CardRenderer::new();
        let columns = grid.columns.max(1);

        for product in &group.products {
            // Grid is full: break the page before placing the next card
            if session.cursor.cards_on_current_page >= grid.capacity() {
                session.start_new_page();
                block_top = session.cursor.content_y;
            }

            let (mut x, mut y) = self.cell_position(block_top, session.cursor.cards_on_current_page, columns);

            // Overflow: the card would cross the bottom printable boundary
            if y + self.geometry.card_h > bottom + FIT_TOLERANCE
                && !(session.cursor.cards_on_current_page == 0 && block_top <= session.margin_top)
            {
                session.start_new_page();
                block_top = session.cursor.content_y;
                let cell = self.cell_position(block_top, 0, columns);
                x = cell.0;
                y = cell.1;
            }

            let rect = CardRect {
                x,
                y,
                w: self.geometry.card_w,
                h: self.geometry.card_h,
            };
            card_renderer
                .render(session, product, rect, template, viewer, images)
                .await?;
            session.cursor.cards_on_current_page += 1;
        }

        // Advance past the last occupied row plus the inter-category gap
        let rows_used = session.cursor.cards_on_current_page.div_ceil(columns);
        if rows_used > 0 {
            session.cursor.content_y = block_top
                + rows_used as f32 * self.geometry.card_h
                + rows_used.saturating_sub(1) as f32 * grid.row_spacing;
        }
        session.cursor.content_y += crate::config::defaults::INTER_CATEGORY_GAP;

        Ok(())
    }

    /// Top-left corner of a grid cell, top-down coordinates
    fn cell_position(&self, block_top: f32, card_index: u32, columns: u32) -> (f32, f32) {
        let row = card_index / columns;
        let col = card_index % columns;
        let x = self.settings.page.margin_left
            + col as f32 * (self.geometry.card_w + self.settings.grid.card_spacing);
        let y = block_top + row as f32 * (self.geometry.card_h + self.settings.grid.row_spacing);
        (x, y)
    }

    fn draw_title(&self, session: &mut RenderSession<'_>, text: &str) {
        let style = &self.settings.category_title;
        let font = card_font(style.weight);
        let measurer = get_builtin_measurer(font);

        let x = match style.align {
            HAlign::Left => self.settings.page.margin_left,
            HAlign::Center => {
                let w = measurer.measure_width_mm(text, style.font_size);
                self.settings.page.margin_left + (self.geometry.content_w - w) / 2.0
            }
            HAlign::Right => {
                let w = measurer.measure_width_mm(text, style.font_size);
                self.settings.page.margin_left + self.geometry.content_w - w
            }
        };
        let baseline = session.cursor.content_y + measurer.ascender_mm(style.font_size);

        session
            .layer
            .set_fill_color(Color::Rgb(colors::parse_hex_or_black(&style.color)));
        let y = session.pdf_y(baseline);
        session
            .layer
            .use_text(text, style.font_size, Mm(x), y, font);
    }
}
