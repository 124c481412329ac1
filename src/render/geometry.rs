//! Page and card geometry derivation.

use log::debug;

use crate::config::defaults::{CARD_HEIGHT_CAP, MIN_DIMENSION};
use crate::config::{GridSpec, PageSpec};

/// Resolved dimensions for one generation run, all in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_w: f32,
    pub page_h: f32,
    pub content_w: f32,
    pub content_h: f32,
    pub card_w: f32,
    pub card_h: f32,
}

impl PageGeometry {
    /// Derive content and card dimensions from page and grid specs.
    ///
    /// `title_reserve` is the vertical room a category title consumes; it is
    /// folded into the card-height formula so a title plus a full grid of
    /// rows fits the printable area. Card height is additionally capped:
    /// sparse grids leave bottom whitespace instead of stretching cards.
    /// Degenerate results clamp to a minimum instead of erroring.
    pub fn resolve(page: &PageSpec, grid: &GridSpec, title_reserve: f32) -> Self {
        let (page_w, page_h) = page.page_dimensions();
        let content_w = page_w - page.margin_left - page.margin_right;
        let content_h = page_h - page.margin_top - page.margin_bottom - title_reserve;

        let columns = grid.columns.max(1) as f32;
        let rows = grid.rows.max(1) as f32;

        let card_w = (content_w - grid.card_spacing * (columns - 1.0)) / columns;
        let card_h = (content_h - grid.row_spacing * (rows - 1.0)) / rows;
        let card_h = card_h.min(CARD_HEIGHT_CAP);

        let geometry = Self {
            page_w,
            page_h,
            content_w: clamp_dimension(content_w, "content width"),
            content_h: clamp_dimension(content_h, "content height"),
            card_w: clamp_dimension(card_w, "card width"),
            card_h: clamp_dimension(card_h, "card height"),
        };
        debug!(
            "geometry: page {}x{}mm, card {:.1}x{:.1}mm",
            geometry.page_w, geometry.page_h, geometry.card_w, geometry.card_h
        );
        geometry
    }

    /// Bottom boundary of the printable area, measured from the page top
    pub fn printable_bottom(&self, page: &PageSpec) -> f32 {
        self.page_h - page.margin_bottom
    }
}

fn clamp_dimension(value: f32, what: &str) -> f32 {
    if value < MIN_DIMENSION {
        debug!("{} {:.2}mm clamped to {}mm", what, value, MIN_DIMENSION);
        MIN_DIMENSION
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridSpec, PageSpec};

    #[test]
    fn a4_default_geometry() {
        let page = PageSpec::default();
        let grid = GridSpec::default();
        let g = PageGeometry::resolve(&page, &grid, 0.0);

        assert_eq!((g.page_w, g.page_h), (210.0, 297.0));
        assert_eq!(g.content_w, 210.0 - 30.0);
        // card_w = (180 - 5*1) / 2
        assert!((g.card_w - 87.5).abs() < 1e-4);
    }

    #[test]
    fn card_height_is_capped() {
        let page = PageSpec::default();
        let grid = GridSpec {
            rows: 1,
            columns: 1,
            ..Default::default()
        };
        let g = PageGeometry::resolve(&page, &grid, 0.0);
        assert_eq!(g.card_h, CARD_HEIGHT_CAP);
    }

    #[test]
    fn degenerate_dimensions_clamp_instead_of_failing() {
        let page = PageSpec::default();
        let grid = GridSpec {
            rows: 500,
            columns: 500,
            card_spacing: 10.0,
            row_spacing: 10.0,
        };
        let g = PageGeometry::resolve(&page, &grid, 0.0);
        assert_eq!(g.card_w, 1.0);
        assert_eq!(g.card_h, 1.0);
    }

    #[test]
    fn title_reserve_shrinks_content_height() {
        let page = PageSpec::default();
        let grid = GridSpec::default();
        let without = PageGeometry::resolve(&page, &grid, 0.0);
        let with = PageGeometry::resolve(&page, &grid, 10.0);
        assert!((without.content_h - with.content_h - 10.0).abs() < 1e-4);
        assert!(with.card_h < without.card_h);
    }
}
