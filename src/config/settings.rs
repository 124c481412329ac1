//! Strongly-typed settings sections, one per persisted configuration blob.
//!
//! Each section is loaded independently from the [`ConfigStore`]; a missing
//! or malformed section falls back to its hard-coded default (never an
//! error). Validation happens once here, not at render sites.

use std::collections::HashMap;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::model::template::{FontWeight, HAlign, LayoutTemplate, TemplateRegistry};

use super::defaults::*;
use super::store::ConfigStore;

/// Section keys in the configuration store
pub const KEY_PAGE: &str = "page";
pub const KEY_GRID: &str = "grid";
pub const KEY_CATEGORY_TITLE: &str = "category_title";
pub const KEY_COVER: &str = "cover";
pub const KEY_TEMPLATE: &str = "template";
pub const KEY_TEMPLATE_MAP: &str = "template_map";

/// Prefix for per-id template blobs used in multi-template mode
pub const KEY_TEMPLATE_PREFIX: &str = "template:";

/// Standard paper sizes, or explicit custom dimensions in mm
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    A3,
    Letter,
    Custom {
        width_mm: f32,
        height_mm: f32,
    },
}

impl PaperSize {
    /// Portrait dimensions (width, height) in mm
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page dimensions and printable margins
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageSpec {
    pub paper: PaperSize,
    pub orientation: Orientation,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            orientation: Orientation::Portrait,
            margin_top: DEFAULT_PAGE_MARGIN,
            margin_bottom: DEFAULT_PAGE_MARGIN,
            margin_left: DEFAULT_PAGE_MARGIN,
            margin_right: DEFAULT_PAGE_MARGIN,
        }
    }
}

impl PageSpec {
    /// Final page dimensions in mm, with landscape swapping width/height
    pub fn page_dimensions(&self) -> (f32, f32) {
        let (w, h) = self.paper.dimensions();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Enforce the margin invariants: all margins non-negative, and opposing
    /// margins must leave printable space. Violations are repaired to the
    /// default margin rather than raised.
    fn normalize(mut self) -> Self {
        for m in [
            &mut self.margin_top,
            &mut self.margin_bottom,
            &mut self.margin_left,
            &mut self.margin_right,
        ] {
            if *m < 0.0 {
                warn!("negative page margin {} repaired to 0", m);
                *m = 0.0;
            }
        }
        let (w, h) = self.page_dimensions();
        if self.margin_top + self.margin_bottom >= h {
            warn!(
                "vertical margins {}+{} consume the {}mm page, using defaults",
                self.margin_top, self.margin_bottom, h
            );
            self.margin_top = DEFAULT_PAGE_MARGIN;
            self.margin_bottom = DEFAULT_PAGE_MARGIN;
        }
        if self.margin_left + self.margin_right >= w {
            warn!(
                "horizontal margins {}+{} consume the {}mm page, using defaults",
                self.margin_left, self.margin_right, w
            );
            self.margin_left = DEFAULT_PAGE_MARGIN;
            self.margin_right = DEFAULT_PAGE_MARGIN;
        }
        self
    }
}

/// Card grid shape on each page
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub rows: u32,
    pub columns: u32,
    pub card_spacing: f32,
    pub row_spacing: f32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_ROWS,
            columns: DEFAULT_GRID_COLUMNS,
            card_spacing: DEFAULT_CARD_SPACING,
            row_spacing: DEFAULT_ROW_SPACING,
        }
    }
}

impl GridSpec {
    pub fn capacity(&self) -> u32 {
        self.rows.saturating_mul(self.columns)
    }

    /// Repair degenerate values: between one and [`MAX_GRID_DIMENSION`] rows
    /// and columns, non-negative spacing. A visibly wrong layout beats a
    /// crash.
    fn normalize(mut self) -> Self {
        if self.rows == 0 {
            warn!("grid rows 0 repaired to 1");
            self.rows = 1;
        }
        if self.columns == 0 {
            warn!("grid columns 0 repaired to 1");
            self.columns = 1;
        }
        if self.rows > MAX_GRID_DIMENSION {
            warn!("grid rows {} clamped to {}", self.rows, MAX_GRID_DIMENSION);
            self.rows = MAX_GRID_DIMENSION;
        }
        if self.columns > MAX_GRID_DIMENSION {
            warn!("grid columns {} clamped to {}", self.columns, MAX_GRID_DIMENSION);
            self.columns = MAX_GRID_DIMENSION;
        }
        self.card_spacing = self.card_spacing.max(0.0);
        self.row_spacing = self.row_spacing.max(0.0);
        self
    }
}

/// Styling for category titles
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CategoryTitleStyle {
    pub font_size: f32,
    pub color: String,
    pub weight: FontWeight,
    pub align: HAlign,
    /// Vertical space reserved below the title baseline, in mm
    pub bottom_margin: f32,
}

impl Default for CategoryTitleStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_TITLE_FONT_SIZE,
            color: "#1F2937".to_string(),
            weight: FontWeight::Bold,
            align: HAlign::Left,
            bottom_margin: DEFAULT_TITLE_BOTTOM_MARGIN,
        }
    }
}

impl CategoryTitleStyle {
    /// Vertical room a title consumes: text block plus reserved margin, mm
    pub fn reserved_height(&self) -> f32 {
        // 1pt = 0.3528mm
        self.font_size * 0.3528 + self.bottom_margin
    }
}

/// Font family choice for cover text, resolved to a PDF builtin font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    SansSerif,
    Serif,
}

/// One cover text field with independent font, size and color
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoverText {
    pub text: String,
    pub family: FontFamily,
    pub font_size: f32,
    pub color: String,
}

impl Default for CoverText {
    fn default() -> Self {
        Self {
            text: String::new(),
            family: FontFamily::SansSerif,
            font_size: DEFAULT_COVER_TITLE_SIZE,
            color: "#111111".to_string(),
        }
    }
}

/// Vertical anchor for the cover text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverAnchor {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Cover page configuration. Absent section means no cover is drawn.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoverSpec {
    /// Location understood by the configured `ImageSource`
    pub background_image: Option<String>,
    /// Fallback fill when no background image is configured or it fails
    pub background_color: String,
    pub anchor: CoverAnchor,
    pub title: CoverText,
    pub subtitle: CoverText,
    pub show_date: bool,
    /// The date line has its own size and color but inherits the title's
    /// font family
    pub date_font_size: f32,
    pub date_color: String,
}

impl Default for CoverSpec {
    fn default() -> Self {
        Self {
            background_image: None,
            background_color: "#1E3A5F".to_string(),
            anchor: CoverAnchor::Center,
            title: CoverText {
                text: "Catálogo de Produtos".to_string(),
                font_size: DEFAULT_COVER_TITLE_SIZE,
                color: "#FFFFFF".to_string(),
                ..Default::default()
            },
            subtitle: CoverText {
                text: String::new(),
                font_size: DEFAULT_COVER_SUBTITLE_SIZE,
                color: "#E5E7EB".to_string(),
                ..Default::default()
            },
            show_date: true,
            date_font_size: DEFAULT_COVER_DATE_SIZE,
            date_color: "#E5E7EB".to_string(),
        }
    }
}

/// All settings for one generation run. Read-only once loaded; safe to
/// share across runs.
#[derive(Debug, Clone, Default)]
pub struct CatalogSettings {
    pub page: PageSpec,
    pub grid: GridSpec,
    pub category_title: CategoryTitleStyle,
    pub cover: Option<CoverSpec>,
    pub template: Option<LayoutTemplate>,
}

impl CatalogSettings {
    /// Load every section from the store, defaulting what is absent and
    /// repairing what is degenerate.
    pub fn load(store: &dyn ConfigStore) -> Self {
        Self {
            page: section::<PageSpec>(store, KEY_PAGE).normalize(),
            grid: section::<GridSpec>(store, KEY_GRID).normalize(),
            category_title: section(store, KEY_CATEGORY_TITLE),
            cover: optional_section(store, KEY_COVER),
            template: optional_section(store, KEY_TEMPLATE),
        }
    }
}

/// Load the multi-template registry: the category→template-id map plus one
/// template blob per referenced id. Ids whose blob is missing stay
/// unregistered, which later skips their categories.
pub fn load_template_registry(store: &dyn ConfigStore) -> TemplateRegistry {
    let mut registry = TemplateRegistry::new();
    let map: HashMap<String, String> = section(store, KEY_TEMPLATE_MAP);

    for (category, template_id) in map {
        let key = format!("{}{}", KEY_TEMPLATE_PREFIX, template_id);
        match optional_section::<LayoutTemplate>(store, &key) {
            Some(template) => {
                registry.register(template_id.clone(), template);
                registry.assign(category, template_id);
            }
            None => {
                warn!(
                    "template '{}' assigned to category '{}' is not persisted",
                    template_id, category
                );
                registry.assign(category, template_id);
            }
        }
    }
    registry
}

fn section<T: DeserializeOwned + Default>(store: &dyn ConfigStore, key: &str) -> T {
    optional_section(store, key).unwrap_or_default()
}

fn optional_section<T: DeserializeOwned>(store: &dyn ConfigStore, key: &str) -> Option<T> {
    let raw = store.get_raw(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("config section '{}' is malformed ({}), using default", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::store::InMemoryConfigStore;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let store = InMemoryConfigStore::new();
        let settings = CatalogSettings::load(&store);

        assert_eq!(settings.grid.capacity(), DEFAULT_GRID_ROWS * DEFAULT_GRID_COLUMNS);
        assert!(settings.cover.is_none());
        assert!(settings.template.is_none());
    }

    #[test]
    fn malformed_section_falls_back_with_warning() {
        let mut store = InMemoryConfigStore::new();
        store.set(KEY_GRID, "{not json");
        let settings = CatalogSettings::load(&store);
        assert_eq!(settings.grid.rows, DEFAULT_GRID_ROWS);
    }

    #[test]
    fn landscape_swaps_page_dimensions() {
        let spec = PageSpec {
            orientation: Orientation::Landscape,
            ..Default::default()
        };
        let (w, h) = spec.page_dimensions();
        assert_eq!((w, h), (297.0, 210.0));
    }

    #[test]
    fn degenerate_grid_and_margins_are_repaired() {
        let mut store = InMemoryConfigStore::new();
        store.set(KEY_GRID, r#"{"rows": 0, "columns": 0, "card_spacing": -2.0}"#);
        store.set(
            KEY_PAGE,
            r#"{"margin_top": 200.0, "margin_bottom": 200.0}"#,
        );
        let settings = CatalogSettings::load(&store);

        assert_eq!(settings.grid.rows, 1);
        assert_eq!(settings.grid.columns, 1);
        assert_eq!(settings.grid.card_spacing, 0.0);
        assert_eq!(settings.page.margin_top, DEFAULT_PAGE_MARGIN);
    }

    #[test]
    fn oversized_grid_clamps_instead_of_overflowing() {
        let mut store = InMemoryConfigStore::new();
        store.set(KEY_GRID, r#"{"rows": 100000, "columns": 100000}"#);
        let settings = CatalogSettings::load(&store);

        assert_eq!(settings.grid.rows, MAX_GRID_DIMENSION);
        assert_eq!(settings.grid.columns, MAX_GRID_DIMENSION);
        assert_eq!(settings.grid.capacity(), MAX_GRID_DIMENSION * MAX_GRID_DIMENSION);
    }

    #[test]
    fn registry_loads_assigned_templates() {
        let mut store = InMemoryConfigStore::new();
        store.set(KEY_TEMPLATE_MAP, r#"{"Ferramentas": "compact"}"#);
        store.set(
            "template:compact",
            r#"{"ref_card_width": 300.0, "ref_card_height": 200.0, "elements": []}"#,
        );

        let registry = load_template_registry(&store);
        assert!(registry.for_category("Ferramentas").is_some());
        assert!(registry.for_category("Outros").is_none());
    }
}
