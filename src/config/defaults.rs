/// Default page margin in mm
pub const DEFAULT_PAGE_MARGIN: f32 = 15.0;

/// Default grid rows per page
pub const DEFAULT_GRID_ROWS: u32 = 4;

/// Default grid columns per page
pub const DEFAULT_GRID_COLUMNS: u32 = 2;

/// Upper bound on configured grid rows and columns. Anything larger yields
/// sub-millimeter cards and a capacity that overflows grid arithmetic.
pub const MAX_GRID_DIMENSION: u32 = 100;

/// Default horizontal spacing between cards in mm
pub const DEFAULT_CARD_SPACING: f32 = 5.0;

/// Default vertical spacing between card rows in mm
pub const DEFAULT_ROW_SPACING: f32 = 5.0;

/// Upper cap on computed card height in mm.
///
/// The grid formula can produce very tall cards on sparse grids; the cap is
/// authoritative when the two disagree.
pub const CARD_HEIGHT_CAP: f32 = 80.0;

/// Minimum value any computed dimension is clamped to, in mm
pub const MIN_DIMENSION: f32 = 1.0;

/// Vertical gap between the last card row of a category and the next
/// category title, in mm
pub const INTER_CATEGORY_GAP: f32 = 8.0;

/// Default category title font size in points
pub const DEFAULT_TITLE_FONT_SIZE: f32 = 14.0;

/// Default vertical space reserved below a category title in mm
pub const DEFAULT_TITLE_BOTTOM_MARGIN: f32 = 4.0;

/// Default card border width in mm
pub const DEFAULT_CARD_BORDER_WIDTH: f32 = 0.3;

/// Default body font size on cards in points
pub const DEFAULT_BODY_FONT_SIZE: f32 = 8.0;

/// Default name line font size on cards in points
pub const DEFAULT_NAME_FONT_SIZE: f32 = 10.0;

/// Default line height on cards in mm
pub const DEFAULT_LINE_HEIGHT: f32 = 4.0;

/// Default photo disc diameter on the default card, as a fraction of card height
pub const DEFAULT_PHOTO_FRACTION: f32 = 0.7;

/// Pixel size at which circular photo crops are rasterized
pub const PHOTO_RASTER_PX: u32 = 256;

/// Cover title font size in points
pub const DEFAULT_COVER_TITLE_SIZE: f32 = 28.0;

/// Cover subtitle font size in points
pub const DEFAULT_COVER_SUBTITLE_SIZE: f32 = 16.0;

/// Cover date stamp font size in points
pub const DEFAULT_COVER_DATE_SIZE: f32 = 10.0;

/// Display label for products without a category
pub const UNCATEGORIZED_LABEL: &str = "Sem categoria";

/// Label drawn on the photo placeholder disc
pub const NO_PHOTO_LABEL: &str = "Sem foto";
