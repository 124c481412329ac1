//! Helper utilities for PDF rendering

pub mod colors;
pub mod compress;
pub mod fonts;
pub mod layer;
pub mod text_metrics;

pub use colors::{parse_hex, parse_hex_or_black, with_opacity, BLACK, GRAY, LIGHT_GRAY, WHITE};
pub use compress::compress_pdf;
pub use fonts::{builtin_font, card_font};
pub use layer::LayerBuilder;
pub use text_metrics::{
    get_builtin_measurer, get_helvetica_bold_measurer, get_helvetica_measurer,
    get_times_bold_measurer, get_times_measurer, BuiltinFontMeasurer,
};
