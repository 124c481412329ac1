//! Builtin font selection.
//!
//! All text renders with the PDF Standard 14 fonts, so no font assets are
//! embedded and subsetting never applies.

use printpdf::BuiltinFont;

use crate::config::FontFamily;
use crate::model::FontWeight;

/// Resolve a configured family/weight pair to a builtin font
pub fn builtin_font(family: FontFamily, weight: FontWeight) -> BuiltinFont {
    match (family, weight) {
        (FontFamily::SansSerif, FontWeight::Normal) => BuiltinFont::Helvetica,
        (FontFamily::SansSerif, FontWeight::Bold) => BuiltinFont::HelveticaBold,
        (FontFamily::Serif, FontWeight::Normal) => BuiltinFont::TimesRoman,
        (FontFamily::Serif, FontWeight::Bold) => BuiltinFont::TimesBold,
    }
}

/// Card text is always sans-serif; only the weight varies per element
pub fn card_font(weight: FontWeight) -> BuiltinFont {
    builtin_font(FontFamily::SansSerif, weight)
}
