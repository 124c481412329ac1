//! Text measurement for PDF builtin fonts.
//!
//! Cards and titles are laid out before any text is drawn, so widths and
//! vertical metrics come from Adobe's AFM tables for the Standard 14 fonts
//! rather than from the rendered output.

use printpdf::BuiltinFont;

/// 1 point = 0.3528 mm
const PT_TO_MM: f32 = 0.3528;

/// Text measurer for the builtin fonts this crate renders with.
pub struct BuiltinFontMeasurer {
    font: BuiltinFont,
}

impl BuiltinFontMeasurer {
    pub fn new(font: BuiltinFont) -> Self {
        Self { font }
    }

    /// Character width in 1000 units per em
    fn char_width(&self, c: char) -> u16 {
        // Builtin fonts are Win-1252; measure non-ASCII at an average width
        if !c.is_ascii() {
            return 500;
        }

        let code = c as usize;
        match self.font {
            BuiltinFont::TimesRoman => TIMES_ROMAN_WIDTHS.get(code).copied().unwrap_or(250),
            BuiltinFont::TimesBold => TIMES_BOLD_WIDTHS.get(code).copied().unwrap_or(250),
            BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique => {
                HELVETICA_BOLD_WIDTHS.get(code).copied().unwrap_or(278)
            }
            _ => HELVETICA_WIDTHS.get(code).copied().unwrap_or(278),
        }
    }

    pub fn measure_width_pt(&self, text: &str, font_size: f32) -> f32 {
        let total: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        (total as f32 / 1000.0) * font_size
    }

    pub fn measure_width_mm(&self, text: &str, font_size: f32) -> f32 {
        self.measure_width_pt(text, font_size) * PT_TO_MM
    }

    /// Ascender height in mm at a given font size
    pub fn ascender_mm(&self, font_size: f32) -> f32 {
        let ascender = match self.font {
            BuiltinFont::TimesRoman | BuiltinFont::TimesBold => 683,
            _ => 718,
        };
        (ascender as f32 / 1000.0) * font_size * PT_TO_MM
    }

    /// Descender depth in mm at a given font size (positive value)
    pub fn descender_mm(&self, font_size: f32) -> f32 {
        let descender = match self.font {
            BuiltinFont::TimesRoman | BuiltinFont::TimesBold => 217,
            _ => 207,
        };
        (descender as f32 / 1000.0) * font_size * PT_TO_MM
    }

    pub fn line_height_mm(&self, font_size: f32) -> f32 {
        self.ascender_mm(font_size) + self.descender_mm(font_size)
    }
}

pub fn get_helvetica_measurer() -> &'static BuiltinFontMeasurer {
    use std::sync::OnceLock;
    static MEASURER: OnceLock<BuiltinFontMeasurer> = OnceLock::new();
    MEASURER.get_or_init(|| BuiltinFontMeasurer::new(BuiltinFont::Helvetica))
}

pub fn get_helvetica_bold_measurer() -> &'static BuiltinFontMeasurer {
    use std::sync::OnceLock;
    static MEASURER: OnceLock<BuiltinFontMeasurer> = OnceLock::new();
    MEASURER.get_or_init(|| BuiltinFontMeasurer::new(BuiltinFont::HelveticaBold))
}

pub fn get_times_measurer() -> &'static BuiltinFontMeasurer {
    use std::sync::OnceLock;
    static MEASURER: OnceLock<BuiltinFontMeasurer> = OnceLock::new();
    MEASURER.get_or_init(|| BuiltinFontMeasurer::new(BuiltinFont::TimesRoman))
}

pub fn get_times_bold_measurer() -> &'static BuiltinFontMeasurer {
    use std::sync::OnceLock;
    static MEASURER: OnceLock<BuiltinFontMeasurer> = OnceLock::new();
    MEASURER.get_or_init(|| BuiltinFontMeasurer::new(BuiltinFont::TimesBold))
}

/// Measurer for any builtin font this crate draws with
pub fn get_builtin_measurer(font: BuiltinFont) -> &'static BuiltinFontMeasurer {
    match font {
        BuiltinFont::TimesRoman => get_times_measurer(),
        BuiltinFont::TimesBold => get_times_bold_measurer(),
        BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique => {
            get_helvetica_bold_measurer()
        }
        _ => get_helvetica_measurer(),
    }
}

// Adobe AFM character widths for the Standard 14 fonts, ASCII printable
// range, in 1000 units per em.

#[rustfmt::skip]
static TIMES_ROMAN_WIDTHS: [u16; 128] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541, 0,
];

#[rustfmt::skip]
static TIMES_BOLD_WIDTHS: [u16; 128] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520, 0,
];

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 128] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 128] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 0,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longer_text_measures_wider() {
        let measurer = get_helvetica_measurer();
        let short = measurer.measure_width_mm("Martelo", 9.0);
        let long = measurer.measure_width_mm("Martelo de unha 27mm", 9.0);
        assert!(long > short);
        assert!(short > 0.0);
    }

    #[test]
    fn width_scales_linearly_with_font_size() {
        let measurer = get_helvetica_bold_measurer();
        let base = measurer.measure_width_mm("Preço", 8.0);
        let double = measurer.measure_width_mm("Preço", 16.0);
        assert!((double - base * 2.0).abs() < 0.01);
    }

    #[test]
    fn line_height_combines_ascender_and_descender() {
        let measurer = get_times_measurer();
        let lh = measurer.line_height_mm(10.0);
        assert!((lh - (measurer.ascender_mm(10.0) + measurer.descender_mm(10.0))).abs() < 1e-6);
    }
}
