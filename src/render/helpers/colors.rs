use printpdf::Rgb;

/// Parse a `#RRGGBB` (or `RRGGBB`) hex color.
pub fn parse_hex(spec: &str) -> Option<Rgb> {
    let hex = spec.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

/// Parse a hex color, falling back to black for anything malformed.
/// Color specs are validated once at config load; this keeps draw sites total.
pub fn parse_hex_or_black(spec: &str) -> Rgb {
    parse_hex(spec).unwrap_or(BLACK)
}

/// Approximate element opacity by blending toward paper white. The printpdf
/// 0.8 op set carries no fill-alpha graphics state, and catalog pages are
/// printed on white anyway.
pub fn with_opacity(color: Rgb, opacity: f32) -> Rgb {
    let a = opacity.clamp(0.0, 1.0);
    Rgb::new(
        color.r * a + (1.0 - a),
        color.g * a + (1.0 - a),
        color.b * a + (1.0 - a),
        None,
    )
}

pub const BLACK: Rgb = Rgb {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    icc_profile: None,
};

pub const WHITE: Rgb = Rgb {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    icc_profile: None,
};

/// Gray for the "no photo" placeholder disc
pub const GRAY: Rgb = Rgb {
    r: 0.5,
    g: 0.5,
    b: 0.5,
    icc_profile: None,
};

/// Light gray for placeholder disc fill
pub const LIGHT_GRAY: Rgb = Rgb {
    r: 0.85,
    g: 0.85,
    b: 0.85,
    icc_profile: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        let c = parse_hex("#FF8000").unwrap();
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 0.0).abs() < 1e-6);
        assert!(parse_hex("00FF00").is_some());
    }

    #[test]
    fn rejects_malformed_specs() {
        assert!(parse_hex("#12345").is_none());
        assert!(parse_hex("red").is_none());
        assert!(parse_hex("").is_none());
    }

    #[test]
    fn opacity_blends_toward_white() {
        let half = with_opacity(BLACK, 0.5);
        assert!((half.r - 0.5).abs() < 1e-6);
        let opaque = with_opacity(BLACK, 1.0);
        assert!((opaque.r - 0.0).abs() < 1e-6);
    }
}
