//! Page operation builder for printpdf 0.8.
//!
//! Collects drawing operations into a `Vec<Op>`; one builder per page. All
//! geometry comes in as `Mm` in PDF coordinates (origin bottom-left).

use printpdf::{
    BuiltinFont, Color, LinePoint, Mm, Op, PaintMode, Point, Polygon, PolygonRing, Pt, TextItem,
    TextMatrix, WindingOrder, XObjectId, XObjectTransform,
};

/// Bezier circle constant: 4 * (sqrt(2) - 1) / 3
const BEZIER_K: f32 = 0.552_284_8;

#[derive(Default)]
pub struct LayerBuilder {
    ops: Vec<Op>,
}

impl LayerBuilder {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    pub fn into_ops(self) -> Vec<Op> {
        self.ops
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.ops.push(Op::SetFillColor { col: color });
    }

    pub fn set_outline_color(&mut self, color: Color) {
        self.ops.push(Op::SetOutlineColor { col: color });
    }

    pub fn set_outline_thickness(&mut self, thickness_pt: f32) {
        self.ops.push(Op::SetOutlineThickness {
            pt: Pt(thickness_pt),
        });
    }

    /// Draw text at a baseline position using a builtin font
    pub fn use_text<S: Into<String>>(
        &mut self,
        text: S,
        font_size: f32,
        x: Mm,
        y: Mm,
        font: BuiltinFont,
    ) {
        let text_str = text.into();
        if text_str.is_empty() {
            return;
        }

        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor {
            pos: Point {
                x: x.into(),
                y: y.into(),
            },
        });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(font_size),
            font,
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text_str)],
            font,
        });
        self.ops.push(Op::EndTextSection);
    }

    /// Draw text rotated counter-clockwise around its baseline start point
    pub fn use_text_rotated<S: Into<String>>(
        &mut self,
        text: S,
        font_size: f32,
        x: Mm,
        y: Mm,
        rotate_degrees: f32,
        font: BuiltinFont,
    ) {
        if rotate_degrees.abs() < 0.001 {
            self.use_text(text, font_size, x, y, font);
            return;
        }
        let text_str = text.into();
        if text_str.is_empty() {
            return;
        }

        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::TranslateRotate(x.into(), y.into(), rotate_degrees),
        });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(font_size),
            font,
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text_str)],
            font,
        });
        self.ops.push(Op::EndTextSection);
    }

    /// Filled or stroked rectangle from lower-left to upper-right corner
    pub fn add_rect(&mut self, x1: Mm, y1: Mm, x2: Mm, y2: Mm, mode: PaintMode) {
        let corners = [(x1, y1), (x2, y1), (x2, y2), (x1, y2)];
        let points = corners
            .iter()
            .map(|&(x, y)| LinePoint {
                p: Point {
                    x: x.into(),
                    y: y.into(),
                },
                bezier: false,
            })
            .collect();

        self.push_polygon(points, mode);
    }

    /// Rectangle with rounded corners. Radius is clamped to half the
    /// shorter side; a zero radius falls back to a plain rectangle.
    pub fn add_rounded_rect(
        &mut self,
        x: Mm,
        y: Mm,
        width: Mm,
        height: Mm,
        radius: Mm,
        mode: PaintMode,
    ) {
        let r = radius.0.min(width.0 / 2.0).min(height.0 / 2.0);
        if r <= 0.0 {
            self.add_rect(x, y, Mm(x.0 + width.0), Mm(y.0 + height.0), mode);
            return;
        }

        let (x1, y1) = (x.0, y.0);
        let (x2, y2) = (x.0 + width.0, y.0 + height.0);
        let k = BEZIER_K * r;

        // Clockwise from the bottom edge start; each corner is one cubic
        let segments: [((f32, f32), [(f32, f32); 3]); 4] = [
            // bottom edge then bottom-right corner
            ((x1 + r, y1), [(x2 - r, y1), (x2 - r + k, y1), (x2, y1 + r - k)]),
            // right edge then top-right corner
            ((x2, y1 + r), [(x2, y2 - r), (x2, y2 - r + k), (x2 - r + k, y2)]),
            // top edge then top-left corner
            ((x2 - r, y2), [(x1 + r, y2), (x1 + r - k, y2), (x1, y2 - r + k)]),
            // left edge then bottom-left corner
            ((x1, y2 - r), [(x1, y1 + r), (x1, y1 + r - k), (x1 + r - k, y1)]),
        ];

        let mut points = Vec::with_capacity(17);
        for (start, rest) in segments {
            points.push(line_point(start.0, start.1, false));
            points.push(line_point(rest[0].0, rest[0].1, false));
            points.push(line_point(rest[1].0, rest[1].1, true));
            points.push(line_point(rest[2].0, rest[2].1, true));
        }
        // Close onto the first point
        points.push(line_point(x1 + r, y1, true));

        self.push_polygon(points, mode);
    }

    /// Circle approximated by four cubic Beziers
    pub fn add_circle(&mut self, center_x: Mm, center_y: Mm, radius: Mm, mode: PaintMode) {
        let (cx, cy, r) = (center_x.0, center_y.0, radius.0);
        let k = BEZIER_K * r;

        // Anchor and control points, starting at the rightmost point
        let pts: [(f32, f32, bool); 13] = [
            (cx + r, cy, false),
            (cx + r, cy + k, true),
            (cx + k, cy + r, true),
            (cx, cy + r, true),
            (cx - k, cy + r, true),
            (cx - r, cy + k, true),
            (cx - r, cy, true),
            (cx - r, cy - k, true),
            (cx - k, cy - r, true),
            (cx, cy - r, true),
            (cx + k, cy - r, true),
            (cx + r, cy - k, true),
            (cx + r, cy, true),
        ];

        let points = pts
            .iter()
            .map(|&(px, py, bezier)| line_point(px, py, bezier))
            .collect();
        self.push_polygon(points, mode);
    }

    /// Begin a rectangular clipping region; pair with `end_clip`
    pub fn begin_clip_rect(&mut self, x: Mm, y: Mm, width: Mm, height: Mm) {
        self.save_graphics_state();
        self.add_rect(x, y, Mm(x.0 + width.0), Mm(y.0 + height.0), PaintMode::Clip);
    }

    /// Begin a circular clipping region; pair with `end_clip`
    pub fn begin_clip_circle(&mut self, center_x: Mm, center_y: Mm, radius: Mm) {
        self.save_graphics_state();
        self.add_circle(center_x, center_y, radius, PaintMode::Clip);
    }

    pub fn end_clip(&mut self) {
        self.restore_graphics_state();
    }

    /// Place a registered XObject (raster image) with the given transform
    pub fn use_xobject(&mut self, id: XObjectId, transform: XObjectTransform) {
        self.ops.push(Op::UseXobject { id, transform });
    }

    pub fn save_graphics_state(&mut self) {
        self.ops.push(Op::SaveGraphicsState);
    }

    pub fn restore_graphics_state(&mut self) {
        self.ops.push(Op::RestoreGraphicsState);
    }

    fn push_polygon(&mut self, points: Vec<LinePoint>, mode: PaintMode) {
        let polygon = Polygon {
            rings: vec![PolygonRing { points }],
            mode,
            winding_order: WindingOrder::NonZero,
        };
        self.ops.push(Op::DrawPolygon { polygon });
    }
}

fn line_point(x: f32, y: f32, bezier: bool) -> LinePoint {
    LinePoint {
        p: Point {
            x: Mm(x).into(),
            y: Mm(y).into(),
        },
        bezier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_emits_no_ops() {
        let mut layer = LayerBuilder::new();
        layer.use_text("", 10.0, Mm(0.0), Mm(0.0), BuiltinFont::Helvetica);
        assert!(layer.ops().is_empty());
    }

    #[test]
    fn clip_pairs_save_and_restore() {
        let mut layer = LayerBuilder::new();
        layer.begin_clip_circle(Mm(10.0), Mm(10.0), Mm(5.0));
        layer.end_clip();

        let ops = layer.ops();
        assert!(matches!(ops.first(), Some(Op::SaveGraphicsState)));
        assert!(matches!(ops.last(), Some(Op::RestoreGraphicsState)));
    }

    #[test]
    fn rect_is_a_four_point_polygon() {
        let mut layer = LayerBuilder::new();
        layer.add_rect(Mm(0.0), Mm(0.0), Mm(10.0), Mm(5.0), PaintMode::Stroke);
        match layer.ops().first() {
            Some(Op::DrawPolygon { polygon }) => {
                assert_eq!(polygon.rings[0].points.len(), 4);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }
}
