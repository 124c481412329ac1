//! Reference-canvas to runtime-card coordinate mapping.

use crate::model::ElementSpec;

/// An element's absolute rectangle on the page, top-down y, in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Map an element's reference-canvas rectangle onto the runtime card.
///
/// Scale factors are computed independently per axis: when the card's aspect
/// ratio differs from the reference canvas the element stretches with it,
/// which is expected.
pub fn map_element(
    elem: &ElementSpec,
    target_x: f32,
    target_y: f32,
    target_w: f32,
    target_h: f32,
    ref_w: f32,
    ref_h: f32,
) -> MappedRect {
    let scale_x = target_w / ref_w;
    let scale_y = target_h / ref_h;
    MappedRect {
        x: target_x + elem.ref_x * scale_x,
        y: target_y + elem.ref_y * scale_y,
        w: elem.ref_w * scale_x,
        h: elem.ref_h * scale_y,
    }
}
