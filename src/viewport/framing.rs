//! Auto-framing: fit-to-content and bring-glyph-into-view
//!
//! These helpers compute target `(scale, pan)` pairs from bounding boxes.
//! Callers either apply the targets immediately ([`zoom_to_fit`]) or feed
//! them to the pan/zoom animations for a smooth transition.

use kurbo::Rect;

use crate::data::AffineTransform;
use crate::geometry::bounds::BoundingBox;
use crate::viewport::transform::{Viewport, ViewportConfig};

/// Default margin kept around framed content, in screen pixels
pub const DEFAULT_FRAME_MARGIN: f64 = 40.0;

/// A computed framing target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTarget {
    pub scale: f64,
    pub pan: (f64, f64),
}

/// Map a box through an affine transform by transforming its corners
///
/// Needed when the framed glyph is being edited inside a nested component:
/// the accumulated component transform repositions the box before fitting.
fn transform_bounds(bounds: &BoundingBox, transform: &AffineTransform) -> BoundingBox {
    let corners = [
        transform.apply(bounds.min_x, bounds.min_y),
        transform.apply(bounds.max_x, bounds.min_y),
        transform.apply(bounds.max_x, bounds.max_y),
        transform.apply(bounds.min_x, bounds.max_y),
    ];
    BoundingBox::from_points(corners).unwrap_or(*bounds)
}

fn pan_for_center(center: (f64, f64), scale: f64, rect: Rect) -> (f64, f64) {
    let rect_center = rect.center();
    (
        rect_center.x - center.0 * scale,
        rect_center.y + center.1 * scale,
    )
}

/// Scale and pan that fit `bounds` inside `rect` minus `margin`, centered
pub fn fit_target(
    bounds: &BoundingBox,
    rect: Rect,
    margin: f64,
    config: &ViewportConfig,
) -> FrameTarget {
    let avail_w = (rect.width() - 2.0 * margin).max(1.0);
    let avail_h = (rect.height() - 2.0 * margin).max(1.0);
    // Degenerate boxes (zero-width space glyphs) get a unit extent so the
    // fit scale stays finite
    let box_w = bounds.width().max(1.0);
    let box_h = bounds.height().max(1.0);

    let scale = (avail_w / box_w)
        .min(avail_h / box_h)
        .clamp(config.min_scale, config.max_scale);

    FrameTarget {
        scale,
        pan: pan_for_center(bounds.center(), scale, rect),
    }
}

/// Fit the supplied content box into the viewport rect immediately
pub fn zoom_to_fit(viewport: &mut Viewport, bounds: &BoundingBox, rect: Rect, margin: f64) {
    let target = fit_target(bounds, rect, margin, viewport.config());
    // fit_target only produces positive clamped scales
    let _ = viewport.set_scale(target.scale);
    viewport.set_pan(target.pan.0, target.pan.1);
}

/// Target that brings one glyph of a shaped run into view
///
/// `glyph_offset` is the glyph's position within the run (pen position in
/// design units). When editing inside a nested component,
/// `component_transform` carries the accumulated transform and is applied
/// to the box corners before framing.
pub fn frame_glyph_target(
    glyph_bounds: &BoundingBox,
    glyph_offset: (f64, f64),
    rect: Rect,
    margin: f64,
    component_transform: Option<&AffineTransform>,
    config: &ViewportConfig,
) -> FrameTarget {
    let placed = match component_transform {
        Some(transform) => transform_bounds(glyph_bounds, transform),
        None => *glyph_bounds,
    }
    .offset(glyph_offset.0, glyph_offset.1);
    fit_target(&placed, rect, margin, config)
}

/// Pan target that centers a glyph at the current scale
///
/// Same placement logic as [`frame_glyph_target`] but the scale is left
/// untouched; feed the result to a pan animation.
pub fn pan_to_glyph_target(
    viewport: &Viewport,
    glyph_bounds: &BoundingBox,
    glyph_offset: (f64, f64),
    rect: Rect,
    component_transform: Option<&AffineTransform>,
) -> (f64, f64) {
    let placed = match component_transform {
        Some(transform) => transform_bounds(glyph_bounds, transform),
        None => *glyph_bounds,
    }
    .offset(glyph_offset.0, glyph_offset.1);
    pan_for_center(placed.center(), viewport.scale(), rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn view_rect() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn fit_centers_the_box() {
        let bounds = BoundingBox {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 1000.0,
            max_y: 700.0,
        };
        let mut viewport = Viewport::default();
        zoom_to_fit(&mut viewport, &bounds, view_rect(), 40.0);

        // Box center maps to rect center
        let screen_center = viewport.to_screen(Point::new(500.0, 350.0));
        assert!((screen_center.x - 400.0).abs() < 1e-9);
        assert!((screen_center.y - 300.0).abs() < 1e-9);

        // Box fits inside the margins on the limiting axis
        let left = viewport.to_screen(Point::new(0.0, 350.0));
        assert!(left.x >= 40.0 - 1e-9);
    }

    #[test]
    fn fit_scale_respects_both_axes() {
        // Tall box: the vertical axis limits the scale
        let bounds = BoundingBox {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 100.0,
            max_y: 2000.0,
        };
        let target = fit_target(&bounds, view_rect(), 0.0, &ViewportConfig::default());
        assert!((target.scale - 600.0 / 2000.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_box_stays_finite() {
        let bounds = BoundingBox::at_point(50.0, 50.0);
        let target = fit_target(&bounds, view_rect(), 40.0, &ViewportConfig::default());
        assert!(target.scale.is_finite() && target.scale > 0.0);
        assert!(target.pan.0.is_finite() && target.pan.1.is_finite());
    }

    #[test]
    fn frame_glyph_applies_run_offset() {
        let bounds = BoundingBox {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 500.0,
            max_y: 700.0,
        };
        let config = ViewportConfig::default();
        let at_origin = frame_glyph_target(&bounds, (0.0, 0.0), view_rect(), 40.0, None, &config);
        let shifted = frame_glyph_target(&bounds, (1200.0, 0.0), view_rect(), 40.0, None, &config);
        assert_eq!(at_origin.scale, shifted.scale);
        assert!((at_origin.pan.0 - shifted.pan.0 - 1200.0 * shifted.scale).abs() < 1e-9);
    }

    #[test]
    fn component_transform_moves_the_frame() {
        let bounds = BoundingBox {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 100.0,
            max_y: 100.0,
        };
        let doubled = AffineTransform {
            x_scale: 2.0,
            y_scale: 2.0,
            ..AffineTransform::IDENTITY
        };
        let config = ViewportConfig::default();
        let plain = frame_glyph_target(&bounds, (0.0, 0.0), view_rect(), 0.0, None, &config);
        let nested =
            frame_glyph_target(&bounds, (0.0, 0.0), view_rect(), 0.0, Some(&doubled), &config);
        // Twice the box needs half the scale
        assert!((plain.scale / nested.scale - 2.0).abs() < 1e-9);
    }

    #[test]
    fn pan_to_glyph_keeps_scale() {
        let bounds = BoundingBox {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 400.0,
            max_y: 400.0,
        };
        let mut viewport = Viewport::default();
        viewport.set_scale(2.0).unwrap();
        let pan = pan_to_glyph_target(&viewport, &bounds, (1000.0, 0.0), view_rect(), None);
        viewport.set_pan(pan.0, pan.1);
        assert_eq!(viewport.scale(), 2.0);
        let center = viewport.to_screen(Point::new(1200.0, 200.0));
        assert!((center.x - 400.0).abs() < 1e-9 && (center.y - 300.0).abs() < 1e-9);
    }
}
