//! Font-space to screen-space mapping
//!
//! The viewport owns a uniform scale and a pan offset. Font space has Y
//! increasing upward, screen space has Y increasing downward, so the
//! mapping carries a vertical flip:
//!
//! ```text
//! screen = (fx * scale + pan_x, -fy * scale + pan_y)
//! ```

use kurbo::Point;
use tracing::warn;

use crate::core::errors::{GeometryError, GeometryResult};

/// Scale limits and defaults for a canvas viewport
#[derive(Clone, Copy, Debug)]
pub struct ViewportConfig {
    /// Smallest allowed scale (most zoomed out)
    pub min_scale: f64,
    /// Largest allowed scale (most zoomed in)
    pub max_scale: f64,
    pub initial_scale: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.01,
            max_scale: 100.0,
            initial_scale: 0.5,
        }
    }
}

/// Pan/zoom state for one canvas
///
/// Created once per canvas and mutated continuously by pointer handlers
/// and animations. `scale` is invariantly positive and finite; invalid
/// requests are rejected before they can be stored.
#[derive(Clone, Debug)]
pub struct Viewport {
    scale: f64,
    pan_x: f64,
    pan_y: f64,
    config: ViewportConfig,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl Viewport {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            scale: config.initial_scale.clamp(config.min_scale, config.max_scale),
            pan_x: 0.0,
            pan_y: 0.0,
            config,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pan_offset(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Map a font-space point to screen pixels
    pub fn to_screen(&self, font_point: Point) -> Point {
        Point::new(
            font_point.x * self.scale + self.pan_x,
            -font_point.y * self.scale + self.pan_y,
        )
    }

    /// Map a screen-pixel point back to font space
    pub fn to_font(&self, screen_point: Point) -> Point {
        Point::new(
            (screen_point.x - self.pan_x) / self.scale,
            -(screen_point.y - self.pan_y) / self.scale,
        )
    }

    /// Set the scale directly; clamped into the configured range
    ///
    /// Zero, negative or non-finite scales are rejected and the previous
    /// scale stays in place.
    pub fn set_scale(&mut self, scale: f64) -> GeometryResult<()> {
        if !scale.is_finite() || scale <= 0.0 {
            warn!("rejected invalid viewport scale {scale}");
            return Err(GeometryError::InvalidScale { requested: scale });
        }
        self.scale = scale.clamp(self.config.min_scale, self.config.max_scale);
        Ok(())
    }

    pub fn set_pan(&mut self, pan_x: f64, pan_y: f64) {
        self.pan_x = pan_x;
        self.pan_y = pan_y;
    }

    /// Additive pan in screen pixels
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Zoom by a factor, keeping the font point under `center` (screen
    /// pixels) stationary, the "zoom toward cursor" behavior
    pub fn zoom(&mut self, factor: f64, center: Point) {
        if !factor.is_finite() || factor <= 0.0 {
            warn!("ignored invalid zoom factor {factor}");
            return;
        }
        let anchor = self.to_font(center);
        let new_scale = (self.scale * factor).clamp(self.config.min_scale, self.config.max_scale);
        self.scale = new_scale;
        // Re-derive pan so that to_screen(anchor) == center again
        self.pan_x = center.x - anchor.x * self.scale;
        self.pan_y = center.y + anchor.y * self.scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn round_trips_between_spaces() {
        let mut viewport = Viewport::default();
        viewport.set_scale(2.0).unwrap();
        viewport.set_pan(300.0, 400.0);
        let font = Point::new(120.0, 250.0);
        assert!(close(viewport.to_font(viewport.to_screen(font)), font));
    }

    #[test]
    fn y_axis_flips() {
        let mut viewport = Viewport::default();
        viewport.set_scale(1.0).unwrap();
        viewport.set_pan(0.0, 0.0);
        let screen = viewport.to_screen(Point::new(0.0, 100.0));
        assert_eq!(screen.y, -100.0);
    }

    #[test]
    fn zoom_keeps_cursor_point_fixed() {
        let mut viewport = Viewport::default();
        viewport.set_scale(1.0).unwrap();
        viewport.set_pan(57.0, -13.0);
        let cursor = Point::new(421.0, 333.0);
        let before = viewport.to_font(cursor);
        for factor in [2.0, 0.5, 1.25, 3.7] {
            viewport.zoom(factor, cursor);
            assert!(close(viewport.to_font(cursor), before));
        }
    }

    #[test]
    fn invalid_scale_is_never_stored() {
        let mut viewport = Viewport::default();
        let original = viewport.scale();
        assert!(viewport.set_scale(0.0).is_err());
        assert!(viewport.set_scale(-3.0).is_err());
        assert!(viewport.set_scale(f64::NAN).is_err());
        assert_eq!(viewport.scale(), original);
    }

    #[test]
    fn invalid_zoom_factor_is_a_noop() {
        let mut viewport = Viewport::default();
        let scale = viewport.scale();
        let pan = viewport.pan_offset();
        viewport.zoom(0.0, Point::new(10.0, 10.0));
        viewport.zoom(f64::INFINITY, Point::new(10.0, 10.0));
        assert_eq!(viewport.scale(), scale);
        assert_eq!(viewport.pan_offset(), pan);
    }

    #[test]
    fn zoom_clamps_to_configured_range() {
        let mut viewport = Viewport::new(ViewportConfig {
            min_scale: 0.5,
            max_scale: 4.0,
            initial_scale: 1.0,
        });
        viewport.zoom(1000.0, Point::ZERO);
        assert_eq!(viewport.scale(), 4.0);
        viewport.zoom(1e-6, Point::ZERO);
        assert_eq!(viewport.scale(), 0.5);
    }
}
