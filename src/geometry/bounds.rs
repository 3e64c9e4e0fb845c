//! Bounding box computation over flattened glyph geometry

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::data::{Layer, LayerSource};
use crate::geometry::flatten::flatten_layer;

/// Nominal vertical extent assigned to glyphs with no outline geometry
/// (e.g. space), so framing math never divides by zero
pub const EMPTY_GLYPH_HEIGHT: f64 = 500.0;

/// Axis-aligned bounding box in font design units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Smallest box containing a single point
    pub fn at_point(x: f64, y: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Fallback box for geometry-less layers, derived from advance width
    pub fn empty_fallback(width: f64) -> Self {
        Self {
            min_x: 0.0,
            min_y: -EMPTY_GLYPH_HEIGHT / 2.0,
            max_x: width,
            max_y: EMPTY_GLYPH_HEIGHT / 2.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Expand to include a point
    pub fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Translate by an offset, used when framing glyphs in a shaped run
    pub fn offset(&self, dx: f64, dy: f64) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }

    /// Smallest box containing finite points; `None` when no finite point
    /// contributed
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<BoundingBox> {
        let mut bbox: Option<BoundingBox> = None;
        for (x, y) in points {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            match bbox.as_mut() {
                Some(b) => b.include(x, y),
                None => bbox = Some(BoundingBox::at_point(x, y)),
            }
        }
        bbox
    }
}

/// Compute the tightest box over a layer's visible geometry
///
/// Components are flattened first; anchors are included when
/// `include_anchors` is set. Layers with no geometry (and layers whose
/// component graph turns out to be cyclic) get the advance-width fallback
/// box so downstream framing always has something finite to work with.
pub fn layer_bounds(
    layer: &Layer,
    source: &dyn LayerSource,
    location: &str,
    include_anchors: bool,
) -> BoundingBox {
    let flattened = match flatten_layer(layer, source, location) {
        Ok(paths) => paths,
        Err(err) => {
            warn!("bounds fell back to advance width: {err}");
            Vec::new()
        }
    };

    let path_points = flattened
        .iter()
        .flat_map(|path| path.nodes.iter().map(|node| (node.x, node.y)));
    let anchor_points = layer
        .anchors
        .iter()
        .filter(|_| include_anchors)
        .map(|anchor| (anchor.x, anchor.y));

    BoundingBox::from_points(path_points.chain(anchor_points))
        .unwrap_or_else(|| BoundingBox::empty_fallback(layer.width))
}
