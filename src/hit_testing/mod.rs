//! Pointer hit testing against rendered outlines
//!
//! A point hits a shape if it is inside the filled area or within a
//! tolerance of the stroked outline. The tolerance is specified in screen
//! pixels and divided by the effective scale (viewport zoom times any
//! nested component scale factors), so the apparent grab radius stays
//! constant no matter how far in the user has zoomed or how deeply the
//! shape is nested.

use kurbo::{BezPath, ParamCurveNearest, Point, Shape as KurboShape};
use tracing::debug;

use crate::data::{AffineTransform, Layer, LayerSource};
use crate::geometry::flatten::flatten_layer;
use crate::geometry::segment::path_to_bezpath;

/// Default grab radius in screen pixels
pub const DEFAULT_HIT_TOLERANCE_PX: f64 = 6.0;

/// Accuracy for nearest-point queries on curve segments, in design units
const NEAREST_ACCURACY: f64 = 1e-6;

/// Product of the viewport scale and each transform level's largest
/// column-vector magnitude
pub fn effective_scale(viewport_scale: f64, component_transforms: &[AffineTransform]) -> f64 {
    component_transforms
        .iter()
        .fold(viewport_scale, |acc, transform| {
            acc * transform.max_scale_factor()
        })
}

/// Minimum distance from a point to a path's outline
fn outline_distance(path: &BezPath, point: Point) -> f64 {
    path.segments()
        .map(|seg| seg.nearest(point, NEAREST_ACCURACY).distance_sq)
        .fold(f64::INFINITY, f64::min)
        .sqrt()
}

/// Pointer containment queries with a fixed screen-pixel tolerance
#[derive(Clone, Copy, Debug)]
pub struct HitTester {
    pub tolerance_px: f64,
}

impl Default for HitTester {
    fn default() -> Self {
        Self {
            tolerance_px: DEFAULT_HIT_TOLERANCE_PX,
        }
    }
}

impl HitTester {
    pub fn new(tolerance_px: f64) -> Self {
        Self { tolerance_px }
    }

    /// Tolerance rescaled into the coordinate space the containment test
    /// runs in
    pub fn effective_tolerance(
        &self,
        viewport_scale: f64,
        component_transforms: &[AffineTransform],
    ) -> f64 {
        let scale = effective_scale(viewport_scale, component_transforms);
        self.tolerance_px / scale.max(f64::MIN_POSITIVE)
    }

    /// Fill-or-stroke containment against one path, tolerance already in
    /// the path's coordinate space
    pub fn hit_path(path: &BezPath, point: Point, tolerance: f64) -> bool {
        if path.elements().is_empty() {
            return false;
        }
        if path.contains(point) {
            return true;
        }
        outline_distance(path, point) <= tolerance
    }

    /// Index of the first path the point hits, in iteration order
    pub fn first_hit(
        &self,
        paths: &[BezPath],
        point: Point,
        viewport_scale: f64,
        component_transforms: &[AffineTransform],
    ) -> Option<usize> {
        let tolerance = self.effective_tolerance(viewport_scale, component_transforms);
        let hit = paths
            .iter()
            .position(|path| Self::hit_path(path, point, tolerance));
        debug!(?hit, tolerance, "hit test over {} paths", paths.len());
        hit
    }

    /// Hit test a whole layer, flattening components first
    ///
    /// Returns the index of the first flattened path that contains the
    /// font-space point. A cyclic component graph yields no geometry and
    /// therefore no hit.
    pub fn hit_test_layer(
        &self,
        layer: &Layer,
        source: &dyn LayerSource,
        location: &str,
        font_point: Point,
        viewport_scale: f64,
    ) -> Option<usize> {
        let flattened = flatten_layer(layer, source, location).ok()?;
        let paths: Vec<BezPath> = flattened
            .iter()
            .map(|flat| path_to_bezpath(&flat.as_path_data()))
            .collect();
        self.first_hit(&paths, font_point, viewport_scale, &[])
    }
}
