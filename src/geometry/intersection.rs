//! Line-vs-outline intersection queries
//!
//! Computes every intersection of a query line segment against a layer's
//! curve geometry, tagged with the parameter `t` along the query line
//! (0 at its start, 1 at its end) and sorted by it. Used by measurement
//! tooling and pointer interaction.

use kurbo::{Line, ParamCurve, Point};
use tracing::{debug, warn};

use crate::data::{Layer, LayerSource, Shape};
use crate::geometry::flatten::flatten_layer;
use crate::geometry::segment::{segmentize, Segment, SegmentKind};

/// Near-parallel determinant cutoff for the analytic line-line solve
const PARALLEL_EPSILON: f64 = 1e-10;

/// One intersection of the query line with outline geometry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub point: Point,
    /// Parameter along the query line, 0 at `p0`, 1 at `p1`
    pub t: f64,
}

/// Analytic line-segment vs line-segment intersection
///
/// Solves the 2x2 system for the parameter `t` along the query line and
/// `u` along the path segment; both must land in [0, 1]. Near-parallel
/// pairs are skipped rather than reported.
fn line_line_intersection(query: &Line, segment: &Line) -> Option<Intersection> {
    let (p1, p2) = (query.p0, query.p1);
    let (p3, p4) = (segment.p0, segment.p1);

    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / denom;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Intersection {
            point: Point::new(p1.x + t * (p2.x - p1.x), p1.y + t * (p2.y - p1.y)),
            t,
        })
    } else {
        None
    }
}

/// Recover the query-line parameter of a point known to lie on the line
///
/// Uses whichever axis has the greater extent on the query line, so a
/// near-vertical line never divides by its vanishing x extent.
fn line_parameter_of(point: Point, line: &Line) -> Option<f64> {
    let dx = line.p1.x - line.p0.x;
    let dy = line.p1.y - line.p0.y;
    let t = if dx.abs() > dy.abs() {
        if dx.abs() < PARALLEL_EPSILON {
            return None;
        }
        (point.x - line.p0.x) / dx
    } else {
        if dy.abs() < PARALLEL_EPSILON {
            return None;
        }
        (point.y - line.p0.y) / dy
    };
    (0.0..=1.0).contains(&t).then_some(t)
}

fn segment_is_sound(segment: &Segment) -> bool {
    segment.points.len() >= 2
        && segment
            .points
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
}

/// Intersections of curve (quad/cubic) geometry with the query line
///
/// kurbo reports crossings of the infinite line through the query segment;
/// each curve-side parameter is evaluated back to a point and the
/// line-side `t` recovered and range-checked.
fn curve_line_intersections(
    seg: kurbo::PathSeg,
    query: &Line,
    out: &mut Vec<Intersection>,
) {
    for hit in seg.intersect_line(*query) {
        let point = seg.eval(hit.segment_t);
        if let Some(t) = line_parameter_of(point, query) {
            out.push(Intersection { point, t });
        }
    }
}

/// Intersect a query line with a list of drawable segments
///
/// A malformed segment is logged and skipped; it never aborts the query.
/// Results are sorted ascending by `t`.
pub fn intersect_segments(segments: &[Segment], query: Line) -> Vec<Intersection> {
    let mut hits = Vec::new();

    for segment in segments {
        if !segment_is_sound(segment) {
            warn!("skipping malformed segment in intersection query");
            continue;
        }
        match segment.kind {
            SegmentKind::Line => {
                let path_seg = Line::new(segment.points[0], segment.points[1]);
                hits.extend(line_line_intersection(&query, &path_seg));
            }
            SegmentKind::Quadratic | SegmentKind::Cubic => {
                let Some(path_seg) = segment.to_path_seg() else {
                    warn!("skipping segment that failed curve construction");
                    continue;
                };
                curve_line_intersections(path_seg, &query, &mut hits);
            }
        }
    }

    hits.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal));
    hits
}

/// Intersect a query line with a whole layer
///
/// With `include_components` the layer is flattened first; when flattening
/// fails (cyclic reference chain) the query degrades to the layer's direct
/// paths so a partial result still comes back.
pub fn intersect_layer(
    layer: &Layer,
    query: Line,
    source: &dyn LayerSource,
    location: &str,
    include_components: bool,
) -> Vec<Intersection> {
    let mut hits = Vec::new();

    if include_components {
        match flatten_layer(layer, source, location) {
            Ok(paths) => {
                for path in &paths {
                    hits.extend(intersect_segments(
                        &segmentize(&path.as_path_data()),
                        query,
                    ));
                }
                hits.sort_by(|a, b| {
                    a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal)
                });
                return hits;
            }
            Err(err) => {
                warn!("intersection query degraded to direct paths: {err}");
            }
        }
    }

    let mut direct = 0usize;
    for shape in &layer.shapes {
        if let Shape::Path(path) = shape {
            direct += 1;
            hits.extend(intersect_segments(&segmentize(path), query));
        }
    }
    debug!("intersected {direct} direct paths, {} hits", hits.len());

    hits.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal));
    hits
}
