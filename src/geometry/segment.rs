//! Path segmentation
//!
//! Converts a path's node sequence into drawable curve segments. A segment
//! is the run `[oncurve, offcurve*, oncurve]` bounded by the next on-curve
//! node; the number of collected points decides whether it is a line,
//! quadratic or cubic. [`path_to_bezpath`] builds a renderer path straight
//! from the nodes and additionally expands quadratic spline runs.

use kurbo::{BezPath, Point};
use tracing::warn;

use crate::data::{Node, NodeType, PathData};

/// Curve segment classification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Line,
    Quadratic,
    Cubic,
}

/// A derived drawable segment: 2 points for a line, 3 for a quadratic,
/// 4 for a cubic. Never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub points: Vec<Point>,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// View as a kurbo path segment; `None` when the point count does not
    /// match the kind
    pub fn to_path_seg(&self) -> Option<kurbo::PathSeg> {
        match (self.kind, self.points.as_slice()) {
            (SegmentKind::Line, &[p0, p1]) => {
                Some(kurbo::PathSeg::Line(kurbo::Line::new(p0, p1)))
            }
            (SegmentKind::Quadratic, &[p0, p1, p2]) => {
                Some(kurbo::PathSeg::Quad(kurbo::QuadBez::new(p0, p1, p2)))
            }
            (SegmentKind::Cubic, &[p0, p1, p2, p3]) => {
                Some(kurbo::PathSeg::Cubic(kurbo::CubicBez::new(p0, p1, p2, p3)))
            }
            _ => None,
        }
    }
}

fn point_of(node: &Node) -> Point {
    Point::new(node.x, node.y)
}

/// Where the edge walk begins: the first on-curve node for closed paths
/// (wrap search), index 0 for open ones
fn walk_start(path: &PathData) -> Option<usize> {
    if path.closed {
        path.nodes.iter().position(Node::is_on_curve)
    } else {
        Some(0)
    }
}

fn classify(run: Vec<Point>) -> Option<Segment> {
    match run.len() {
        2 => Some(Segment {
            points: run,
            kind: SegmentKind::Line,
        }),
        3 => Some(Segment {
            points: run,
            kind: SegmentKind::Quadratic,
        }),
        4 => Some(Segment {
            points: run,
            kind: SegmentKind::Cubic,
        }),
        len => {
            warn!("skipping malformed segment run with {len} points");
            None
        }
    }
}

/// Segment a path's node sequence
///
/// Closed paths start at the first on-curve node (wrap search) and visit
/// all `n` edges including the closing one; open paths start at index 0 and
/// visit `n - 1` edges. A run with more than two consecutive off-curve
/// nodes is malformed and emits no segment; the walk continues at its
/// terminating on-curve node.
pub fn segmentize(path: &PathData) -> Vec<Segment> {
    let nodes = &path.nodes;
    let n = nodes.len();
    if n < 2 {
        return Vec::new();
    }

    // All-off-curve closed paths carry no drawable anchor
    let Some(start) = walk_start(path) else {
        return Vec::new();
    };
    let end_idx = if path.closed { start } else { n - 1 };
    // The visit count is the only loop bound; coming home to the terminal
    // index exits early, so termination never depends on the index
    // arithmetic being right
    let visit_limit = 2 * n;

    let mut segments = Vec::new();
    let mut run = vec![point_of(&nodes[start])];
    let mut idx = start;
    let mut visited = 1usize;

    loop {
        if visited >= visit_limit {
            warn!("segmentation exceeded visit limit ({visit_limit}); returning partial result");
            break;
        }
        visited += 1;
        idx = (idx + 1) % n;
        let node = &nodes[idx];
        run.push(point_of(node));
        if node.is_on_curve() {
            segments.extend(classify(std::mem::replace(&mut run, vec![point_of(node)])));
        }
        if idx == end_idx {
            break;
        }
    }

    segments
}

/// Build a renderer-native path from drawable segments
///
/// Consecutive segments are assumed to chain start-to-end, which is what
/// `segmentize` produces. Segments whose point count does not match their
/// kind are skipped.
pub fn segments_to_bezpath(segments: &[Segment], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    for segment in segments {
        let Some(seg) = segment.to_path_seg() else {
            warn!("skipping malformed segment in path assembly");
            continue;
        };
        if path.elements().is_empty() {
            let origin = match seg {
                kurbo::PathSeg::Line(line) => line.p0,
                kurbo::PathSeg::Quad(quad) => quad.p0,
                kurbo::PathSeg::Cubic(cubic) => cubic.p0,
            };
            path.move_to(origin);
        }
        match seg {
            kurbo::PathSeg::Line(line) => path.line_to(line.p1),
            kurbo::PathSeg::Quad(quad) => path.quad_to(quad.p1, quad.p2),
            kurbo::PathSeg::Cubic(cubic) => path.curve_to(cubic.p1, cubic.p2, cubic.p3),
        }
    }
    if closed && !path.elements().is_empty() {
        path.close_path();
    }
    path
}

/// Build a renderer-native path straight from node data
///
/// Unlike the strict segmentizer this expands quadratic spline runs: two or
/// more consecutive off-curves terminated by a qcurve node become a chain
/// of quadratics joined at the implied on-curve midpoints between
/// consecutive controls. Runs that fit neither form are bridged with a
/// straight line so the filled outline stays connected.
pub fn path_to_bezpath(path: &PathData) -> BezPath {
    let nodes = &path.nodes;
    let n = nodes.len();
    let mut bez = BezPath::new();
    if n < 2 {
        return bez;
    }
    let Some(start) = walk_start(path) else {
        return bez;
    };
    let end_idx = if path.closed { start } else { n - 1 };
    let visit_limit = 2 * n;

    bez.move_to(point_of(&nodes[start]));
    let mut controls: Vec<Point> = Vec::new();
    let mut idx = start;
    let mut visited = 1usize;

    loop {
        if visited >= visit_limit {
            warn!("path assembly exceeded visit limit ({visit_limit}); returning partial path");
            break;
        }
        visited += 1;
        idx = (idx + 1) % n;
        let node = &nodes[idx];
        if node.is_on_curve() {
            emit_curve(&mut bez, &controls, point_of(node), node.node_type);
            controls.clear();
        } else {
            controls.push(point_of(node));
        }
        if idx == end_idx {
            break;
        }
    }

    if path.closed {
        bez.close_path();
    }
    bez
}

fn emit_curve(bez: &mut BezPath, controls: &[Point], target: Point, end_type: NodeType) {
    match (controls.len(), end_type) {
        (0, _) => bez.line_to(target),
        (1, _) => bez.quad_to(controls[0], target),
        (len, NodeType::QCurve) if len >= 2 => {
            for i in 0..len - 1 {
                bez.quad_to(controls[i], controls[i].midpoint(controls[i + 1]));
            }
            bez.quad_to(controls[len - 1], target);
        }
        (2, _) => bez.curve_to(controls[0], controls[1], target),
        (len, _) => {
            warn!("bridging malformed run with {len} control points");
            bez.line_to(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(x: f64, y: f64) -> Node {
        Node::new(x, y, NodeType::Line)
    }

    fn off(x: f64, y: f64) -> Node {
        Node::new(x, y, NodeType::OffCurve)
    }

    fn square() -> PathData {
        PathData::new(
            vec![on(0.0, 0.0), on(100.0, 0.0), on(100.0, 100.0), on(0.0, 100.0)],
            true,
        )
    }

    #[test]
    fn closed_polygon_yields_one_line_per_node() {
        let segments = segmentize(&square());
        assert_eq!(segments.len(), 4);
        assert!(segments.iter().all(|s| s.kind == SegmentKind::Line));
        // Closing edge wraps back to the start node
        assert_eq!(segments[3].end(), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn open_path_yields_node_count_minus_one() {
        let path = PathData::new(vec![on(0.0, 0.0), on(10.0, 0.0), on(20.0, 5.0)], false);
        assert_eq!(segmentize(&path).len(), 2);
    }

    #[test]
    fn single_offcurve_run_is_quadratic() {
        let path = PathData::new(
            vec![on(0.0, 0.0), off(50.0, 100.0), on(100.0, 0.0)],
            false,
        );
        let segments = segmentize(&path);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Quadratic);
        assert_eq!(segments[0].points.len(), 3);
    }

    #[test]
    fn double_offcurve_run_is_cubic() {
        let path = PathData::new(
            vec![on(0.0, 0.0), off(30.0, 80.0), off(70.0, 80.0), on(100.0, 0.0)],
            false,
        );
        let segments = segmentize(&path);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Cubic);
        assert_eq!(segments[0].points.len(), 4);
    }

    #[test]
    fn oversized_offcurve_run_is_skipped() {
        let path = PathData::new(
            vec![
                on(0.0, 0.0),
                off(10.0, 50.0),
                off(40.0, 80.0),
                off(70.0, 50.0),
                on(100.0, 0.0),
                on(100.0, -50.0),
            ],
            false,
        );
        let segments = segmentize(&path);
        // The malformed 5-point run vanishes; the trailing line survives
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Line);
        assert_eq!(segments[0].start(), Some(Point::new(100.0, 0.0)));
    }

    #[test]
    fn closed_path_starts_at_first_on_curve() {
        // Leading off-curve: the wrap search must begin the walk at index 1
        let path = PathData::new(
            vec![off(50.0, 100.0), on(0.0, 0.0), on(100.0, 0.0)],
            true,
        );
        let segments = segmentize(&path);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start(), Some(Point::new(0.0, 0.0)));
        assert_eq!(segments[0].kind, SegmentKind::Line);
        assert_eq!(segments[1].kind, SegmentKind::Quadratic);
    }

    #[test]
    fn closed_walk_from_trailing_anchor_terminates() {
        // The only on-curve node is last: the bounded walk must wrap
        // through every leading off-curve and come home without spinning
        let path = PathData::new(
            vec![off(0.0, 50.0), off(50.0, 100.0), off(100.0, 50.0), on(50.0, 0.0)],
            true,
        );
        let segments = segmentize(&path);
        // The single 5-point run is malformed and emits nothing
        assert!(segments.is_empty());
    }

    #[test]
    fn degenerate_paths_yield_nothing() {
        assert!(segmentize(&PathData::new(vec![], true)).is_empty());
        assert!(segmentize(&PathData::new(vec![on(5.0, 5.0)], true)).is_empty());
        let all_off = PathData::new(vec![off(0.0, 0.0), off(1.0, 1.0)], true);
        assert!(segmentize(&all_off).is_empty());
    }

    #[test]
    fn bezpath_from_segments_closes_when_asked() {
        let segments = segmentize(&square());
        let path = segments_to_bezpath(&segments, true);
        let elements: Vec<_> = path.elements().to_vec();
        assert!(matches!(elements.first(), Some(kurbo::PathEl::MoveTo(_))));
        assert!(matches!(elements.last(), Some(kurbo::PathEl::ClosePath)));
    }

    #[test]
    fn under_filled_segment_is_skipped_by_builder() {
        let stub = Segment {
            points: vec![Point::new(0.0, 0.0)],
            kind: SegmentKind::Line,
        };
        let good = Segment {
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            kind: SegmentKind::Line,
        };
        let path = segments_to_bezpath(&[stub, good], false);
        // Move plus the one sound line
        assert_eq!(path.elements().len(), 2);
    }

    #[test]
    fn qcurve_run_expands_with_implied_midpoints() {
        let q = |x, y| Node::new(x, y, NodeType::QCurve);
        let path = PathData::new(
            vec![on(0.0, 0.0), off(0.0, 100.0), off(100.0, 100.0), q(100.0, 0.0)],
            false,
        );
        let bez = path_to_bezpath(&path);
        let elements = bez.elements();
        assert_eq!(elements.len(), 3);
        assert!(matches!(
            elements[1],
            kurbo::PathEl::QuadTo(c, p)
                if c == Point::new(0.0, 100.0) && p == Point::new(50.0, 100.0)
        ));
        assert!(matches!(
            elements[2],
            kurbo::PathEl::QuadTo(c, p)
                if c == Point::new(100.0, 100.0) && p == Point::new(100.0, 0.0)
        ));
    }

    #[test]
    fn node_path_builder_matches_segment_builder_on_strict_runs() {
        let path = PathData::new(
            vec![
                on(0.0, 0.0),
                off(30.0, 80.0),
                off(70.0, 80.0),
                Node::new(100.0, 0.0, NodeType::Curve),
            ],
            false,
        );
        let direct = path_to_bezpath(&path);
        let via_segments = segments_to_bezpath(&segmentize(&path), false);
        assert_eq!(direct.elements(), via_segments.elements());
    }
}
