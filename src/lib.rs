//! Glyphcanvas
//!
//! Glyph outline geometry and viewport engine: turns stored outline and
//! component data into resolved curve geometry, answers bounding-box,
//! intersection and hit-test queries, and maintains the mapping between
//! font design space and screen pixels.

pub mod core;
pub mod data;
pub mod geometry;
pub mod hit_testing;
pub mod viewport;

pub use crate::core::errors::{GeometryError, GeometryResult};
pub use data::{
    AffineTransform, Anchor, ComponentData, Layer, LayerSource, Node, NodeType, PathData, Shape,
};
pub use geometry::{
    decode_nodes, encode_nodes, flatten_layer, intersect_layer, layer_bounds, segmentize,
    BoundingBox, FlatPath, Intersection, Segment, SegmentKind,
};
pub use hit_testing::HitTester;
pub use viewport::{PanAnimation, Viewport, ViewportConfig, ZoomAnimation};
