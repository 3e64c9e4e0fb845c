//! Outline geometry: node decoding, segmentation, component flattening,
//! bounding boxes and intersection queries

pub mod bounds;
pub mod codec;
pub mod flatten;
pub mod intersection;
pub mod segment;

pub use bounds::{layer_bounds, BoundingBox};
pub use codec::{decode_nodes, encode_nodes};
pub use flatten::{flatten_layer, FlatPath};
pub use intersection::{intersect_layer, intersect_segments, Intersection};
pub use segment::{path_to_bezpath, segmentize, segments_to_bezpath, Segment, SegmentKind};
