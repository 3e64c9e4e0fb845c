//! In-memory document records for glyph outlines
//!
//! These structures mirror the layer data handed to us by the document
//! model: paths made of typed nodes, component references to other glyphs,
//! and anchors. The engine only reads them; every derived result (segments,
//! boxes, intersection lists) is owned by the caller.

use serde::{Deserialize, Serialize};

/// Node type enumeration for outline points
///
/// `Move`, `Line`, `Curve` and `QCurve` are on-curve; `OffCurve` marks a
/// Bezier control point that does not lie on the rendered outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    /// First point in an open contour
    #[serde(rename = "move")]
    Move,
    /// Draws a straight line from the previous on-curve point
    #[serde(rename = "line")]
    Line,
    /// Bezier control point
    #[serde(rename = "offcurve")]
    OffCurve,
    /// Endpoint of a cubic Bezier segment
    #[serde(rename = "curve")]
    Curve,
    /// Endpoint of a quadratic Bezier segment
    #[serde(rename = "qcurve")]
    QCurve,
}

impl NodeType {
    /// Check if this node type is on-curve (not a control point)
    pub fn is_on_curve(&self) -> bool {
        !matches!(self, NodeType::OffCurve)
    }
}

/// A single outline node
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Tangent continuity flag, only meaningful on on-curve nodes
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub smooth: bool,
}

impl Node {
    pub fn new(x: f64, y: f64, node_type: NodeType) -> Self {
        Self {
            x,
            y,
            node_type,
            smooth: false,
        }
    }

    pub fn with_smooth(mut self, smooth: bool) -> Self {
        if self.node_type.is_on_curve() {
            self.smooth = smooth;
        }
        self
    }

    pub fn is_on_curve(&self) -> bool {
        self.node_type.is_on_curve()
    }
}

/// An ordered node sequence; for closed paths the order is cyclic
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    pub nodes: Vec<Node>,
    pub closed: bool,
}

impl PathData {
    pub fn new(nodes: Vec<Node>, closed: bool) -> Self {
        Self { nodes, closed }
    }
}

/// A 6-value affine transform
///
/// Maps `(x, y)` to `(x_scale·x + yx_scale·y + x_offset,
/// xy_scale·x + y_scale·y + y_offset)`; field names follow the UFO
/// convention used by component records.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub x_scale: f64,
    pub xy_scale: f64,
    pub yx_scale: f64,
    pub y_scale: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        x_scale: 1.0,
        xy_scale: 0.0,
        yx_scale: 0.0,
        y_scale: 1.0,
        x_offset: 0.0,
        y_offset: 0.0,
    };

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            x_offset: dx,
            y_offset: dy,
            ..Self::IDENTITY
        }
    }

    /// Apply the transform to a point
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.x_scale * x + self.yx_scale * y + self.x_offset,
            self.xy_scale * x + self.y_scale * y + self.y_offset,
        )
    }

    /// Compose `self ∘ child`: the result applies `child` first, then `self`
    ///
    /// Written out as the 6-value matrix product so the component-nesting
    /// convention stays explicit. Composition is associative, which is what
    /// makes flattening nested references order-independent.
    pub fn compose(&self, child: &AffineTransform) -> AffineTransform {
        AffineTransform {
            x_scale: self.x_scale * child.x_scale + self.yx_scale * child.xy_scale,
            xy_scale: self.xy_scale * child.x_scale + self.y_scale * child.xy_scale,
            yx_scale: self.x_scale * child.yx_scale + self.yx_scale * child.y_scale,
            y_scale: self.xy_scale * child.yx_scale + self.y_scale * child.y_scale,
            x_offset: self.x_scale * child.x_offset
                + self.yx_scale * child.y_offset
                + self.x_offset,
            y_offset: self.xy_scale * child.x_offset
                + self.y_scale * child.y_offset
                + self.y_offset,
        }
    }

    /// Largest column-vector magnitude, used to keep hit tolerances
    /// constant in screen pixels under nested component transforms
    pub fn max_scale_factor(&self) -> f64 {
        let col1 = (self.x_scale * self.x_scale + self.xy_scale * self.xy_scale).sqrt();
        let col2 = (self.yx_scale * self.yx_scale + self.y_scale * self.y_scale).sqrt();
        col1.max(col2)
    }

    /// Conversion for renderer interop
    pub fn to_kurbo(&self) -> kurbo::Affine {
        kurbo::Affine::new([
            self.x_scale,
            self.xy_scale,
            self.yx_scale,
            self.y_scale,
            self.x_offset,
            self.y_offset,
        ])
    }
}

/// A positioned, transformed reference to another glyph's outline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentData {
    /// Name of the referenced glyph
    pub reference: String,
    #[serde(default)]
    pub transform: AffineTransform,
}

/// A shape is either literal path data or a component reference
///
/// Externally tagged so the serialized form matches the document model's
/// `{"Path": {...}}` / `{"Component": {...}}` records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Path(PathData),
    Component(ComponentData),
}

/// A named attachment point
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One drawable layer of a glyph at a particular master/location
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub anchors: Vec<Anchor>,
    /// Advance width in design units
    pub width: f64,
}

/// Glyph lookup supplied by the document model
///
/// Component resolution policy (which master/location matches) lives in the
/// document model, not in this engine; we only ask for the layer of a named
/// glyph in a location context and accept `None` for placeholder
/// references.
pub trait LayerSource {
    fn layer(&self, glyph_name: &str, location: &str) -> Option<&Layer>;
}

/// Trivial in-memory source, convenient for callers and tests
#[derive(Default)]
pub struct GlyphMap {
    glyphs: std::collections::HashMap<String, Layer>,
}

impl GlyphMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, layer: Layer) {
        self.glyphs.insert(name.into(), layer);
    }
}

impl LayerSource for GlyphMap {
    fn layer(&self, glyph_name: &str, _location: &str) -> Option<&Layer> {
        self.glyphs.get(glyph_name)
    }
}
