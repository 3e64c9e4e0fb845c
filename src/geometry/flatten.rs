//! Component flattening
//!
//! Resolves a layer's shapes into concrete paths in one coordinate space.
//! Direct paths are copied through the accumulated transform; component
//! references are looked up through the caller's [`LayerSource`] and
//! recursed into with `parent ∘ child` composition. A visited-reference
//! stack plus a depth bound turns reference cycles into a reported error
//! instead of unbounded recursion.

use tracing::{debug, warn};

use crate::core::errors::{GeometryError, GeometryResult};
use crate::data::{AffineTransform, Layer, LayerSource, Node, PathData, Shape};

/// A path resolved into final coordinates, node metadata preserved
#[derive(Clone, Debug, PartialEq)]
pub struct FlatPath {
    pub nodes: Vec<Node>,
    pub closed: bool,
}

impl FlatPath {
    /// Reinterpret as plain path data, e.g. for segmentation
    pub fn as_path_data(&self) -> PathData {
        PathData::new(self.nodes.clone(), self.closed)
    }
}

/// Nesting deeper than this is treated as a cycle; real fonts nest
/// components a handful of levels at most
pub const MAX_COMPONENT_DEPTH: usize = 64;

/// Flatten a layer's shapes into concrete paths
///
/// Missing component references are skipped silently: they are treated as
/// intentionally incomplete placeholders and contribute no geometry. A
/// cyclic reference chain aborts with
/// [`GeometryError::CyclicComponentReference`].
pub fn flatten_layer(
    layer: &Layer,
    source: &dyn LayerSource,
    location: &str,
) -> GeometryResult<Vec<FlatPath>> {
    let mut out = Vec::new();
    let mut visiting: Vec<String> = Vec::new();
    flatten_into(
        layer,
        source,
        location,
        &AffineTransform::IDENTITY,
        &mut visiting,
        &mut out,
    )?;
    Ok(out)
}

fn flatten_into(
    layer: &Layer,
    source: &dyn LayerSource,
    location: &str,
    transform: &AffineTransform,
    visiting: &mut Vec<String>,
    out: &mut Vec<FlatPath>,
) -> GeometryResult<()> {
    for shape in &layer.shapes {
        match shape {
            Shape::Path(path) => {
                let nodes = path
                    .nodes
                    .iter()
                    .map(|node| {
                        let (x, y) = transform.apply(node.x, node.y);
                        Node { x, y, ..*node }
                    })
                    .collect();
                out.push(FlatPath {
                    nodes,
                    closed: path.closed,
                });
            }
            Shape::Component(component) => {
                if visiting.iter().any(|name| name == &component.reference) {
                    warn!(
                        glyph = component.reference.as_str(),
                        "component reference cycle detected"
                    );
                    return Err(GeometryError::CyclicComponentReference {
                        glyph: component.reference.clone(),
                    });
                }
                if visiting.len() >= MAX_COMPONENT_DEPTH {
                    warn!(
                        glyph = component.reference.as_str(),
                        "component nesting exceeds depth bound"
                    );
                    return Err(GeometryError::CyclicComponentReference {
                        glyph: component.reference.clone(),
                    });
                }

                let Some(nested) = source.layer(&component.reference, location) else {
                    // Placeholder reference, contributes no geometry
                    debug!(
                        glyph = component.reference.as_str(),
                        "component reference not found; skipping"
                    );
                    continue;
                };

                let combined = transform.compose(&component.transform);
                visiting.push(component.reference.clone());
                let result = flatten_into(nested, source, location, &combined, visiting, out);
                visiting.pop();
                result?;
            }
        }
    }
    Ok(())
}
