//! Compact node-string codec
//!
//! Some source formats serialize a path's nodes as a single token string
//! instead of a structured list: whitespace-separated triples of
//! `x y typeChar`, where the type char is one of `m l o c q` and an
//! optional trailing `s` marks a smooth on-curve node
//! (`"0 0 l 100 0 ls"` is a corner node followed by a smooth one).

use tracing::warn;

use crate::data::{Node, NodeType};

/// Map a one-letter type code to a node type, defaulting unknown codes to
/// `Line` so a stray token never aborts decoding
fn node_type_from_code(code: char) -> NodeType {
    match code {
        'm' => NodeType::Move,
        'l' => NodeType::Line,
        'o' => NodeType::OffCurve,
        'c' => NodeType::Curve,
        'q' => NodeType::QCurve,
        _ => NodeType::Line,
    }
}

fn code_from_node_type(node_type: NodeType) -> char {
    match node_type {
        NodeType::Move => 'm',
        NodeType::Line => 'l',
        NodeType::OffCurve => 'o',
        NodeType::Curve => 'c',
        NodeType::QCurve => 'q',
    }
}

/// Decode a compact node string into typed nodes
///
/// Malformed numeric tokens fail closed: the offending node is skipped with
/// a log message and decoding continues with the next triple.
pub fn decode_nodes(encoded: &str) -> Vec<Node> {
    let tokens: Vec<&str> = encoded.split_whitespace().collect();
    let mut nodes = Vec::with_capacity(tokens.len() / 3);

    for triple in tokens.chunks_exact(3) {
        let (x_tok, y_tok, type_tok) = (triple[0], triple[1], triple[2]);
        let (x, y) = match (x_tok.parse::<f64>(), y_tok.parse::<f64>()) {
            (Ok(x), Ok(y)) => (x, y),
            _ => {
                warn!("skipping node with malformed coordinates '{x_tok} {y_tok} {type_tok}'");
                continue;
            }
        };

        let mut chars = type_tok.chars();
        let code = chars.next().unwrap_or('l');
        let smooth = type_tok.len() > 1 && type_tok.ends_with('s');
        let node_type = node_type_from_code(code);

        nodes.push(Node {
            x,
            y,
            node_type,
            smooth: smooth && node_type.is_on_curve(),
        });
    }

    nodes
}

/// Encode nodes back into the compact string form
///
/// Coordinates use Rust's shortest round-trip float formatting, so
/// `decode_nodes(encode_nodes(n)) == n` holds exactly for every supported
/// node type.
pub fn encode_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&format!("{} {} ", node.x, node.y));
        out.push(code_from_node_type(node.node_type));
        if node.smooth {
            out.push('s');
        }
    }
    out
}
