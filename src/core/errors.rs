//! Error types for the geometry and viewport engine
//!
//! Almost everything in this engine recovers locally: a malformed node is
//! skipped, a missing component reference contributes no geometry, a
//! degenerate curve is dropped from an intersection query. The conditions
//! below are the ones a caller actually has to distinguish.

use thiserror::Error;

/// Errors surfaced to callers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A component chain references itself, directly or through
    /// intermediates. Flattening aborts instead of recursing forever.
    #[error("cyclic component reference involving glyph '{glyph}'")]
    CyclicComponentReference { glyph: String },

    /// A viewport scale that is zero, negative or non-finite was requested.
    /// Such a scale is never stored.
    #[error("invalid viewport scale {requested}; scale must be positive and finite")]
    InvalidScale { requested: f64 },
}

pub type GeometryResult<T> = Result<T, GeometryError>;
