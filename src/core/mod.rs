//! Shared engine plumbing

pub mod errors;

pub use errors::{GeometryError, GeometryResult};
