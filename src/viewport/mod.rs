//! Viewport state: coordinate mapping, animations and auto-framing

pub mod animation;
pub mod framing;
pub mod transform;

pub use animation::{AnimationStatus, PanAnimation, ZoomAnimation};
pub use framing::{fit_target, frame_glyph_target, pan_to_glyph_target, zoom_to_fit, FrameTarget};
pub use transform::{Viewport, ViewportConfig};
