//! Frame-stepped viewport animations
//!
//! Each animation kind is an explicit state machine
//! (`Idle -> Running { start, end, frame, total } -> Idle`). The engine
//! owns no scheduler: the caller's frame driver calls [`PanAnimation::step`]
//! or [`ZoomAnimation::step`] once per frame tick and repaints afterwards.
//! Starting an animation of a kind that is already running is a no-op, and
//! cancellation takes effect at the next frame boundary.

use kurbo::Point;
use tracing::debug;

use super::transform::Viewport;

/// Frames a default-speed transition takes
pub const DEFAULT_ANIMATION_FRAMES: u32 = 24;

/// Result of stepping an animation one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    Finished,
}

/// Smoothstep ease-in-out over [0, 1]
fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[derive(Clone, Copy, Debug, Default)]
enum PanState {
    #[default]
    Idle,
    Running {
        start: (f64, f64),
        end: (f64, f64),
        frame: u32,
        total: u32,
    },
}

/// Animated pan toward a target offset
#[derive(Clone, Debug, Default)]
pub struct PanAnimation {
    state: PanState,
}

impl PanAnimation {
    pub fn is_running(&self) -> bool {
        matches!(self.state, PanState::Running { .. })
    }

    /// Begin animating toward `target` pan offset (screen pixels)
    ///
    /// Returns `false` without touching the running animation if one is
    /// already active.
    pub fn start(&mut self, viewport: &Viewport, target: (f64, f64), total_frames: u32) -> bool {
        if self.is_running() {
            debug!("pan animation already active; request ignored");
            return false;
        }
        self.state = PanState::Running {
            start: viewport.pan_offset(),
            end: target,
            frame: 0,
            total: total_frames.max(1),
        };
        true
    }

    /// Advance one frame, applying the eased pan to the viewport
    pub fn step(&mut self, viewport: &mut Viewport) -> AnimationStatus {
        let PanState::Running { start, end, frame, total } = self.state else {
            return AnimationStatus::Finished;
        };
        let frame = frame + 1;
        let progress = ease_in_out(frame as f64 / total as f64);
        viewport.set_pan(
            lerp(start.0, end.0, progress),
            lerp(start.1, end.1, progress),
        );
        if frame >= total {
            self.state = PanState::Idle;
            AnimationStatus::Finished
        } else {
            self.state = PanState::Running { start, end, frame, total };
            AnimationStatus::Running
        }
    }

    /// Mark inactive; checked at the next frame boundary, no mid-frame
    /// interruption
    pub fn cancel(&mut self) {
        self.state = PanState::Idle;
    }
}

#[derive(Clone, Copy, Debug, Default)]
enum ZoomState {
    #[default]
    Idle,
    Running {
        start_scale: f64,
        end_scale: f64,
        center: Point,
        frame: u32,
        total: u32,
    },
}

/// Animated zoom toward a target scale, anchored at a screen point
///
/// Used for keyboard zoom, where the anchor is the viewport center rather
/// than the cursor.
#[derive(Clone, Debug, Default)]
pub struct ZoomAnimation {
    state: ZoomState,
}

impl ZoomAnimation {
    pub fn is_running(&self) -> bool {
        matches!(self.state, ZoomState::Running { .. })
    }

    pub fn start(
        &mut self,
        viewport: &Viewport,
        target_scale: f64,
        center: Point,
        total_frames: u32,
    ) -> bool {
        if self.is_running() {
            debug!("zoom animation already active; request ignored");
            return false;
        }
        if !target_scale.is_finite() || target_scale <= 0.0 {
            debug!("zoom animation rejected invalid target scale {target_scale}");
            return false;
        }
        let config = viewport.config();
        self.state = ZoomState::Running {
            start_scale: viewport.scale(),
            end_scale: target_scale.clamp(config.min_scale, config.max_scale),
            center,
            frame: 0,
            total: total_frames.max(1),
        };
        true
    }

    /// Advance one frame; each frame re-anchors the zoom so `center` maps
    /// to the same font point throughout the transition
    pub fn step(&mut self, viewport: &mut Viewport) -> AnimationStatus {
        let ZoomState::Running { start_scale, end_scale, center, frame, total } = self.state
        else {
            return AnimationStatus::Finished;
        };
        let frame = frame + 1;
        let progress = ease_in_out(frame as f64 / total as f64);
        let scale = lerp(start_scale, end_scale, progress);
        let factor = scale / viewport.scale();
        viewport.zoom(factor, center);
        if frame >= total {
            self.state = ZoomState::Idle;
            AnimationStatus::Finished
        } else {
            self.state = ZoomState::Running { start_scale, end_scale, center, frame, total };
            AnimationStatus::Running
        }
    }

    pub fn cancel(&mut self) {
        self.state = ZoomState::Idle;
    }
}
