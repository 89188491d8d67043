//! Pointer interaction tracking.
//!
//! The scene's only pointer gestures are "drag to rotate" and "click to
//! cycle the mode". [`PointerTracker`] does the bookkeeping: press records
//! the start position, moves while the button is held accumulate rotation,
//! and release classifies the whole gesture by total displacement. Distance
//! is the sole discriminator; there is no velocity or duration component.

use glam::Vec2;

/// Rotation accumulated per pixel of drag, in radians.
pub const DRAG_ROTATE_RATE: f32 = 0.005;

/// Displacement below which a press/release pair counts as a click, in
/// pixels. Strict: a displacement of exactly this many pixels is a drag.
pub const CLICK_SLOP: f32 = 5.0;

/// How a completed press/release pair is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerGesture {
    /// Displacement stayed under the slop; the caller should cycle the mode.
    Click,
    /// The pointer moved; rotation was already accumulated along the way.
    Drag,
}

/// Pointer drag/click state machine.
///
/// Manual rotation is stored as `(x, y)` where `x` accumulates vertical
/// drag (pitch) and `y` horizontal drag (yaw), matching how the scene feeds
/// them into the group rotation target.
#[derive(Debug, Default)]
pub struct PointerTracker {
    press_origin: Option<Vec2>,
    last_position: Vec2,
    manual_rotation: Vec2,
}

impl PointerTracker {
    /// Create an idle tracker with zero accumulated rotation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated manual rotation in radians.
    #[inline]
    pub fn manual_rotation(&self) -> Vec2 {
        self.manual_rotation
    }

    /// Whether a button is currently held.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.press_origin.is_some()
    }

    /// Button went down at `position` (pixels).
    pub fn press(&mut self, position: Vec2) {
        self.press_origin = Some(position);
        self.last_position = position;
    }

    /// Pointer moved to `position`. Only accumulates rotation while the
    /// button is held; hover movement is ignored.
    pub fn drag(&mut self, position: Vec2) {
        if self.press_origin.is_none() {
            return;
        }
        let delta = position - self.last_position;
        self.manual_rotation.x += delta.y * DRAG_ROTATE_RATE;
        self.manual_rotation.y += delta.x * DRAG_ROTATE_RATE;
        self.last_position = position;
    }

    /// Button went up at `position`. Classifies the gesture; returns `None`
    /// for a release with no matching press.
    pub fn release(&mut self, position: Vec2) -> Option<PointerGesture> {
        let origin = self.press_origin.take()?;
        if origin.distance(position) < CLICK_SLOP {
            Some(PointerGesture::Click)
        } else {
            Some(PointerGesture::Drag)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_displacement_is_click() {
        let mut tracker = PointerTracker::new();
        tracker.press(Vec2::new(100.0, 100.0));
        assert_eq!(
            tracker.release(Vec2::new(100.0, 100.0)),
            Some(PointerGesture::Click)
        );
    }

    #[test]
    fn test_displacement_at_slop_is_drag() {
        // Exactly the threshold must classify as drag (strict <).
        let mut tracker = PointerTracker::new();
        tracker.press(Vec2::new(0.0, 0.0));
        assert_eq!(
            tracker.release(Vec2::new(CLICK_SLOP, 0.0)),
            Some(PointerGesture::Drag)
        );
    }

    #[test]
    fn test_displacement_just_under_slop_is_click() {
        let mut tracker = PointerTracker::new();
        tracker.press(Vec2::new(0.0, 0.0));
        assert_eq!(
            tracker.release(Vec2::new(CLICK_SLOP - 0.01, 0.0)),
            Some(PointerGesture::Click)
        );
    }

    #[test]
    fn test_drag_accumulates_rotation() {
        let mut tracker = PointerTracker::new();
        tracker.press(Vec2::new(0.0, 0.0));
        tracker.drag(Vec2::new(40.0, 0.0));
        tracker.drag(Vec2::new(40.0, 30.0));
        tracker.release(Vec2::new(40.0, 30.0));

        let rot = tracker.manual_rotation();
        assert!((rot.y - 40.0 * DRAG_ROTATE_RATE).abs() < 1e-6);
        assert!((rot.x - 30.0 * DRAG_ROTATE_RATE).abs() < 1e-6);
    }

    #[test]
    fn test_hover_does_not_rotate() {
        let mut tracker = PointerTracker::new();
        tracker.drag(Vec2::new(500.0, 500.0));
        assert_eq!(tracker.manual_rotation(), Vec2::ZERO);
    }

    #[test]
    fn test_release_without_press_is_none() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.release(Vec2::ZERO), None);
    }
}
