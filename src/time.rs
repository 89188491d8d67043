//! Frame clock for the scene.
//!
//! One source of truth for elapsed and delta time, updated once per display
//! refresh. Elapsed time accumulates scaled deltas rather than re-reading
//! the wall clock, so a fixed timestep produces a bit-stable elapsed stream.
//! The field functions take elapsed time as an input, and tests rely on
//! replaying it exactly.

use std::time::Instant;

/// Time tracking for the frame loop.
#[derive(Debug)]
pub struct Time {
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    /// Fixed delta time for deterministic updates, if set.
    fixed_delta: Option<f32>,
    time_scale: f32,
    paused: bool,
}

impl Time {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fixed_delta: None,
            time_scale: 1.0,
            paused: false,
        }
    }

    /// Advance the clock. Call once per frame.
    ///
    /// Returns `(elapsed, delta)` in seconds.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed_secs, 0.0);
        }

        self.delta_secs = self.fixed_delta.unwrap_or(raw_delta) * self.time_scale;
        self.elapsed_secs += self.delta_secs;
        self.frame_count += 1;

        (self.elapsed_secs, self.delta_secs)
    }

    /// Total animated seconds so far.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Seconds covered by the last `update`.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames advanced since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Use a fixed delta per frame instead of wall-clock timing.
    ///
    /// Pass `None` to return to real frame timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Time scale multiplier; 0.5 is half speed. Clamped at zero.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Current time scale multiplier.
    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Stop time; `update` returns a zero delta until resumed.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause. The paused stretch contributes nothing to
    /// elapsed time.
    pub fn resume(&mut self) {
        self.last_frame = Instant::now();
        self.paused = false;
    }

    /// Whether the clock is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_delta_accumulates_exactly() {
        let mut time = Time::new();
        time.set_fixed_delta(Some(1.0 / 60.0));
        for _ in 0..60 {
            time.update();
        }
        assert!((time.elapsed() - 1.0).abs() < 1e-4);
        assert_eq!(time.frame(), 60);
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let mut time = Time::new();
        time.set_fixed_delta(Some(0.1));
        time.update();
        let before = time.elapsed();

        time.pause();
        let (elapsed, delta) = time.update();
        assert_eq!(elapsed, before);
        assert_eq!(delta, 0.0);

        time.resume();
        time.update();
        assert!(time.elapsed() > before);
    }

    #[test]
    fn test_time_scale_clamps_at_zero() {
        let mut time = Time::new();
        time.set_time_scale(-2.0);
        assert_eq!(time.time_scale(), 0.0);

        time.set_fixed_delta(Some(0.5));
        time.update();
        assert_eq!(time.elapsed(), 0.0);
    }
}
