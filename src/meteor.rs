//! The streaking-body pool.
//!
//! A small fixed pool of "meteors" drifts diagonally across the scene,
//! independent of the particle fields. A body that falls below the height
//! bound or crosses the horizontal exit bound is reset in place (same
//! slot, freshly randomized state), so the pool never allocates during the
//! per-frame pass and its size is constant for the session.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Nearest spawn depth (positive distance in front of the camera).
const DEPTH_NEAR: f32 = 60.0;
/// Farthest spawn depth.
const DEPTH_FAR: f32 = 300.0;

/// Height below which a body is recycled.
const LOWER_BOUND_Y: f32 = -120.0;
/// Horizontal margin past the frustum edge before a body is recycled.
const EXIT_MARGIN_X: f32 = 80.0;

/// Height band bodies spawn in, above the scene.
const SPAWN_HEIGHT: (f32, f32) = (60.0, 180.0);
/// Extra horizontal run-up outside the frustum edge at spawn.
const SPAWN_RUNUP_X: f32 = 120.0;

const SPEED_RANGE: (f32, f32) = (18.0, 45.0);

/// One streaking body. Mutated every frame by its pool; nothing else writes
/// to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meteor {
    /// Current position.
    pub position: Vec3,
    /// Units per second.
    pub velocity: Vec3,
    /// Perspective-compensating visual scale; bodies spawned deeper are
    /// scaled up so they stay visible.
    pub scale: f32,
}

/// Fixed-size arena of recyclable streaking bodies.
#[derive(Debug)]
pub struct MeteorPool {
    meteors: Vec<Meteor>,
    rng: SmallRng,
    /// Vertical field-of-view half-angle tangent, for frustum-width
    /// estimates at a given depth.
    half_fov_tan: f32,
    aspect: f32,
}

impl MeteorPool {
    /// Create a pool of `count` bodies, each independently initialized.
    pub(crate) fn new(count: u32, aspect: f32, seed: u64) -> Self {
        let mut pool = Self {
            meteors: Vec::with_capacity(count as usize),
            rng: SmallRng::seed_from_u64(seed ^ 0x4E7E_0221_5AFE_77AB),
            half_fov_tan: (60.0f32.to_radians() * 0.5).tan(),
            aspect: aspect.max(0.1),
        };
        for _ in 0..count {
            let meteor = pool.spawn();
            pool.meteors.push(meteor);
        }
        pool
    }

    /// The live pool, in slot order.
    #[inline]
    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    /// Number of bodies; constant for the session.
    #[inline]
    pub fn len(&self) -> usize {
        self.meteors.len()
    }

    /// Whether the pool is empty (only for a zero-count configuration).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.meteors.is_empty()
    }

    /// Update the projection aspect ratio after a surface resize. Does not
    /// touch body state.
    pub(crate) fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect.max(0.1);
    }

    /// Estimated half-width of the view frustum at `depth` in front of the
    /// camera.
    fn half_width_at(&self, depth: f32) -> f32 {
        depth.abs() * self.half_fov_tan * self.aspect
    }

    /// Randomize a fresh body state.
    ///
    /// The squared draw keeps `z_bias` small most of the time, and depth
    /// runs from far to near as it grows, so more bodies cross in the
    /// background than the foreground.
    fn spawn(&mut self) -> Meteor {
        let z_bias = self.rng.gen::<f32>().powi(2);
        let depth_t = 1.0 - z_bias;
        let depth = DEPTH_NEAR + depth_t * (DEPTH_FAR - DEPTH_NEAR);
        let half_width = self.half_width_at(depth);

        let position = Vec3::new(
            -(half_width + self.rng.gen::<f32>() * SPAWN_RUNUP_X),
            self.rng.gen_range(SPAWN_HEIGHT.0..SPAWN_HEIGHT.1),
            -depth,
        );

        let speed = self.rng.gen_range(SPEED_RANGE.0..SPEED_RANGE.1);
        let direction = Vec3::new(
            0.75 + self.rng.gen::<f32>() * 0.2,
            -(0.5 + self.rng.gen::<f32>() * 0.3),
            self.rng.gen_range(-0.05..0.05),
        )
        .normalize();

        Meteor {
            position,
            velocity: direction * speed,
            // Deeper bodies are drawn larger to compensate for perspective.
            scale: 1.0 + depth_t * 3.5,
        }
    }

    /// Reinitialize the body in slot `index` in place.
    pub(crate) fn reset(&mut self, index: usize) {
        self.meteors[index] = self.spawn();
    }

    /// Translate every body along its velocity, recycling any that left the
    /// bounding volume this frame.
    pub(crate) fn advance(&mut self, dt: f32) {
        for i in 0..self.meteors.len() {
            let velocity = self.meteors[i].velocity;
            self.meteors[i].position += velocity * dt;

            let p = self.meteors[i].position;
            let exit_x = self.half_width_at(p.z) + EXIT_MARGIN_X;
            if p.y < LOWER_BOUND_Y || p.x > exit_x {
                self.reset(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_size_is_constant() {
        let mut pool = MeteorPool::new(10, 16.0 / 9.0, 7);
        for _ in 0..600 {
            pool.advance(1.0 / 60.0);
        }
        assert_eq!(pool.len(), 10);
    }

    #[test]
    fn test_spawn_enters_from_upper_left() {
        let mut pool = MeteorPool::new(50, 16.0 / 9.0, 3);
        for m in pool.meteors() {
            assert!(m.position.x < 0.0, "spawn must be on the entry side");
            assert!(m.position.y >= SPAWN_HEIGHT.0);
            assert!(m.velocity.x > 0.0 && m.velocity.y < 0.0, "diagonal downward drift");
            assert!(m.scale >= 1.0);
        }
    }

    #[test]
    fn test_fallen_body_is_reset_by_next_frame() {
        let mut pool = MeteorPool::new(1, 16.0 / 9.0, 11);

        // Force the body below the height bound on frame k.
        pool.meteors[0].position.y = LOWER_BOUND_Y - 5.0;
        pool.advance(1.0 / 60.0);

        // By frame k+1 it must be a fresh body, not a clamped one.
        let m = pool.meteors()[0];
        assert!(m.position.y > LOWER_BOUND_Y);
        assert!(m.position.x < 0.0, "back on the spawn side");
    }

    #[test]
    fn test_exited_body_is_reset_by_next_frame() {
        let mut pool = MeteorPool::new(1, 16.0 / 9.0, 13);

        let exit_x = pool.half_width_at(pool.meteors[0].position.z) + EXIT_MARGIN_X;
        pool.meteors[0].position.x = exit_x + 1.0;
        pool.advance(1.0 / 60.0);

        let m = pool.meteors()[0];
        assert!(m.position.x < 0.0);
    }

    #[test]
    fn test_depth_bias_favors_far_plane() {
        let pool = MeteorPool::new(400, 16.0 / 9.0, 5);
        let mid = (DEPTH_NEAR + DEPTH_FAR) * 0.5;
        let far = pool
            .meteors()
            .iter()
            .filter(|m| m.position.z.abs() > mid)
            .count();
        assert!(far > pool.len() / 2, "only {}/{} spawned deep", far, pool.len());
    }

    #[test]
    fn test_deeper_bodies_are_larger() {
        let pool = MeteorPool::new(200, 16.0 / 9.0, 9);
        let mut sorted: Vec<_> = pool
            .meteors()
            .iter()
            .map(|m| (m.position.z.abs(), m.scale))
            .collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        // Scale is a monotone function of spawn depth.
        for pair in sorted.windows(2) {
            assert!(pair[1].1 >= pair[0].1 - 1e-4);
        }
    }
}
