//! Pure target-position fields.
//!
//! A field maps (descriptor, elapsed time) to the position a particle wants
//! to be at this frame. Fields are deterministic: no RNG is consulted here,
//! so the only "randomness" in the shapes comes from the already-fixed
//! descriptors and jitters. The integrator in [`scene`](crate::scene) then
//! eases each live position toward its target; nothing in this module
//! mutates state.
//!
//! Switching modes swaps which field is evaluated. The tree and scatter
//! fields are intentionally unrelated formulas, not endpoints of a blend:
//! the smoothing happens after target selection.

use crate::spawn::ParticleDescriptor;
use glam::Vec3;

/// Smoothing factor for the per-particle convergence step.
pub const PARTICLE_ALPHA: f32 = 0.06;

/// Smoothing factor for the floor offset, heart pulse, and group rotation.
pub const EASE_ALPHA: f32 = 0.05;

/// No tree particle may dip below this height; the floor ring sits just
/// underneath.
pub const TREE_FLOOR_LIMIT: f32 = -51.8;

/// Floor vertical offset target while the tree field is active.
pub const FLOOR_OFFSET_TREE: f32 = -52.0;

/// Floor vertical offset target while the scatter field is active (dropped
/// well out of frame).
pub const FLOOR_OFFSET_SCATTER: f32 = -140.0;

/// Continuous floor spin rate, radians per second.
pub const FLOOR_SPIN_RATE: f32 = 0.12;

const DROOP_EXPONENT: f32 = 1.4;
const DROOP_STRENGTH: f32 = 7.0;
const SWAY_RATE: f32 = 0.4;
const SWAY_TIER_PHASE: f32 = 0.6;
const SWAY_AMPLITUDE: f32 = 0.15;
const BRANCH_SPREAD: f32 = 0.12;
const NEEDLE_SPREAD: f32 = 0.5;

const SCATTER_X_AMPLITUDE: f32 = 130.0;
const SCATTER_Y_AMPLITUDE: f32 = 90.0;
const SCATTER_Z_AMPLITUDE: f32 = 130.0;

/// Overall tree envelope, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeShape {
    /// Crown-to-base extent of the cone.
    pub height: f32,
    /// Radius ceiling at the base tier.
    pub radius: f32,
    /// Number of discrete tiers; descriptors index into `[0, tier_count)`.
    pub tier_count: u32,
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            height: 105.0,
            radius: 45.0,
            tier_count: 72,
        }
    }
}

/// Target position in the tree field.
///
/// Tier 0 is the crown; `tier_t` approaching 1 reaches the broad base. The
/// radius ceiling grows super-linearly (`tier_t^1.1`) so lower tiers fan
/// out faster, the droop term pulls branch tips down, and a slow sway keeps
/// the silhouette alive.
pub fn tree_target(
    descriptor: &ParticleDescriptor,
    jitter: Vec3,
    shape: &TreeShape,
    elapsed: f32,
) -> Vec3 {
    let tier_t = descriptor.tier as f32 / shape.tier_count as f32;
    let fraction = descriptor.branch_fraction;

    let tier_radius = tier_t.powf(1.1) * shape.radius;
    let radius = tier_radius * fraction;

    // Foliage spreads more than the branch skeleton, and the perturbation
    // dies out toward the branch tip.
    let spread = if descriptor.is_branch {
        BRANCH_SPREAD
    } else {
        NEEDLE_SPREAD
    };
    let wobble = (tier_t * 19.0 + descriptor.branch_angle * 3.0).sin();
    let angle = descriptor.branch_angle + wobble * spread * (1.0 - fraction);

    let mut height = (1.0 - tier_t) * shape.height - shape.height * 0.5 + 12.0;
    height -= fraction.powf(DROOP_EXPONENT) * DROOP_STRENGTH;
    height += (elapsed * SWAY_RATE + descriptor.tier as f32 * SWAY_TIER_PHASE).sin()
        * SWAY_AMPLITUDE;
    height = height.max(TREE_FLOOR_LIMIT);

    Vec3::new(angle.cos() * radius, height, angle.sin() * radius) + jitter
}

/// Target position in the scatter field.
///
/// A Lissajous-style orbit parameterized only by the particle's index
/// fraction and time; the tree descriptor plays no part, so the mode switch
/// is a genuine field swap rather than a deformation of the tree.
pub fn scatter_target(index: u32, count: u32, elapsed: f32) -> Vec3 {
    let u = index as f32 / count as f32;
    let phase = u * std::f32::consts::TAU * 4.0;

    Vec3::new(
        (phase * 1.7 + elapsed * 0.23).sin() * SCATTER_X_AMPLITUDE,
        (phase * 2.3 + elapsed * 0.17).cos() * SCATTER_Y_AMPLITUDE,
        (phase * 1.3 + elapsed * 0.29).sin() * SCATTER_Z_AMPLITUDE,
    )
}

/// One exponential-smoothing step: close `alpha` of the remaining distance.
#[inline]
pub fn approach(current: Vec3, target: Vec3, alpha: f32) -> Vec3 {
    current + (target - current) * alpha
}

/// Scalar version of [`approach`].
#[inline]
pub fn approach_scalar(current: f32, target: f32, alpha: f32) -> f32 {
    current + (target - current) * alpha
}
