//! One-shot generation of the immutable per-particle data.
//!
//! Everything here runs once at scene construction: each tree particle gets
//! a [`ParticleDescriptor`], a fixed jitter vector, an initial color and a
//! random starting position; the floor rings and dust volume get their
//! static layouts. None of it is touched again during the session: the
//! per-frame fields in [`field`](crate::field) read the descriptors but
//! never mutate them, and "recycling" in the tree is purely a positional
//! retarget.
//!
//! Randomness is index-seeded so a scene built with an explicit seed is
//! fully reproducible, particle by particle.

use crate::theme::ThemePalette;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Probability that a particle belongs to the branch skeleton rather than
/// the foliage.
pub(crate) const BRANCH_PROBABILITY: f32 = 0.3;

/// Exponent applied to the uniform tier draw; values below 1 bias the draw
/// toward high tier indices (the broad base), so thin upper tiers get
/// proportionally fewer particles.
pub(crate) const TIER_BIAS_EXPONENT: f32 = 0.35;

/// Spoke count at tier 0. Tier `t` offers `BASE_ARM_COUNT + t` equally
/// spaced branch angles, so branch density grows toward the base.
pub(crate) const BASE_ARM_COUNT: u32 = 8;

const BRANCH_JITTER_SCALE: f32 = 0.3;
const NEEDLE_JITTER_SCALE: f32 = 3.0;

const NEEDLE_COLOR_PROBABILITY: f32 = 0.85;
const GLOW_BOOST: f32 = 1.02;
const ORNAMENT_DIM: f32 = 0.9;

/// Half-size of the cube particles start scattered in before the first
/// convergence step pulls them onto the active field.
pub(crate) const INITIAL_SCATTER_HALF_SIZE: f32 = 150.0;

/// Half-size of the decorative dust volume.
pub(crate) const DUST_HALF_SIZE: f32 = 220.0;

// Floor ring extents (inner..outer radius per ring). Connectors live in the
// radial gaps between adjacent rings.
pub(crate) const INNER_RING_RADII: (f32, f32) = (6.0, 20.0);
pub(crate) const MID_RING_RADII: (f32, f32) = (24.0, 34.0);
pub(crate) const OUTER_RING_RADII: (f32, f32) = (38.0, 48.0);

const INNER_RING_COUNT: usize = 700;
const MID_RING_COUNT: usize = 1400;
const OUTER_RING_COUNT: usize = 2000;
const CONNECTOR_COUNT: usize = 240;

const MID_RING_ARMS: u32 = 5;
const OUTER_RING_ARMS: u32 = 8;

/// Immutable shape parameters for one tree particle, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleDescriptor {
    /// Normalized position along the branch, trunk (0) to tip (just under 1).
    pub branch_fraction: f32,
    /// Ring level in the branch hierarchy; 0 is the crown, indices grow
    /// toward the base.
    pub tier: u32,
    /// Angle of the branch around the trunk axis, in `[0, 2π)`.
    pub branch_angle: f32,
    /// True for branch-skeleton particles, false for foliage needles.
    pub is_branch: bool,
}

/// One particle of the floor ring layout.
///
/// The floor is a rigid body: these polar coordinates never change, the
/// scene rotates and raises/lowers the whole ring as a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorParticle {
    /// Radial distance from the floor center.
    pub distance: f32,
    /// Angle in the floor plane, in `[0, 2π)`.
    pub angle: f32,
    /// Small per-particle height relief within the (otherwise flat) ring.
    pub vertical_offset: f32,
    /// Fixed color.
    pub color: Vec3,
}

/// One decorative dust mote. Never retargeted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DustParticle {
    /// Fixed position in the dust volume.
    pub position: Vec3,
    /// Fixed color.
    pub color: Vec3,
}

/// Per-particle RNG context for spawn-time sampling.
///
/// Seeded from the scene seed mixed with the particle index, so generation
/// is idempotent given a fixed seed and each particle's draws are
/// independent of every other particle's.
pub struct SpawnContext {
    /// Index of the particle being generated (0 to count-1).
    pub index: u32,
    /// Total number of particles being generated.
    pub count: u32,
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a context for particle `index` of `count`, derived from the
    /// scene-wide `base_seed`.
    pub(crate) fn new(index: u32, count: u32, base_seed: u64) -> Self {
        // splitmix-style mix so consecutive indices land far apart
        let seed = (base_seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
            .wrapping_add(0x2545_F491_4F6C_DD1D);

        Self {
            index,
            count,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Random u32 in `[min, max)`.
    #[inline]
    pub fn random_uint(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..max)
    }

    /// Random point inside a cube of given half-size, centered at origin.
    pub fn random_in_cube(&mut self, half_size: f32) -> Vec3 {
        Vec3::new(
            self.rng.gen_range(-half_size..half_size),
            self.rng.gen_range(-half_size..half_size),
            self.rng.gen_range(-half_size..half_size),
        )
    }

    /// Direct access to the underlying RNG for the color sampler.
    #[inline]
    pub(crate) fn rng_mut(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}

/// Sample one immutable descriptor.
pub fn sample_descriptor(ctx: &mut SpawnContext, tier_count: u32) -> ParticleDescriptor {
    let is_branch = ctx.random() < BRANCH_PROBABILITY;

    let u = ctx.random();
    let tier = ((u.powf(TIER_BIAS_EXPONENT) * tier_count as f32) as u32).min(tier_count - 1);

    // Branch angles are quantized to the tier's spoke count.
    let arms = BASE_ARM_COUNT + tier;
    let branch_angle = ctx.random_uint(0, arms) as f32 * TAU / arms as f32;

    let branch_fraction = ctx.random();

    ParticleDescriptor {
        branch_fraction,
        tier,
        branch_angle,
        is_branch,
    }
}

/// Sample the particle's fixed offset from its ideal branch position.
///
/// Branch-skeleton particles hug the branch line; needles scatter an order
/// of magnitude wider to read as foliage.
pub fn sample_jitter(ctx: &mut SpawnContext, is_branch: bool) -> Vec3 {
    let scale = if is_branch {
        BRANCH_JITTER_SCALE
    } else {
        NEEDLE_JITTER_SCALE
    };
    Vec3::new(
        ctx.random_range(-0.5, 0.5) * scale,
        ctx.random_range(-0.5, 0.5) * scale,
        ctx.random_range(-0.5, 0.5) * scale,
    )
}

/// Sample a particle color from the palette.
///
/// This is the one generation step that reruns during the session: a theme
/// switch re-samples every color with a fresh draw, so ornament placement
/// may differ between two switches to the same theme.
pub fn sample_color<R: Rng>(rng: &mut R, palette: &ThemePalette, is_branch: bool) -> Vec3 {
    if is_branch {
        return palette.glow * GLOW_BOOST;
    }
    if rng.gen::<f32>() < NEEDLE_COLOR_PROBABILITY {
        // Small lightness jitter keeps the foliage from reading flat.
        palette.needle * rng.gen_range(0.85..1.15)
    } else {
        let pick = rng.gen_range(0..palette.ornaments.len());
        palette.ornaments[pick] * ORNAMENT_DIM
    }
}

/// Everything the tree field needs at startup, generated in one pass.
pub(crate) struct TreeFieldData {
    pub descriptors: Vec<ParticleDescriptor>,
    pub jitters: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub positions: Vec<Vec3>,
}

/// Generate the full tree field: descriptors, jitters, initial colors, and
/// random starting positions.
pub(crate) fn generate_tree_field(
    count: u32,
    tier_count: u32,
    palette: &ThemePalette,
    base_seed: u64,
) -> TreeFieldData {
    let n = count as usize;
    let mut descriptors = Vec::with_capacity(n);
    let mut jitters = Vec::with_capacity(n);
    let mut colors = Vec::with_capacity(n);
    let mut positions = Vec::with_capacity(n);

    for i in 0..count {
        let mut ctx = SpawnContext::new(i, count, base_seed);
        let descriptor = sample_descriptor(&mut ctx, tier_count);
        jitters.push(sample_jitter(&mut ctx, descriptor.is_branch));
        positions.push(ctx.random_in_cube(INITIAL_SCATTER_HALF_SIZE));
        colors.push(sample_color(ctx.rng_mut(), palette, descriptor.is_branch));
        descriptors.push(descriptor);
    }

    TreeFieldData {
        descriptors,
        jitters,
        colors,
        positions,
    }
}

/// Generate the static floor layout: three concentric rings plus sparse
/// connectors bridging the gaps between them.
pub(crate) fn generate_floor(palette: &ThemePalette, base_seed: u64) -> Vec<FloorParticle> {
    let mut rng = SmallRng::seed_from_u64(base_seed ^ 0xF100_4F10_0A4F_100A);
    let mut floor = Vec::with_capacity(
        INNER_RING_COUNT + MID_RING_COUNT + OUTER_RING_COUNT + CONNECTOR_COUNT,
    );

    // Inner ring: dual-armed "yin-yang" spiral. Two arms offset by π, each
    // sweeping three quarters of a turn from hub to rim.
    for k in 0..INNER_RING_COUNT {
        let t = k as f32 / INNER_RING_COUNT as f32;
        let arm = (k % 2) as f32;
        let (r0, r1) = INNER_RING_RADII;
        floor.push(FloorParticle {
            distance: r0 + t * (r1 - r0) + rng.gen_range(-0.4..0.4),
            angle: (arm * PI + t * PI * 1.5).rem_euclid(TAU),
            vertical_offset: (t * TAU).sin() * 0.6,
            color: ring_color(&mut rng, palette, 1.0),
        });
    }

    floor.extend(spiral_ring(
        &mut rng,
        palette,
        MID_RING_COUNT,
        MID_RING_ARMS,
        MID_RING_RADII,
    ));
    floor.extend(spiral_ring(
        &mut rng,
        palette,
        OUTER_RING_COUNT,
        OUTER_RING_ARMS,
        OUTER_RING_RADII,
    ));

    // Connectors: sparse particles in the two radial gaps, dimmed so the
    // rings stay visually dominant.
    for k in 0..CONNECTOR_COUNT {
        let (lo, hi) = if k % 2 == 0 {
            (INNER_RING_RADII.1, MID_RING_RADII.0)
        } else {
            (MID_RING_RADII.1, OUTER_RING_RADII.0)
        };
        floor.push(FloorParticle {
            distance: rng.gen_range(lo..hi),
            angle: rng.gen_range(0.0..TAU),
            vertical_offset: rng.gen_range(-0.3..0.3),
            color: ring_color(&mut rng, palette, 0.6),
        });
    }

    floor
}

/// One multi-armed spiral ring.
fn spiral_ring(
    rng: &mut SmallRng,
    palette: &ThemePalette,
    count: usize,
    arms: u32,
    (r0, r1): (f32, f32),
) -> Vec<FloorParticle> {
    (0..count)
        .map(|k| {
            let t = k as f32 / count as f32;
            let arm = (k as u32 % arms) as f32;
            FloorParticle {
                distance: r0 + t * (r1 - r0) + rng.gen_range(-0.5..0.5),
                angle: (arm * TAU / arms as f32 + t * TAU * 0.8 + rng.gen_range(-0.04..0.04))
                    .rem_euclid(TAU),
                vertical_offset: (t * TAU * 2.0).sin() * 0.4,
                color: ring_color(rng, palette, 1.0),
            }
        })
        .collect()
}

fn ring_color(rng: &mut SmallRng, palette: &ThemePalette, dim: f32) -> Vec3 {
    palette.ring * rng.gen_range(0.7..1.1) * dim
}

/// Generate the decorative dust volume.
pub(crate) fn generate_dust(count: u32, palette: &ThemePalette, base_seed: u64) -> Vec<DustParticle> {
    let mut rng = SmallRng::seed_from_u64(base_seed ^ 0xD057_D057_D057_D057);
    (0..count)
        .map(|_| DustParticle {
            position: Vec3::new(
                rng.gen_range(-DUST_HALF_SIZE..DUST_HALF_SIZE),
                rng.gen_range(-DUST_HALF_SIZE..DUST_HALF_SIZE),
                rng.gen_range(-DUST_HALF_SIZE..DUST_HALF_SIZE),
            ),
            color: palette.dust * rng.gen_range(0.5..1.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn test_descriptor_ranges() {
        let tier_count = 72;
        for i in 0..2000 {
            let mut ctx = SpawnContext::new(i, 2000, 7);
            let d = sample_descriptor(&mut ctx, tier_count);
            assert!(d.branch_fraction >= 0.0 && d.branch_fraction < 1.0);
            assert!(d.tier < tier_count);
            assert!(d.branch_angle >= 0.0 && d.branch_angle < TAU);
        }
    }

    #[test]
    fn test_tier_bias_favors_base() {
        // The u^0.35 draw should send well over half the particles into the
        // upper half of the tier range (the broad base).
        let tier_count = 64;
        let mut high = 0;
        let total = 10_000;
        for i in 0..total {
            let mut ctx = SpawnContext::new(i, total, 21);
            let d = sample_descriptor(&mut ctx, tier_count);
            if d.tier >= tier_count / 2 {
                high += 1;
            }
        }
        assert!(high > total * 3 / 4, "only {}/{} in upper tiers", high, total);
    }

    #[test]
    fn test_branch_angle_quantized() {
        for i in 0..500 {
            let mut ctx = SpawnContext::new(i, 500, 3);
            let d = sample_descriptor(&mut ctx, 40);
            let arms = (BASE_ARM_COUNT + d.tier) as f32;
            let spoke = d.branch_angle * arms / TAU;
            assert!(
                (spoke - spoke.round()).abs() < 1e-4,
                "angle {} not on a spoke of {}",
                d.branch_angle,
                arms
            );
        }
    }

    #[test]
    fn test_jitter_magnitude_by_kind() {
        let mut ctx = SpawnContext::new(0, 1, 5);
        for _ in 0..200 {
            let branch = sample_jitter(&mut ctx, true);
            let needle = sample_jitter(&mut ctx, false);
            assert!(branch.abs().max_element() <= 0.15 + 1e-6);
            assert!(needle.abs().max_element() <= 1.5 + 1e-6);
        }
    }

    #[test]
    fn test_generation_is_seed_stable() {
        let palette = Theme::Classic.palette();
        let a = generate_tree_field(64, 8, &palette, 1234);
        let b = generate_tree_field(64, 8, &palette, 1234);
        assert_eq!(a.descriptors, b.descriptors);
        assert_eq!(a.jitters, b.jitters);
        assert_eq!(a.colors, b.colors);
        assert_eq!(a.positions, b.positions);
    }

    #[test]
    fn test_floor_rings_ordered_and_connectors_in_gaps() {
        assert!(INNER_RING_RADII.1 < MID_RING_RADII.0);
        assert!(MID_RING_RADII.1 < OUTER_RING_RADII.0);

        let palette = Theme::Classic.palette();
        let floor = generate_floor(&palette, 99);
        for p in &floor {
            assert!(p.distance >= INNER_RING_RADII.0 - 0.6);
            assert!(p.distance <= OUTER_RING_RADII.1 + 0.6);
            assert!(p.angle >= 0.0 && p.angle < TAU);
        }
    }

    #[test]
    fn test_dust_within_volume() {
        let palette = Theme::Ice.palette();
        for d in generate_dust(300, &palette, 4) {
            assert!(d.position.abs().max_element() <= DUST_HALF_SIZE);
        }
    }
}
