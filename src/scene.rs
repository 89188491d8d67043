//! Scene builder and the per-frame integrator pass.
//!
//! [`Scene`] owns every buffer in the system: tree particle positions and
//! colors, the static floor and dust layouts, the meteor pool, and the
//! handful of eased scalars (group rotation, floor offset, heart pulse).
//! One [`Scene::update`] call per display refresh advances all of it;
//! the external renderer then reads the buffers between frames. There is
//! exactly one writer and no locking; the frame boundary is the
//! happens-before edge.
//!
//! # Example
//!
//! ```ignore
//! use starbough::{Scene, Theme};
//!
//! let mut scene = Scene::builder()
//!     .with_particle_count(100_000)
//!     .with_theme(Theme::Classic)
//!     .build()?;
//!
//! // each display refresh:
//! scene.update();
//! renderer.upload(scene.position_bytes(), scene.color_bytes());
//! ```

use crate::error::SceneError;
use crate::field::{
    self, approach, approach_scalar, TreeShape, EASE_ALPHA, FLOOR_OFFSET_SCATTER,
    FLOOR_OFFSET_TREE, FLOOR_SPIN_RATE, PARTICLE_ALPHA,
};
use crate::input::{PointerGesture, PointerTracker};
use crate::meteor::{Meteor, MeteorPool};
use crate::spawn::{
    self, DustParticle, FloorParticle, ParticleDescriptor,
};
use crate::theme::Theme;
use crate::time::Time;
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::f32::consts::TAU;

const DEFAULT_PARTICLE_COUNT: u32 = 100_000;
const DEFAULT_DUST_COUNT: u32 = 800;
const DEFAULT_METEOR_COUNT: u32 = 10;
const DEFAULT_VIEWPORT: (u32, u32) = (1280, 720);

/// Hand-signal horizontal gain feeding the yaw target.
const HAND_YAW_GAIN: f32 = 0.35;
/// Hand-signal vertical gain feeding the pitch target.
const HAND_PITCH_GAIN: f32 = 0.18;

const HEART_PULSE_RATE: f32 = 2.4;
const HEART_PULSE_AMPLITUDE: f32 = 0.18;
const HEART_SPIN_RATE: f32 = 0.8;

/// Which target field the particles ease toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneMode {
    /// The radiant tree.
    #[default]
    Tree,
    /// The scattered star-field orbit.
    Scatter,
}

impl SceneMode {
    /// Next entry in the fixed cycle, wrapping.
    pub fn next(self) -> SceneMode {
        match self {
            SceneMode::Tree => SceneMode::Scatter,
            SceneMode::Scatter => SceneMode::Tree,
        }
    }
}

/// The mutable engine state the interaction collaborators write into.
///
/// Single writer at a time: UI glue mutates it between frames, the
/// integrator reads it once per frame. No ambient globals: the scene owns
/// one instance and passes it where needed.
#[derive(Debug)]
pub struct EngineState {
    mode: SceneMode,
    theme: Theme,
    /// Last known hand landmark, mapped to [-1, 1]².
    hand_signal: Vec2,
    pointer: PointerTracker,
}

impl EngineState {
    fn new(theme: Theme) -> Self {
        Self {
            mode: SceneMode::default(),
            theme,
            hand_signal: Vec2::ZERO,
            pointer: PointerTracker::new(),
        }
    }

    /// The rotation the whole scene group eases toward: hand signal and
    /// manual drag combined linearly, `(pitch, yaw)`.
    fn rotation_target(&self) -> Vec2 {
        let manual = self.pointer.manual_rotation();
        Vec2::new(
            self.hand_signal.y * HAND_PITCH_GAIN + manual.x,
            self.hand_signal.x * HAND_YAW_GAIN + manual.y,
        )
    }
}

/// Chained configuration for [`Scene`].
///
/// Defaults match the full production scene; tests shrink the counts.
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    particle_count: u32,
    shape: TreeShape,
    theme: Theme,
    seed: Option<u64>,
    dust_count: u32,
    meteor_count: u32,
    viewport: (u32, u32),
}

impl SceneBuilder {
    /// Set the tree particle count.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the number of branch tiers.
    pub fn with_tier_count(mut self, count: u32) -> Self {
        self.shape.tier_count = count;
        self
    }

    /// Override the tree envelope entirely.
    pub fn with_tree_shape(mut self, shape: TreeShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the starting theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Fix the random seed. Generation becomes fully reproducible; without
    /// it the seed derives from the system clock.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the dust mote count.
    pub fn with_dust_count(mut self, count: u32) -> Self {
        self.dust_count = count;
        self
    }

    /// Set the meteor pool size.
    pub fn with_meteor_count(mut self, count: u32) -> Self {
        self.meteor_count = count;
        self
    }

    /// Set the display surface size the projection is derived from.
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = (width, height);
        self
    }

    /// Validate the configuration and generate the scene.
    ///
    /// Fails fast on degenerate input: the field formulas divide by the
    /// tier count, and an empty particle field is a caller bug.
    pub fn build(self) -> Result<Scene, SceneError> {
        if self.particle_count == 0 {
            return Err(SceneError::DegenerateParticleCount);
        }
        if self.shape.tier_count == 0 {
            return Err(SceneError::DegenerateTierCount);
        }

        let base_seed = self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });

        let palette = self.theme.palette();
        let tree = spawn::generate_tree_field(
            self.particle_count,
            self.shape.tier_count,
            &palette,
            base_seed,
        );
        let floor = spawn::generate_floor(&palette, base_seed);
        let dust = spawn::generate_dust(self.dust_count, &palette, base_seed);

        let aspect = self.viewport.0 as f32 / self.viewport.1.max(1) as f32;
        let meteors = MeteorPool::new(self.meteor_count, aspect, base_seed);

        Ok(Scene {
            shape: self.shape,
            state: EngineState::new(self.theme),
            time: Time::new(),
            descriptors: tree.descriptors,
            jitters: tree.jitters,
            positions: tree.positions,
            colors: tree.colors,
            floor,
            dust,
            meteors,
            group_rotation: Vec2::ZERO,
            floor_offset: FLOOR_OFFSET_TREE,
            floor_rotation: 0.0,
            heart_scale: 1.0,
            heart_rotation: 0.0,
            recolor_rng: SmallRng::seed_from_u64(base_seed ^ 0xC010_4C01_0EC0_10E5),
        })
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            shape: TreeShape::default(),
            theme: Theme::default(),
            seed: None,
            dust_count: DEFAULT_DUST_COUNT,
            meteor_count: DEFAULT_METEOR_COUNT,
            viewport: DEFAULT_VIEWPORT,
        }
    }
}

/// The animated point-cloud scene.
///
/// Descriptors and jitters are immutable after construction; positions and
/// colors are the only per-particle state that ever changes. The renderer
/// reads the buffers between [`update`](Scene::update) calls.
pub struct Scene {
    shape: TreeShape,
    state: EngineState,
    time: Time,

    descriptors: Vec<ParticleDescriptor>,
    jitters: Vec<Vec3>,
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,

    floor: Vec<FloorParticle>,
    dust: Vec<DustParticle>,
    meteors: MeteorPool,

    group_rotation: Vec2,
    floor_offset: f32,
    floor_rotation: f32,
    heart_scale: f32,
    heart_rotation: f32,

    recolor_rng: SmallRng,
}

impl Scene {
    /// Start configuring a scene.
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    // ========== Frame loop ==========

    /// Advance one frame: ease every animated quantity toward its freshly
    /// evaluated target and recycle the meteor pool.
    ///
    /// Call once per display refresh. The pass is O(particle count), never
    /// blocks, and either completes or the process dies with it; there is
    /// no partial-frame recovery.
    pub fn update(&mut self) {
        let (elapsed, dt) = self.time.update();

        let rotation_target = self.state.rotation_target();
        self.group_rotation = Vec2::new(
            approach_scalar(self.group_rotation.x, rotation_target.x, EASE_ALPHA),
            approach_scalar(self.group_rotation.y, rotation_target.y, EASE_ALPHA),
        );

        let floor_target = match self.state.mode {
            SceneMode::Tree => FLOOR_OFFSET_TREE,
            SceneMode::Scatter => FLOOR_OFFSET_SCATTER,
        };
        self.floor_offset = approach_scalar(self.floor_offset, floor_target, EASE_ALPHA);
        self.floor_rotation = (self.floor_rotation + FLOOR_SPIN_RATE * dt).rem_euclid(TAU);

        let pulse = 1.0 + (elapsed * HEART_PULSE_RATE).sin() * HEART_PULSE_AMPLITUDE;
        self.heart_scale = approach_scalar(self.heart_scale, pulse, EASE_ALPHA);
        self.heart_rotation = (self.heart_rotation + HEART_SPIN_RATE * dt).rem_euclid(TAU);

        let count = self.positions.len() as u32;
        match self.state.mode {
            SceneMode::Tree => {
                for (i, position) in self.positions.iter_mut().enumerate() {
                    let target = field::tree_target(
                        &self.descriptors[i],
                        self.jitters[i],
                        &self.shape,
                        elapsed,
                    );
                    *position = approach(*position, target, PARTICLE_ALPHA);
                }
            }
            SceneMode::Scatter => {
                for (i, position) in self.positions.iter_mut().enumerate() {
                    let target = field::scatter_target(i as u32, count, elapsed);
                    *position = approach(*position, target, PARTICLE_ALPHA);
                }
            }
        }

        self.meteors.advance(dt);
    }

    /// Drive the clock with a fixed timestep (deterministic updates), or
    /// `None` for wall-clock timing.
    pub fn set_fixed_timestep(&mut self, delta: Option<f32>) {
        self.time.set_fixed_delta(delta);
    }

    // ========== Interaction surface ==========

    /// Pointer button went down at `position` (pixels).
    pub fn pointer_pressed(&mut self, position: Vec2) {
        self.state.pointer.press(position);
    }

    /// Pointer moved; accumulates manual rotation only while held.
    pub fn pointer_moved(&mut self, position: Vec2) {
        self.state.pointer.drag(position);
    }

    /// Pointer button released. A click-classified gesture cycles the mode.
    pub fn pointer_released(&mut self, position: Vec2) -> Option<PointerGesture> {
        let gesture = self.state.pointer.release(position)?;
        if gesture == PointerGesture::Click {
            self.state.mode = self.state.mode.next();
        }
        Some(gesture)
    }

    /// Feed the latest hand landmark, `(x, y) ∈ [0, 1]²`.
    ///
    /// `None` means the tracker has nothing this frame (not ready, or
    /// tracking lost); the last known signal stays in effect.
    pub fn set_hand_signal(&mut self, signal: Option<Vec2>) {
        if let Some(s) = signal {
            self.state.hand_signal = s * 2.0 - Vec2::ONE;
        }
    }

    /// Advance to the next mode in the cycle (the UI button path).
    pub fn cycle_mode(&mut self) {
        self.state.mode = self.state.mode.next();
    }

    /// Switch the active theme and recolor every tree particle.
    ///
    /// Colors are re-sampled with a fresh draw, so ornament placement may
    /// differ between two switches to the same theme. Descriptors, jitters
    /// and positions are untouched; the floor and dust keep their creation
    /// colors.
    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
        let palette = theme.palette();
        for (i, color) in self.colors.iter_mut().enumerate() {
            *color = spawn::sample_color(
                &mut self.recolor_rng,
                &palette,
                self.descriptors[i].is_branch,
            );
        }
    }

    /// [`set_theme`](Scene::set_theme) by name; unknown names fail fast.
    pub fn set_theme_by_name(&mut self, name: &str) -> Result<(), SceneError> {
        let theme = Theme::from_name(name)?;
        self.set_theme(theme);
        Ok(())
    }

    /// The display surface changed size. Reconfigures projection-derived
    /// spawn extents only; particle state is untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        let aspect = width as f32 / height.max(1) as f32;
        self.meteors.set_aspect(aspect);
    }

    // ========== Read surface for the renderer ==========

    /// Current particle positions, one per particle, updated in place each
    /// frame.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Current particle colors.
    #[inline]
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Position buffer as raw bytes, ready for upload.
    #[inline]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Color buffer as raw bytes, ready for upload.
    #[inline]
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Immutable per-particle descriptors.
    #[inline]
    pub fn descriptors(&self) -> &[ParticleDescriptor] {
        &self.descriptors
    }

    /// Immutable per-particle jitter offsets.
    #[inline]
    pub fn jitters(&self) -> &[Vec3] {
        &self.jitters
    }

    /// The static floor ring layout.
    #[inline]
    pub fn floor(&self) -> &[FloorParticle] {
        &self.floor
    }

    /// The static dust volume.
    #[inline]
    pub fn dust(&self) -> &[DustParticle] {
        &self.dust
    }

    /// The meteor pool.
    #[inline]
    pub fn meteors(&self) -> &[Meteor] {
        self.meteors.meteors()
    }

    /// Eased scene-group rotation, `(pitch, yaw)` radians.
    #[inline]
    pub fn group_rotation(&self) -> Vec2 {
        self.group_rotation
    }

    /// Eased vertical offset of the rigid floor body.
    #[inline]
    pub fn floor_offset(&self) -> f32 {
        self.floor_offset
    }

    /// Continuous floor spin angle.
    #[inline]
    pub fn floor_rotation(&self) -> f32 {
        self.floor_rotation
    }

    /// Eased pulse scale of the heart ornament.
    #[inline]
    pub fn heart_scale(&self) -> f32 {
        self.heart_scale
    }

    /// Continuous spin angle of the heart ornament.
    #[inline]
    pub fn heart_rotation(&self) -> f32 {
        self.heart_rotation
    }

    /// The active mode.
    #[inline]
    pub fn mode(&self) -> SceneMode {
        self.state.mode
    }

    /// The active theme.
    #[inline]
    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    /// The tree envelope this scene was built with.
    #[inline]
    pub fn tree_shape(&self) -> TreeShape {
        self.shape
    }
}
