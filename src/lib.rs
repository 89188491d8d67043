//! # starbough - procedural point-cloud scene engine
//!
//! starbough animates a radiant particle tree that morphs into a scattered
//! star-field, over an orbiting ring floor, drifting dust, and a pool of
//! recyclable streaking meteors. It is the simulation core only: it owns
//! every particle buffer and eased scalar, and leaves rasterization, hand
//! tracking, and UI wiring to external collaborators.
//!
//! ## Quick Start
//!
//! ```ignore
//! use starbough::prelude::*;
//!
//! let mut scene = Scene::builder()
//!     .with_particle_count(100_000)
//!     .with_theme(Theme::Classic)
//!     .build()?;
//!
//! // once per display refresh:
//! scene.set_hand_signal(tracker.poll());   // None is fine
//! scene.update();
//! renderer.draw(scene.positions(), scene.colors(), scene.group_rotation());
//! ```
//!
//! ## Core Concepts
//!
//! ### Descriptors
//!
//! Every tree particle gets an immutable [`ParticleDescriptor`] at creation:
//! branch tier, angle, fraction along the branch, and a fixed jitter
//! vector. Descriptors never change; only positions and colors do.
//!
//! ### Fields
//!
//! A field is a pure function mapping (descriptor, time) to a target
//! position. [`SceneMode::Tree`] and [`SceneMode::Scatter`] select entirely
//! different fields; the switch is a swap, not a blend.
//!
//! ### Convergence
//!
//! Each frame, every particle closes a fixed fraction of the distance to
//! its target (`α = 0.06`), so mode switches, sway, and rotation all read
//! as smooth inertia rather than jumps.
//!
//! ### Interaction
//!
//! Pointer drags rotate the scene group; a release that traveled less than
//! five pixels counts as a click and cycles the mode. An optional
//! hand-position signal nudges the same rotation target.

pub mod error;
pub mod field;
pub mod input;
pub mod meteor;
pub mod scene;
pub mod spawn;
pub mod theme;
pub mod time;

pub use bytemuck;
pub use error::SceneError;
pub use field::{tree_target, scatter_target, TreeShape};
pub use glam::{Vec2, Vec3};
pub use input::{PointerGesture, PointerTracker};
pub use meteor::{Meteor, MeteorPool};
pub use scene::{EngineState, Scene, SceneBuilder, SceneMode};
pub use spawn::{DustParticle, FloorParticle, ParticleDescriptor, SpawnContext};
pub use theme::{Theme, ThemePalette};
pub use time::Time;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use starbough::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::SceneError;
    pub use crate::field::TreeShape;
    pub use crate::input::PointerGesture;
    pub use crate::meteor::Meteor;
    pub use crate::scene::{Scene, SceneBuilder, SceneMode};
    pub use crate::spawn::{DustParticle, FloorParticle, ParticleDescriptor};
    pub use crate::theme::{Theme, ThemePalette};
    pub use crate::time::Time;
    pub use crate::{Vec2, Vec3};
}
