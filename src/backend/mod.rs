//! Physics collaborators used by the locomotion systems.
//!
//! The controller never moves a body or inspects world geometry directly. It hands
//! a displacement to [`LocomotionBackend::move_character`] and asks
//! [`LocomotionBackend::check_sphere`] whether the ground check touches anything.
//! Swap the backend to run the same controller on a different physics engine.

pub mod kinematic;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub use kinematic::{CharacterBody, KinematicBackend, StaticCollider};

/// Bitmask of collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollisionLayers(pub u32);

impl CollisionLayers {
    pub const NONE: Self = Self(0);
    pub const GROUND: Self = Self(1 << 0);
    pub const WALLS: Self = Self(1 << 1);
    pub const ALL: Self = Self(u32::MAX);

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for CollisionLayers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Swept motion and overlap queries, implemented by a physics integration.
///
/// Both calls are synchronous and run inside exclusive systems, so an implementation
/// is free to read and write any part of the world.
pub trait LocomotionBackend: Send + Sync + 'static {
    /// Moves `entity` by `displacement` in world space, resolving collisions.
    fn move_character(world: &mut World, entity: Entity, displacement: Vec3);

    /// Returns true if any collider on `layers` overlaps the sphere.
    fn check_sphere(world: &mut World, center: Vec3, radius: f32, layers: CollisionLayers) -> bool;
}
