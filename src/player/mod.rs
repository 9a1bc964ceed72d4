pub mod components;
pub mod systems;

use std::marker::PhantomData;

use bevy::{prelude::*, transform::TransformSystem};

pub use components::{
    CameraAnchor, CameraConfig, FirstPersonController, GroundConfig, LocomotionInput,
    LocomotionState, MovementConfig, PitchLimits, CONTACT_BIAS, LOOK_THRESHOLD,
};

use crate::backend::LocomotionBackend;
use crate::camera::systems::camera_rotation;
use systems::{apply_gravity, grounded_check, movement};

/// Per-frame phases of the controller.
///
/// `Logic` runs in `Update` and `Late` in `PostUpdate`, so every character finishes
/// its logic tick before any camera is rotated.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    /// Movement, then gravity, then the grounded check.
    Logic,
    /// Camera pitch and body yaw.
    Late,
}

/// Locomotion and camera control for [`FirstPersonController`] entities, using the
/// physics backend `B`.
pub struct FirstPersonPlugin<B: LocomotionBackend> {
    _marker: PhantomData<B>,
}

impl<B: LocomotionBackend> Default for FirstPersonPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<B: LocomotionBackend> Plugin for FirstPersonPlugin<B> {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (movement::<B>, apply_gravity, grounded_check::<B>)
                .chain()
                .in_set(LocomotionSet::Logic),
        )
        .add_systems(
            PostUpdate,
            camera_rotation
                .in_set(LocomotionSet::Late)
                .before(TransformSystem::TransformPropagate),
        );
    }
}
