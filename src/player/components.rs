use bevy::{
    ecs::{component::ComponentId, world::DeferredWorld},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::backend::CollisionLayers;

/// Vertical velocity a grounded, falling character is reset to before gravity is
/// integrated. Keeps the body pressed onto the surface.
pub const CONTACT_BIAS: f32 = -2.0;

/// Minimum squared magnitude of the look delta before the camera reacts.
pub const LOOK_THRESHOLD: f32 = 0.01;

/// Speeds and look sensitivity for a first-person character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub run_speed: f32,
    pub walk_speed: f32,
    pub sprint_speed: f32,
    /// Degrees of rotation per unit of look input. Not scaled by frame time.
    pub mouse_sensitivity: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            run_speed: 3.0,
            walk_speed: 1.5,
            sprint_speed: 6.0,
            mouse_sensitivity: 1.5,
        }
    }
}

/// Gravity and ground check settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Colliders the ground check is allowed to hit.
    pub layers: CollisionLayers,
    /// Vertical acceleration, negative pulls down.
    pub gravity: f32,
    /// Radius of the check sphere.
    pub radius: f32,
    /// Subtracted from the body height to place the check sphere.
    pub offset: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            layers: CollisionLayers::GROUND,
            gravity: -9.81,
            radius: 0.22,
            offset: -0.2,
        }
    }
}

/// Pitch clamp in degrees. `pitch_min <= pitch_max` is up to whoever writes the config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchLimits {
    pub pitch_min: f32,
    pub pitch_max: f32,
}

impl Default for PitchLimits {
    fn default() -> Self {
        Self {
            pitch_min: -60.0,
            pitch_max: 70.0,
        }
    }
}

/// Camera anchor handle plus pitch limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Entity whose local rotation carries the pitch. Usually a child of the body.
    pub anchor: Option<Entity>,
    pub pitch_min: f32,
    pub pitch_max: f32,
}

impl CameraConfig {
    pub fn new(anchor: Option<Entity>, limits: PitchLimits) -> Self {
        Self {
            anchor,
            pitch_min: limits.pitch_min,
            pitch_max: limits.pitch_max,
        }
    }

    pub fn limits(&self) -> PitchLimits {
        PitchLimits {
            pitch_min: self.pitch_min,
            pitch_max: self.pitch_max,
        }
    }
}

impl PitchLimits {
    /// Clamps `pitch` into the limits. Inverted limits resolve to `pitch_max`
    /// instead of panicking.
    pub fn clamp(&self, pitch: f32) -> f32 {
        pitch.max(self.pitch_min).min(self.pitch_max)
    }
}

/// Local rotation of the camera anchor for a pitch in degrees. Positive pitch looks down.
pub fn anchor_rotation(pitch: f32) -> Quat {
    Quat::from_rotation_x(-pitch.to_radians())
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::new(None, PitchLimits::default())
    }
}

/// Input for one frame, written by whatever drives the character.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionInput {
    /// Strafe on x, forward on y. Each axis in [-1, 1].
    pub move_axis: Vec2,
    /// Look delta for this frame. Positive x turns right, positive y looks down.
    pub look: Vec2,
    pub sprint: bool,
    pub walk: bool,
}

/// Per-character runtime state. Only the locomotion systems write to it.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionState {
    pub(crate) vertical_velocity: f32,
    pub(crate) grounded: bool,
    pub(crate) pitch: f32,
    pub(crate) target_speed: f32,
}

impl LocomotionState {
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Ground contact as of the last grounded check.
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    /// Accumulated camera pitch in degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }
}

/// First-person character body. Configuration is fixed at spawn and only exposed
/// read-only.
///
/// The body must be a root entity: its local `Transform` is read as the world-space
/// basis and the backend moves it in world space.
#[derive(Component, Debug, Clone, Default)]
#[require(LocomotionState, LocomotionInput, Transform)]
#[component(on_add = clamp_initial_pitch)]
pub struct FirstPersonController {
    movement: MovementConfig,
    ground: GroundConfig,
    camera: CameraConfig,
}

impl FirstPersonController {
    pub fn new(movement: MovementConfig, ground: GroundConfig, camera: CameraConfig) -> Self {
        Self {
            movement,
            ground,
            camera,
        }
    }

    pub fn movement(&self) -> &MovementConfig {
        &self.movement
    }

    pub fn ground(&self) -> &GroundConfig {
        &self.ground
    }

    pub fn camera(&self) -> &CameraConfig {
        &self.camera
    }
}

/// Pulls the starting pitch into the camera limits so it holds before the first look.
fn clamp_initial_pitch(mut world: DeferredWorld, entity: Entity, _: ComponentId) {
    let Some(camera) = world
        .get::<FirstPersonController>(entity)
        .map(|controller| *controller.camera())
    else {
        return;
    };

    let pitch = {
        let Some(mut state) = world.get_mut::<LocomotionState>(entity) else {
            return;
        };
        let pitch = camera.limits().clamp(state.pitch);
        if pitch == state.pitch {
            return;
        }
        state.pitch = pitch;
        pitch
    };

    let anchor = match camera.anchor {
        Some(anchor) => world.get_mut::<Transform>(anchor),
        None => None,
    };
    if let Some(mut transform) = anchor {
        transform.rotation = anchor_rotation(pitch);
    }
}

/// Marker for the entity carrying the first-person camera.
#[derive(Component)]
pub struct CameraAnchor;

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(anchor: Option<Entity>, limits: PitchLimits) -> FirstPersonController {
        FirstPersonController::new(
            MovementConfig::default(),
            GroundConfig::default(),
            CameraConfig::new(anchor, limits),
        )
    }

    #[test]
    fn starting_pitch_is_pulled_into_limits() {
        let mut world = World::new();
        let anchor = world.spawn(Transform::default()).id();
        let limits = PitchLimits {
            pitch_min: 10.0,
            pitch_max: 20.0,
        };
        let player = world.spawn(controller(Some(anchor), limits)).id();

        let state = world.get::<LocomotionState>(player).unwrap();
        assert_eq!(state.pitch(), 10.0);
        let rotation = world.get::<Transform>(anchor).unwrap().rotation;
        assert!(rotation.angle_between(anchor_rotation(10.0)) < 1e-5);
    }

    #[test]
    fn starting_pitch_inside_limits_is_left_alone() {
        let mut world = World::new();
        let anchor = world.spawn(Transform::default()).id();
        let player = world
            .spawn(controller(Some(anchor), PitchLimits::default()))
            .id();

        assert_eq!(world.get::<LocomotionState>(player).unwrap().pitch(), 0.0);
        assert_eq!(world.get::<Transform>(anchor).unwrap().rotation, Quat::IDENTITY);
    }

    #[test]
    fn starting_pitch_clamps_without_anchor() {
        let mut world = World::new();
        let limits = PitchLimits {
            pitch_min: -30.0,
            pitch_max: -5.0,
        };
        let player = world.spawn(controller(None, limits)).id();

        assert_eq!(world.get::<LocomotionState>(player).unwrap().pitch(), -5.0);
    }

    #[test]
    fn inverted_limits_do_not_panic() {
        let limits = PitchLimits {
            pitch_min: 20.0,
            pitch_max: 10.0,
        };
        assert_eq!(limits.clamp(0.0), 10.0);
    }
}
