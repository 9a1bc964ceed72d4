use bevy::{log::warn_once, prelude::*};

use super::components::{
    FirstPersonController, GroundConfig, LocomotionInput, LocomotionState, MovementConfig,
    CONTACT_BIAS,
};
use crate::backend::LocomotionBackend;

/// Picks the speed for this frame. First match wins: no input, sprint, walk, run.
pub fn target_speed(input: &LocomotionInput, config: &MovementConfig) -> f32 {
    if input.move_axis == Vec2::ZERO {
        return 0.0;
    }

    if input.sprint {
        config.sprint_speed
    } else if input.walk {
        config.walk_speed
    } else {
        config.run_speed
    }
}

/// World-space direction for the move axes, relative to the body's basis.
pub fn move_direction(move_axis: Vec2, right: Vec3, forward: Vec3) -> Vec3 {
    if move_axis == Vec2::ZERO {
        return Vec3::ZERO;
    }
    right * move_axis.x + forward * move_axis.y
}

/// Displacement handed to the motor for one frame.
pub fn displacement(direction: Vec3, speed: f32, vertical_velocity: f32, dt: f32) -> Vec3 {
    direction.normalize_or_zero() * (speed * dt) + Vec3::new(0.0, vertical_velocity, 0.0) * dt
}

/// Resets a grounded, falling body to [`CONTACT_BIAS`], then accumulates gravity.
pub fn integrate_gravity(vertical_velocity: f32, grounded: bool, gravity: f32, dt: f32) -> f32 {
    let mut velocity = vertical_velocity;
    if grounded && velocity < 0.0 {
        velocity = CONTACT_BIAS;
    }
    velocity + gravity * dt
}

/// Center of the ground check sphere.
pub fn ground_check_center(position: Vec3, config: &GroundConfig) -> Vec3 {
    position - Vec3::new(0.0, config.offset, 0.0)
}

/// Computes each controller's displacement and submits it to the backend.
///
/// The body's local `Transform` is taken as its world-space basis, so bodies are
/// expected to be root entities.
pub fn movement<B: LocomotionBackend>(world: &mut World) {
    let dt = world.resource::<Time>().delta_secs();

    let mut moves: Vec<(Entity, Vec3)> = Vec::new();
    let mut query = world.query::<(
        Entity,
        &Transform,
        &LocomotionInput,
        &FirstPersonController,
        &mut LocomotionState,
        Has<Parent>,
    )>();

    for (entity, transform, input, controller, mut state, parented) in query.iter_mut(world) {
        if parented {
            warn_once!(
                "First-person controller {:?} has a parent, it will move in the parent's frame",
                entity
            );
        }

        let speed = target_speed(input, controller.movement());
        state.target_speed = speed;

        let direction = move_direction(
            input.move_axis,
            transform.right().as_vec3(),
            transform.forward().as_vec3(),
        );
        moves.push((
            entity,
            displacement(direction, speed, state.vertical_velocity, dt),
        ));
    }

    for (entity, delta) in moves {
        B::move_character(world, entity, delta);
    }
}

/// Integrates gravity using the ground contact from the previous grounded check.
pub fn apply_gravity(
    time: Res<Time>,
    mut query: Query<(&FirstPersonController, &mut LocomotionState)>,
) {
    let dt = time.delta_secs();

    for (controller, mut state) in query.iter_mut() {
        state.vertical_velocity = integrate_gravity(
            state.vertical_velocity,
            state.grounded,
            controller.ground().gravity,
            dt,
        );
    }
}

/// Casts a sphere below each controller and stores the ground contact.
pub fn grounded_check<B: LocomotionBackend>(world: &mut World) {
    let checks: Vec<(Entity, Vec3, GroundConfig)> = world
        .query::<(Entity, &Transform, &FirstPersonController)>()
        .iter(world)
        .map(|(entity, transform, controller)| {
            let config = *controller.ground();
            (
                entity,
                ground_check_center(transform.translation, &config),
                config,
            )
        })
        .collect();

    for (entity, center, config) in checks {
        let grounded = B::check_sphere(world, center, config.radius, config.layers);

        let Some(mut state) = world.get_mut::<LocomotionState>(entity) else {
            continue;
        };
        if state.grounded != grounded {
            debug!(
                "Character {:?} {} ground at {:?}",
                entity,
                if grounded { "touched" } else { "left" },
                center
            );
        }
        state.grounded = grounded;
    }
}
