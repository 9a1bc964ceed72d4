use bevy::math::bounding::{Aabb3d, BoundingSphere, IntersectsVolume};
use bevy::prelude::*;

use super::{CollisionLayers, LocomotionBackend};

/// Penetration below this is treated as touching, not overlapping.
const SKIN: f32 = 1e-4;

/// Axis-aligned static box collider, centered on the entity's translation.
#[derive(Component, Debug, Clone, Copy)]
pub struct StaticCollider {
    pub half_extents: Vec3,
    pub layers: CollisionLayers,
}

impl StaticCollider {
    pub fn new(half_extents: Vec3, layers: CollisionLayers) -> Self {
        Self {
            half_extents,
            layers,
        }
    }
}

/// Box volume of a character whose translation sits at its feet.
#[derive(Component, Debug, Clone, Copy)]
pub struct CharacterBody {
    pub radius: f32,
    pub height: f32,
    /// Layers the body is blocked by.
    pub collides_with: CollisionLayers,
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self {
            radius: 0.3,
            height: 1.8,
            collides_with: CollisionLayers::ALL,
        }
    }
}

impl CharacterBody {
    fn bounds_at(&self, feet: Vec3) -> Aabb3d {
        let half = Vec3::new(self.radius, self.height * 0.5, self.radius);
        Aabb3d::new(feet + Vec3::Y * half.y, half)
    }
}

/// Minimal kinematic physics over [`StaticCollider`] boxes.
///
/// Movement is split into substeps no longer than the body radius and resolved one
/// axis at a time, vertical first, so the body slides along walls and rests on floors.
pub struct KinematicBackend;

impl LocomotionBackend for KinematicBackend {
    fn move_character(world: &mut World, entity: Entity, displacement: Vec3) {
        let body = world.get::<CharacterBody>(entity).copied();

        let colliders: Vec<Aabb3d> = match body {
            Some(body) => world
                .query::<(&Transform, &StaticCollider)>()
                .iter(world)
                .filter(|(_, collider)| collider.layers.intersects(body.collides_with))
                .map(|(transform, collider)| {
                    Aabb3d::new(transform.translation, collider.half_extents)
                })
                .collect(),
            None => Vec::new(),
        };

        let Some(mut transform) = world.get_mut::<Transform>(entity) else {
            return;
        };

        // Bodies without a volume are moved as points
        let Some(body) = body else {
            transform.translation += displacement;
            return;
        };

        let max_step = body.radius.max(0.05);
        let steps = (displacement.length() / max_step).ceil().max(1.0) as u32;
        let step = displacement / steps as f32;

        let mut position = transform.translation;
        for _ in 0..steps {
            for axis in [Vec3::Y, Vec3::X, Vec3::Z] {
                let delta = step.dot(axis);
                if delta == 0.0 {
                    continue;
                }
                position += axis * delta;
                position = resolve_axis(&body, position, axis, delta, &colliders);
            }
        }

        transform.translation = position;
    }

    fn check_sphere(world: &mut World, center: Vec3, radius: f32, layers: CollisionLayers) -> bool {
        let sphere = BoundingSphere::new(center, radius);
        world
            .query::<(&Transform, &StaticCollider)>()
            .iter(world)
            .filter(|(_, collider)| collider.layers.intersects(layers))
            .any(|(transform, collider)| {
                Aabb3d::new(transform.translation, collider.half_extents).intersects(&sphere)
            })
    }
}

/// Pushes the body back out of every collider it penetrates along `axis`.
fn resolve_axis(
    body: &CharacterBody,
    mut position: Vec3,
    axis: Vec3,
    delta: f32,
    colliders: &[Aabb3d],
) -> Vec3 {
    for collider in colliders {
        let bounds = body.bounds_at(position);
        if !overlaps(&bounds, collider) {
            continue;
        }
        let push = if delta > 0.0 {
            -(Vec3::from(bounds.max) - Vec3::from(collider.min)).dot(axis)
        } else {
            (Vec3::from(collider.max) - Vec3::from(bounds.min)).dot(axis)
        };
        position += axis * push;
    }
    position
}

/// Strict overlap; boxes that only share a face do not count.
fn overlaps(a: &Aabb3d, b: &Aabb3d) -> bool {
    let a_min = Vec3::from(a.min);
    let a_max = Vec3::from(a.max);
    let b_min = Vec3::from(b.min);
    let b_max = Vec3::from(b.max);
    (a_max - b_min).min_element() > SKIN && (b_max - a_min).min_element() > SKIN
}
