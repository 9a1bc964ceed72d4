use bevy::prelude::*;

use crate::backend::{CharacterBody, CollisionLayers, StaticCollider};
use crate::config::ControllerSettings;
use crate::player::{CameraAnchor, CameraConfig, FirstPersonController};

use super::{
    EYE_HEIGHT, PLAYER_HEIGHT, PLAYER_RADIUS, ROOM_DEPTH, ROOM_HEIGHT, ROOM_WIDTH, WALL_THICKNESS,
};

pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.4, 0.35, 0.3),
        ..default()
    });
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.75, 0.7),
        ..default()
    });
    let pillar_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.45, 0.6),
        ..default()
    });

    // Floor, top face at y = 0
    let floor_size = Vec3::new(ROOM_WIDTH, WALL_THICKNESS, ROOM_DEPTH);
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_size(floor_size))),
        MeshMaterial3d(floor_material),
        Transform::from_xyz(0.0, -WALL_THICKNESS / 2.0, 0.0),
        StaticCollider::new(floor_size / 2.0, CollisionLayers::GROUND),
    ));

    let front_back = Vec3::new(ROOM_WIDTH, ROOM_HEIGHT, WALL_THICKNESS);
    let sides = Vec3::new(WALL_THICKNESS, ROOM_HEIGHT, ROOM_DEPTH);
    let walls = [
        (front_back, Vec3::new(0.0, ROOM_HEIGHT / 2.0, -ROOM_DEPTH / 2.0)),
        (front_back, Vec3::new(0.0, ROOM_HEIGHT / 2.0, ROOM_DEPTH / 2.0)),
        (sides, Vec3::new(-ROOM_WIDTH / 2.0, ROOM_HEIGHT / 2.0, 0.0)),
        (sides, Vec3::new(ROOM_WIDTH / 2.0, ROOM_HEIGHT / 2.0, 0.0)),
    ];
    for (size, position) in walls {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(position),
            StaticCollider::new(size / 2.0, CollisionLayers::WALLS),
        ));
    }

    // Pillars to walk around
    let pillar_size = Vec3::new(0.8, ROOM_HEIGHT, 0.8);
    for x in [-3.0, 3.0] {
        for z in [-3.0, 3.0] {
            commands.spawn((
                Mesh3d(meshes.add(Cuboid::from_size(pillar_size))),
                MeshMaterial3d(pillar_material.clone()),
                Transform::from_xyz(x, ROOM_HEIGHT / 2.0, z),
                StaticCollider::new(pillar_size / 2.0, CollisionLayers::WALLS),
            ));
        }
    }

    commands.spawn((
        PointLight {
            shadows_enabled: false,
            intensity: 2_000_000.0,
            range: 30.0,
            ..default()
        },
        Transform::from_xyz(0.0, ROOM_HEIGHT - 0.5, 0.0),
    ));
}

/// Spawns the player body with its camera anchor as a child.
pub fn spawn_player(mut commands: Commands, settings: Res<ControllerSettings>) {
    let anchor = commands
        .spawn((
            CameraAnchor,
            Camera3d::default(),
            Transform::from_xyz(0.0, EYE_HEIGHT, 0.0),
        ))
        .id();

    let controller = FirstPersonController::new(
        settings.movement,
        settings.ground,
        CameraConfig::new(Some(anchor), settings.camera),
    );

    // Starts a little above the floor and settles on the first frames
    let player = commands
        .spawn((
            Name::new("Player"),
            controller,
            CharacterBody {
                radius: PLAYER_RADIUS,
                height: PLAYER_HEIGHT,
                collides_with: CollisionLayers::GROUND | CollisionLayers::WALLS,
            },
            Transform::from_xyz(0.0, 0.1, 1.5),
            Visibility::default(),
        ))
        .add_child(anchor)
        .id();

    info!("Spawned player {:?} with camera anchor {:?}", player, anchor);
}
