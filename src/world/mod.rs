pub mod debug;
pub mod setup;

use bevy::prelude::*;

pub use debug::GroundCheckGizmos;

use debug::{draw_ground_checks, toggle_ground_check_gizmos};
use setup::{setup_world, spawn_player};

// Room dimensions
pub const ROOM_WIDTH: f32 = 16.0;
pub const ROOM_DEPTH: f32 = 16.0;
pub const ROOM_HEIGHT: f32 = 4.0;
pub const WALL_THICKNESS: f32 = 0.2;

// Player body, translation at the feet
pub const PLAYER_HEIGHT: f32 = 1.8;
pub const PLAYER_RADIUS: f32 = 0.3;
pub const EYE_HEIGHT: f32 = 1.6;

/// Demo room with colliders, the player, and the ground check gizmo.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GroundCheckGizmos>()
            .add_systems(Startup, (setup_world, spawn_player))
            .add_systems(Update, (toggle_ground_check_gizmos, draw_ground_checks).chain());
    }
}
