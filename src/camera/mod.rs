pub mod systems;

use bevy::prelude::*;

pub use systems::look_rotation;

use systems::{grab_cursor, toggle_cursor_grab};

/// Cursor handling for the windowed app. Camera rotation itself is added by
/// [`crate::FirstPersonPlugin`].
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, grab_cursor)
            .add_systems(Update, toggle_cursor_grab);
    }
}
