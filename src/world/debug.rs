use bevy::prelude::*;

use crate::player::systems::ground_check_center;
use crate::player::{FirstPersonController, LocomotionState};

/// Whether the ground check is drawn. Toggled with F3.
#[derive(Resource, Default)]
pub struct GroundCheckGizmos {
    pub enabled: bool,
}

pub fn toggle_ground_check_gizmos(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut gizmos: ResMut<GroundCheckGizmos>,
) {
    if keyboard_input.just_pressed(KeyCode::F3) {
        gizmos.enabled = !gizmos.enabled;
        info!("Ground check gizmos {}", if gizmos.enabled { "on" } else { "off" });
    }
}

/// Draws each controller's ground check, green while grounded and red otherwise.
pub fn draw_ground_checks(
    settings: Res<GroundCheckGizmos>,
    mut gizmos: Gizmos,
    query: Query<(&Transform, &FirstPersonController, &LocomotionState)>,
) {
    if !settings.enabled {
        return;
    }

    for (transform, controller, state) in query.iter() {
        let config = controller.ground();
        let center = ground_check_center(transform.translation, config);
        let color = if state.grounded() {
            Color::srgb(0.2, 0.9, 0.3)
        } else {
            Color::srgb(0.9, 0.2, 0.2)
        };
        gizmos.sphere(Isometry3d::from_translation(center), config.radius, color);
    }
}
