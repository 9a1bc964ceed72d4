use bevy::{log::warn_once, prelude::*, window::CursorGrabMode};

use crate::player::components::anchor_rotation;
use crate::player::{
    FirstPersonController, LocomotionInput, LocomotionState, PitchLimits, LOOK_THRESHOLD,
};

/// New pitch and yaw delta for a look input, in degrees.
///
/// Returns `None` when the input is below [`LOOK_THRESHOLD`]. Sensitivity is applied
/// per frame, not per second.
pub fn look_rotation(
    pitch: f32,
    look: Vec2,
    sensitivity: f32,
    limits: PitchLimits,
) -> Option<(f32, f32)> {
    if look.length_squared() < LOOK_THRESHOLD {
        return None;
    }

    let pitch = limits.clamp(pitch + look.y * sensitivity);
    let yaw = look.x * sensitivity;
    Some((pitch, yaw))
}

/// Pitches the camera anchor and yaws the body from this frame's look input.
pub fn camera_rotation(
    mut bodies: Query<(
        &LocomotionInput,
        &FirstPersonController,
        &mut LocomotionState,
        &mut Transform,
    )>,
    mut anchors: Query<&mut Transform, Without<FirstPersonController>>,
) {
    for (input, controller, mut state, mut body) in bodies.iter_mut() {
        let camera = controller.camera();

        let anchor = match camera.anchor {
            Some(entity) => anchors.get_mut(entity).ok(),
            None => None,
        };
        let Some(mut anchor) = anchor else {
            warn_once!("First-person controller has no usable camera anchor, camera rotation disabled");
            continue;
        };

        let Some((pitch, yaw)) = look_rotation(
            state.pitch,
            input.look,
            controller.movement().mouse_sensitivity,
            camera.limits(),
        ) else {
            continue;
        };

        state.pitch = pitch;
        // Positive pitch looks down, positive yaw turns right
        anchor.rotation = anchor_rotation(pitch);
        body.rotate_local_y(-yaw.to_radians());
    }
}

/// True while the window holds the cursor, which is when look input is accepted.
pub fn cursor_grabbed(window: &Window) -> bool {
    window.cursor_options.grab_mode != CursorGrabMode::None
}

fn set_cursor_grabbed(window: &mut Window, grabbed: bool) {
    window.cursor_options.grab_mode = if grabbed {
        CursorGrabMode::Confined
    } else {
        CursorGrabMode::None
    };
    window.cursor_options.visible = !grabbed;
}

pub fn grab_cursor(mut windows: Query<&mut Window>) {
    if let Ok(mut window) = windows.get_single_mut() {
        set_cursor_grabbed(&mut window, true);
    }
}

/// Escape frees or recaptures the cursor. Releasing it also drops any look delta
/// already read this frame so the camera does not jump.
pub fn toggle_cursor_grab(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut windows: Query<&mut Window>,
    mut inputs: Query<&mut LocomotionInput>,
) {
    if !keyboard_input.just_pressed(KeyCode::Escape) {
        return;
    }
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };

    let grabbed = !cursor_grabbed(&window);
    set_cursor_grabbed(&mut window, grabbed);
    info!("Cursor {}", if grabbed { "grabbed" } else { "released" });

    if !grabbed {
        for mut input in inputs.iter_mut() {
            input.look = Vec2::ZERO;
        }
    }
}
