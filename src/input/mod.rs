use bevy::{input::mouse::MouseMotion, prelude::*};

use crate::camera::systems::cursor_grabbed;
use crate::config::ControllerSettings;
use crate::player::LocomotionInput;

/// Fills [`LocomotionInput`] from the keyboard and mouse before `Update` runs.
pub struct DeviceInputPlugin;

impl Plugin for DeviceInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PreUpdate,
            read_device_input.after(bevy::input::InputSystem),
        );
    }
}

pub fn read_device_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: EventReader<MouseMotion>,
    settings: Res<ControllerSettings>,
    windows: Query<&Window>,
    mut query: Query<&mut LocomotionInput>,
) {
    // WASD, forward on +y
    let mut move_axis = Vec2::ZERO;
    if keyboard_input.pressed(KeyCode::KeyW) {
        move_axis.y += 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyS) {
        move_axis.y -= 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyA) {
        move_axis.x -= 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyD) {
        move_axis.x += 1.0;
    }
    let move_axis = move_axis.normalize_or_zero();

    let grabbed = windows
        .get_single()
        .map(cursor_grabbed)
        .unwrap_or(false);

    let mut look = Vec2::ZERO;
    for event in mouse_motion.read() {
        look += event.delta;
    }
    let look = if grabbed {
        look * settings.input.look_scale
    } else {
        Vec2::ZERO
    };

    let sprint = keyboard_input.pressed(KeyCode::ShiftLeft);
    let walk = keyboard_input.pressed(KeyCode::ControlLeft);

    for mut input in query.iter_mut() {
        *input = LocomotionInput {
            move_axis,
            look,
            sprint,
            walk,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::window::CursorGrabMode;

    fn app() -> App {
        let mut app = App::new();
        app.add_event::<MouseMotion>()
            .insert_resource(ButtonInput::<KeyCode>::default())
            .insert_resource(ControllerSettings::default())
            .add_systems(Update, read_device_input);
        app
    }

    #[test]
    fn diagonal_keys_are_normalized() {
        let mut app = app();
        let player = app.world_mut().spawn(LocomotionInput::default()).id();

        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.press(KeyCode::KeyW);
            keys.press(KeyCode::KeyD);
            keys.press(KeyCode::ShiftLeft);
        }
        app.update();

        let input = app.world().get::<LocomotionInput>(player).unwrap();
        assert!((input.move_axis.length() - 1.0).abs() < 1e-6);
        assert!(input.move_axis.x > 0.0 && input.move_axis.y > 0.0);
        assert!(input.sprint);
        assert!(!input.walk);
    }

    #[test]
    fn look_is_zero_without_grabbed_window() {
        let mut app = app();
        let player = app.world_mut().spawn(LocomotionInput::default()).id();

        app.world_mut().send_event(MouseMotion {
            delta: Vec2::new(40.0, -10.0),
        });
        app.update();

        let input = app.world().get::<LocomotionInput>(player).unwrap();
        assert_eq!(input.look, Vec2::ZERO);
        assert_eq!(input.move_axis, Vec2::ZERO);
    }

    fn spawn_grabbed_window(app: &mut App) {
        let mut window = Window::default();
        window.cursor_options.grab_mode = CursorGrabMode::Confined;
        app.world_mut().spawn(window);
    }

    #[test]
    fn grabbed_look_is_scaled() {
        let mut app = app();
        spawn_grabbed_window(&mut app);
        let player = app.world_mut().spawn(LocomotionInput::default()).id();

        app.world_mut().send_event(MouseMotion {
            delta: Vec2::new(40.0, -10.0),
        });
        app.update();

        let look = app.world().get::<LocomotionInput>(player).unwrap().look;
        assert!((look - Vec2::new(4.0, -1.0)).length() < 1e-5, "got {look:?}");
    }

    #[test]
    fn motion_events_in_one_frame_add_up() {
        let mut app = app();
        spawn_grabbed_window(&mut app);
        let player = app.world_mut().spawn(LocomotionInput::default()).id();

        for delta in [Vec2::new(10.0, 5.0), Vec2::new(20.0, -15.0), Vec2::new(-5.0, 30.0)] {
            app.world_mut().send_event(MouseMotion { delta });
        }
        app.update();

        let look = app.world().get::<LocomotionInput>(player).unwrap().look;
        assert!((look - Vec2::new(2.5, 2.0)).length() < 1e-5, "got {look:?}");

        // Events are consumed, so an idle frame reads no look
        app.update();
        let look = app.world().get::<LocomotionInput>(player).unwrap().look;
        assert_eq!(look, Vec2::ZERO);
    }
}
