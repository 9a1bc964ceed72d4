use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    window::PresentMode,
};

use first_person::camera::CameraPlugin;
use first_person::input::DeviceInputPlugin;
use first_person::world::WorldPlugin;
use first_person::{FirstPersonPlugin, KinematicBackend, SettingsPlugin};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "First Person".to_string(),
                    present_mode: PresentMode::AutoNoVsync,
                    ..default()
                }),
                ..default()
            }),
        )
        .add_plugins((
            FrameTimeDiagnosticsPlugin::default(),
            LogDiagnosticsPlugin::default(),
        ))
        .add_plugins(SettingsPlugin::default())
        .add_plugins((
            FirstPersonPlugin::<KinematicBackend>::default(),
            DeviceInputPlugin,
            CameraPlugin,
            WorldPlugin,
        ))
        .run();
}
