//! First-person locomotion and camera control for Bevy.
//!
//! Each frame a [`FirstPersonController`] entity goes through two phases:
//!
//! 1. [`LocomotionSet::Logic`] in `Update`: movement is submitted to the physics
//!    backend, gravity is integrated, then the ground check runs. Gravity sees the
//!    ground contact from the previous frame's check.
//! 2. [`LocomotionSet::Late`] in `PostUpdate`: the camera anchor is pitched and the
//!    body is yawed from the look input.
//!
//! Input arrives through [`LocomotionInput`], written by [`input::DeviceInputPlugin`] or
//! any other source. Physics goes through a [`backend::LocomotionBackend`].

pub mod backend;
pub mod camera;
pub mod config;
pub mod input;
pub mod player;
pub mod world;

pub use backend::{CollisionLayers, KinematicBackend, LocomotionBackend};
pub use config::{ControllerSettings, SettingsError, SettingsPlugin};
pub use player::{
    CameraAnchor, CameraConfig, FirstPersonController, FirstPersonPlugin, GroundConfig,
    LocomotionInput, LocomotionSet, LocomotionState, MovementConfig, PitchLimits,
};
