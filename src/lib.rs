//! Slingclimb - drag-to-launch slingshot climbing game core
//!
//! Core modules:
//! - `sim`: Deterministic gameplay (drag input, launch, trajectory, camera)
//! - `hud`: Scoreboard, stopwatch and panel projection
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Configuration errors

pub mod error;
pub mod hud;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, Result};
pub use hud::{PanelVisibility, ScoreBoard, Stopwatch};
pub use settings::{CameraSettings, DeathPolicy, PlayerSettings, Settings};

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Time between predicted trajectory points (seconds)
    pub const TRAJECTORY_TIME_STEP: f32 = 0.1;
    /// Per-step velocity decay used by the trajectory preview
    pub const TRAJECTORY_DECAY: f32 = 0.98;

    /// Power indicator scale at zero drag
    pub const POWER_INDICATOR_BASE_SCALE: f32 = 0.5;
    /// Extra power indicator scale at full drag
    pub const POWER_INDICATOR_SCALE_RANGE: f32 = 0.5;

    /// Body speed below which the camera skips look-ahead
    pub const LOOK_AHEAD_MIN_SPEED: f32 = 0.1;
    /// Lowest follow speed accepted by `CameraFollower::set_follow_speed`
    pub const MIN_FOLLOW_SPEED: f32 = 0.1;
    /// The camera never drops below this height
    pub const CAMERA_FLOOR_Y: f32 = 0.0;
}

/// Lift a play-plane point into world space at depth 0
#[inline]
pub fn to_world(p: Vec2) -> Vec3 {
    p.extend(0.0)
}
