//! Game settings
//!
//! Loaded from JSON at startup. Every field has a default, so a settings
//! file only needs the values it overrides.

use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// What happens after the player hits an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeathPolicy {
    /// Respawn in place once the delay has elapsed
    SoftReset { delay_secs: f32 },
    /// Ask the host to reload the current scene right away
    HardReload,
}

impl Default for DeathPolicy {
    fn default() -> Self {
        DeathPolicy::SoftReset { delay_secs: 2.0 }
    }
}

impl DeathPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeathPolicy::SoftReset { .. } => "soft-reset",
            DeathPolicy::HardReload => "hard-reload",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "soft-reset" | "soft" => Some(DeathPolicy::default()),
            "hard-reload" | "hard" | "reload" => Some(DeathPolicy::HardReload),
            _ => None,
        }
    }
}

/// Launch controller and drag input tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    // === Launch ===
    /// Impulse at full drag, before the multiplier
    pub max_force: f32,
    /// Drag length that counts as full power (world units)
    pub max_drag_distance: f32,
    /// Scales every launch impulse
    pub force_multiplier: f32,

    // === Drag input ===
    /// A press must land this close to the body to start a drag
    pub capture_radius: f32,
    /// Releases shorter than this are dropped
    pub min_launch_distance: f32,
    /// Velocity factor applied to the body every tick while aiming
    pub aiming_velocity_damping: f32,

    // === Visual feedback ===
    /// Number of points in the trajectory preview
    pub aim_line_segments: usize,

    // === Contacts ===
    pub obstacle_tag: String,
    pub finish_tag: String,
    /// Scene requested when the finish trigger is reached
    pub finish_scene: String,

    // === Death ===
    pub death_policy: DeathPolicy,
    /// Where a soft reset puts the body
    pub spawn_point: Vec2,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            max_force: 20.0,
            max_drag_distance: 3.0,
            force_multiplier: 5.0,

            capture_radius: 1.0,
            min_launch_distance: 0.1,
            aiming_velocity_damping: 0.4,

            aim_line_segments: 20,

            obstacle_tag: "Obstacle".to_string(),
            finish_tag: "Finish".to_string(),
            finish_scene: "Home".to_string(),

            death_policy: DeathPolicy::default(),
            spawn_point: Vec2::ZERO,
        }
    }
}

impl PlayerSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.max_drag_distance > 0.0) {
            return Err(ConfigError::invalid("player.max_drag_distance", "must be positive"));
        }
        if !(self.max_force >= 0.0) {
            return Err(ConfigError::invalid("player.max_force", "must not be negative"));
        }
        if !(self.force_multiplier >= 0.0) {
            return Err(ConfigError::invalid(
                "player.force_multiplier",
                "must not be negative",
            ));
        }
        if !(self.capture_radius > 0.0) {
            return Err(ConfigError::invalid("player.capture_radius", "must be positive"));
        }
        if !(self.min_launch_distance >= 0.0) {
            return Err(ConfigError::invalid(
                "player.min_launch_distance",
                "must not be negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.aiming_velocity_damping) {
            return Err(ConfigError::invalid(
                "player.aiming_velocity_damping",
                format!("{} is outside [0, 1]", self.aiming_velocity_damping),
            ));
        }
        if self.aim_line_segments == 0 {
            return Err(ConfigError::invalid("player.aim_line_segments", "must be at least 1"));
        }
        if self.obstacle_tag.is_empty() {
            return Err(ConfigError::invalid("player.obstacle_tag", "must not be empty"));
        }
        if self.finish_tag.is_empty() {
            return Err(ConfigError::invalid("player.finish_tag", "must not be empty"));
        }
        if self.finish_scene.is_empty() {
            return Err(ConfigError::invalid("player.finish_scene", "must not be empty"));
        }
        if let DeathPolicy::SoftReset { delay_secs } = self.death_policy {
            if !(delay_secs >= 0.0) {
                return Err(ConfigError::invalid(
                    "player.death_policy.delay_secs",
                    "must not be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Camera follower tuning
///
/// `follow_speed`, `smooth_follow`, `follow_x` and the drag slowdown are
/// accepted and reported but the vertical tracking reflects the target's
/// movement verbatim, so none of them move the camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    // === Follow ===
    pub follow_speed: f32,
    pub smooth_follow: bool,
    pub follow_x: bool,
    pub follow_y: bool,

    // === Offset ===
    /// Offset from the target; z is the fixed camera depth
    pub offset: Vec3,

    // === Boundaries ===
    pub use_boundaries: bool,
    pub min_bounds: Vec2,
    pub max_bounds: Vec2,

    // === Look-ahead ===
    pub use_look_ahead: bool,
    pub look_ahead_distance: f32,
    pub look_ahead_speed: f32,

    // === Player interaction ===
    pub slow_follow_during_drag: bool,
    /// Fraction of `follow_speed` used while the player aims
    pub drag_follow_speed_multiplier: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            follow_speed: 5.0,
            smooth_follow: true,
            follow_x: false,
            follow_y: true,

            offset: Vec3::new(0.0, 3.0, -10.0),

            use_boundaries: false,
            min_bounds: Vec2::new(-10.0, -5.0),
            max_bounds: Vec2::new(10.0, 5.0),

            use_look_ahead: false,
            look_ahead_distance: 2.0,
            look_ahead_speed: 2.0,

            slow_follow_during_drag: true,
            drag_follow_speed_multiplier: 0.3,
        }
    }
}

impl CameraSettings {
    pub fn validate(&self) -> Result<()> {
        validate_bounds(self.min_bounds, self.max_bounds)?;
        if !(self.follow_speed > 0.0) {
            return Err(ConfigError::invalid("camera.follow_speed", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.drag_follow_speed_multiplier) {
            return Err(ConfigError::invalid(
                "camera.drag_follow_speed_multiplier",
                format!("{} is outside [0, 1]", self.drag_follow_speed_multiplier),
            ));
        }
        if !(self.look_ahead_distance >= 0.0) {
            return Err(ConfigError::invalid(
                "camera.look_ahead_distance",
                "must not be negative",
            ));
        }
        if !(self.look_ahead_speed >= 0.0) {
            return Err(ConfigError::invalid("camera.look_ahead_speed", "must not be negative"));
        }
        Ok(())
    }
}

/// Check a vertical clamp range against the camera floor
pub(crate) fn validate_bounds(min: Vec2, max: Vec2) -> Result<()> {
    if !(min.y <= max.y) {
        return Err(ConfigError::invalid(
            "camera.bounds",
            format!("min y {} is above max y {}", min.y, max.y),
        ));
    }
    if max.y < crate::consts::CAMERA_FLOOR_Y {
        return Err(ConfigError::invalid(
            "camera.bounds",
            format!("max y {} is below the camera floor", max.y),
        ));
    }
    Ok(())
}

/// All game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub camera: CameraSettings,
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Switch death policy, keeping a configured soft-reset delay when the
    /// soft policy is selected again
    pub fn override_death_policy(&mut self, policy: DeathPolicy) {
        let keep_delay = matches!(
            (self.player.death_policy, policy),
            (DeathPolicy::SoftReset { .. }, DeathPolicy::SoftReset { .. })
        );
        if !keep_delay {
            self.player.death_policy = policy;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.player.validate()?;
        self.camera.validate()
    }
}
