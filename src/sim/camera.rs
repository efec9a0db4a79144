//! Camera follower
//!
//! Reflects the target's vertical movement onto the camera one-for-one,
//! keeps the camera above the floor and inside the optional bounds, and
//! holds the configured depth. Horizontal position is never touched.

use glam::{Vec2, Vec3};

use crate::consts::{CAMERA_FLOOR_Y, LOOK_AHEAD_MIN_SPEED, MIN_FOLLOW_SPEED};
use crate::error::Result;
use crate::settings::{CameraSettings, validate_bounds};
use crate::to_world;

/// What the camera knows about the followed body on one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FollowTarget {
    pub position: Vec2,
    pub velocity: Vec2,
    /// The player is aiming a launch
    pub dragging: bool,
}

#[derive(Debug, Clone)]
pub struct CameraFollower {
    settings: CameraSettings,
    position: Vec3,
    bound: bool,
    last_target_y: f32,
    current_follow_speed: f32,
}

impl CameraFollower {
    /// An unbound camera sitting at the configured offset
    pub fn new(settings: &CameraSettings) -> Self {
        Self {
            settings: settings.clone(),
            position: settings.offset,
            bound: false,
            last_target_y: 0.0,
            current_follow_speed: settings.follow_speed,
        }
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Follow speed after the drag slowdown. Not used by vertical tracking.
    pub fn current_follow_speed(&self) -> f32 {
        self.current_follow_speed
    }

    /// Start following `target` and snap to it
    pub fn bind(&mut self, target: &FollowTarget) {
        self.bound = true;
        self.last_target_y = target.position.y;
        self.position = to_world(target.position) + self.settings.offset;
        self.position.y = self.clamp_height(self.position.y);
    }

    /// Switch targets without moving the camera
    pub fn set_target(&mut self, target: Option<&FollowTarget>) {
        match target {
            Some(target) => {
                self.bound = true;
                self.last_target_y = target.position.y;
            }
            None => self.bound = false,
        }
    }

    pub fn set_follow_speed(&mut self, speed: f32) {
        self.settings.follow_speed = speed.max(MIN_FOLLOW_SPEED);
    }

    pub fn set_offset(&mut self, offset: Vec3) {
        self.settings.offset = offset;
    }

    pub fn set_boundaries(&mut self, min: Vec2, max: Vec2) -> Result<()> {
        validate_bounds(min, max)?;
        self.settings.min_bounds = min;
        self.settings.max_bounds = max;
        Ok(())
    }

    pub fn enable_boundaries(&mut self, enable: bool) {
        self.settings.use_boundaries = enable;
    }

    pub fn enable_look_ahead(&mut self, enable: bool) {
        self.settings.use_look_ahead = enable;
    }

    /// Target position biased by look-ahead, plus the offset
    pub fn desired_position(&self, target: &FollowTarget, dt: f32) -> Vec3 {
        let s = &self.settings;
        let mut position = to_world(target.position);
        if s.use_look_ahead && target.velocity.length() > LOOK_AHEAD_MIN_SPEED {
            let look_ahead = to_world(target.velocity.normalize()) * s.look_ahead_distance;
            position += Vec3::ZERO.lerp(look_ahead, (dt * s.look_ahead_speed).clamp(0.0, 1.0));
        }
        position + s.offset
    }

    /// Floor at 0, then the vertical bounds when enabled
    fn clamp_height(&self, y: f32) -> f32 {
        let s = &self.settings;
        let y = y.max(CAMERA_FLOOR_Y);
        if s.use_boundaries {
            y.clamp(s.min_bounds.y, s.max_bounds.y)
        } else {
            y
        }
    }

    pub fn tick(&mut self, target: Option<&FollowTarget>, dt: f32) {
        if !self.bound {
            return;
        }
        let Some(target) = target else {
            return;
        };

        let s = &self.settings;
        self.current_follow_speed = if s.slow_follow_during_drag && target.dragging {
            s.follow_speed * s.drag_follow_speed_multiplier
        } else {
            s.follow_speed
        };

        let desired = self.desired_position(target, dt);
        let mut position = self.position;

        if s.follow_y {
            position.y = self.clamp_height(position.y + target.position.y - self.last_target_y);
            self.last_target_y = target.position.y;
        }

        position.z = desired.z;

        self.position = position;
        log::trace!(
            "Camera at ({:.2}, {:.2}, {:.2}), follow speed {:.2}",
            position.x,
            position.y,
            position.z,
            self.current_follow_speed
        );
    }
}
