//! Collaborators owned by the host engine
//!
//! The simulation never integrates motion, renders, or loads scenes itself.
//! It reads and writes the engine through these traits, which the driver
//! hands to `Level::tick` every frame.

use glam::Vec2;

use super::state::SceneRequest;
use crate::hud::PanelVisibility;

/// The rigid body under player control
pub trait PhysicsBody {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    /// Instantaneous change of momentum
    fn apply_impulse(&mut self, impulse: Vec2);
}

/// Maps screen coordinates onto the play plane
pub trait ScreenToWorld {
    fn screen_to_world(&self, screen: Vec2) -> Vec2;
}

/// Aim line and power indicator
pub trait AimVisuals {
    fn show_trajectory(&mut self, points: &[Vec2]);
    fn hide_trajectory(&mut self);
    fn show_power(&mut self, position: Vec2, scale: f32);
    fn hide_power(&mut self);
}

pub trait SceneLoader {
    fn load_scene(&mut self, request: &SceneRequest);
}

/// Text and panel widgets
pub trait HudSink {
    fn set_score_text(&mut self, text: &str);
    fn set_timer_text(&mut self, text: &str);
    fn set_panels(&mut self, panels: PanelVisibility);
}

/// Primary pointer state for one tick (touch 0 or the left mouse button)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub pressed: bool,
    /// Screen-space position; meaningless while not pressed
    pub screen: Vec2,
}

impl PointerSample {
    pub fn pressed_at(screen: Vec2) -> Self {
        Self {
            pressed: true,
            screen,
        }
    }

    pub fn released() -> Self {
        Self::default()
    }
}

/// Kind of contact reported by the physics engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Solid collision
    Collision,
    /// Entered a trigger volume
    Trigger,
}

/// A tagged contact delivered during the tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub kind: ContactKind,
    pub tag: String,
}

impl Contact {
    pub fn collision(tag: impl Into<String>) -> Self {
        Self {
            kind: ContactKind::Collision,
            tag: tag.into(),
        }
    }

    pub fn trigger(tag: impl Into<String>) -> Self {
        Self {
            kind: ContactKind::Trigger,
            tag: tag.into(),
        }
    }
}

/// Everything the host lends to the simulation for one tick
pub struct Frame<'a> {
    /// `None` skips the player and camera for this tick
    pub body: Option<&'a mut dyn PhysicsBody>,
    pub projection: &'a dyn ScreenToWorld,
    pub visuals: &'a mut dyn AimVisuals,
    pub scenes: &'a mut dyn SceneLoader,
    pub hud: &'a mut dyn HudSink,
}
