//! Drag-to-aim input state machine
//!
//! Edge-detects the primary pointer every tick. A press close enough to the
//! body grabs it; moving the pointer away aims the launch in the opposite
//! direction; releasing fires if the drag was long enough.

use glam::Vec2;

use super::host::{PointerSample, ScreenToWorld};
use crate::settings::PlayerSettings;

/// An aim gesture in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    /// Body position when the gesture was grabbed
    pub start: Vec2,
    /// Unit vector from the pointer toward the body (zero if they coincide)
    pub direction: Vec2,
    /// Pointer-to-body distance, capped at the max drag distance
    pub distance: f32,
}

/// A release that should launch the body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchRequest {
    pub direction: Vec2,
    pub distance: f32,
}

/// What happened to the drag this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// No gesture and no edge
    Idle,
    /// A press landed too far from the body
    Rejected { reach: f32 },
    /// A gesture was grabbed this tick
    Started,
    /// A gesture continues
    Aiming,
    /// The gesture ended; `None` if the drag was too short to launch
    Released(Option<LaunchRequest>),
}

/// Aim direction and capped distance for a pointer relative to the body
pub fn aim(body: Vec2, pointer: Vec2, max_distance: f32) -> (Vec2, f32) {
    let direction = (body - pointer).normalize_or_zero();
    let distance = body.distance(pointer).min(max_distance);
    (direction, distance)
}

#[derive(Debug, Clone)]
pub struct DragInput {
    capture_radius: f32,
    min_launch_distance: f32,
    max_drag_distance: f32,
    was_pressed: bool,
    gesture: Option<DragGesture>,
}

impl DragInput {
    pub fn new(settings: &PlayerSettings) -> Self {
        Self {
            capture_radius: settings.capture_radius,
            min_launch_distance: settings.min_launch_distance,
            max_drag_distance: settings.max_drag_distance,
            was_pressed: false,
            gesture: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn gesture(&self) -> Option<&DragGesture> {
        self.gesture.as_ref()
    }

    /// Drop the current gesture without launching
    pub fn cancel(&mut self) {
        self.gesture = None;
    }

    /// Advance one tick. `body` is the live body position.
    pub fn update(
        &mut self,
        pointer: PointerSample,
        body: Vec2,
        projection: &dyn ScreenToWorld,
    ) -> DragUpdate {
        let just_pressed = pointer.pressed && !self.was_pressed;
        let just_released = !pointer.pressed && self.was_pressed;
        self.was_pressed = pointer.pressed;

        let mut update = DragUpdate::Idle;
        if just_pressed {
            let reach = projection.screen_to_world(pointer.screen).distance(body);
            if reach < self.capture_radius {
                self.gesture = Some(DragGesture {
                    start: body,
                    direction: Vec2::ZERO,
                    distance: 0.0,
                });
                update = DragUpdate::Started;
            } else {
                log::debug!("Press {reach:.2} away from body, too far to grab");
                update = DragUpdate::Rejected { reach };
            }
        } else if just_released {
            if let Some(gesture) = self.gesture.take() {
                let launch = (gesture.distance > self.min_launch_distance).then_some(LaunchRequest {
                    direction: gesture.direction,
                    distance: gesture.distance,
                });
                return DragUpdate::Released(launch);
            }
        }

        if let Some(gesture) = self.gesture.as_mut() {
            let pointer_world = projection.screen_to_world(pointer.screen);
            let (direction, distance) = aim(body, pointer_world, self.max_drag_distance);
            gesture.direction = direction;
            gesture.distance = distance;
            if update == DragUpdate::Idle {
                update = DragUpdate::Aiming;
            }
        }

        update
    }
}
