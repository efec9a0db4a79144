//! Deterministic gameplay module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Time only advances through the `dt` passed to `tick`
//! - No physics integration; the host engine moves the body
//! - No rendering or platform dependencies, only the traits in `host`

pub mod camera;
pub mod drag;
pub mod host;
pub mod player;
pub mod state;
pub mod tick;
pub mod timer;
pub mod trajectory;

pub use camera::{CameraFollower, FollowTarget};
pub use drag::{DragGesture, DragInput, DragUpdate, LaunchRequest};
pub use host::{
    AimVisuals, Contact, ContactKind, Frame, HudSink, PhysicsBody, PointerSample, SceneLoader,
    ScreenToWorld,
};
pub use player::{Player, force_amount, launch_impulse};
pub use state::{GameEvent, GameFlags, PlayerState, SceneRequest};
pub use tick::{Level, TickInput, tick};
pub use timer::Countdown;
