//! Per-frame simulation tick
//!
//! Drives one frame in a fixed order: contacts, player input, camera,
//! then scene requests and HUD output.

use super::camera::{CameraFollower, FollowTarget};
use super::host::{Contact, Frame, HudSink, PhysicsBody, PointerSample};
use super::player::Player;
use super::state::{GameEvent, GameFlags};
use crate::error::Result;
use crate::hud::{ScoreBoard, Stopwatch};
use crate::settings::Settings;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub pointer: PointerSample,
    /// Contacts the physics engine reported since the last tick
    pub contacts: Vec<Contact>,
}

/// One running level: the player, its camera, and the HUD state
#[derive(Debug, Clone)]
pub struct Level {
    pub player: Player,
    pub camera: CameraFollower,
    pub flags: GameFlags,
    pub score: ScoreBoard,
    pub stopwatch: Stopwatch,
    /// Simulated seconds since the level started (stops while paused)
    pub clock: f64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl Level {
    /// Validate `settings` and bind the camera to the controlled body
    pub fn new(settings: Settings, body: &dyn PhysicsBody) -> Result<Self> {
        settings.validate()?;

        let mut camera = CameraFollower::new(&settings.camera);
        camera.bind(&follow_target(body, false));
        log::info!(
            "Level ready: death policy {}, camera at y {:.2}",
            settings.player.death_policy.as_str(),
            camera.position().y
        );

        Ok(Self {
            player: Player::new(&settings.player),
            camera,
            flags: GameFlags::default(),
            score: ScoreBoard::new(),
            stopwatch: Stopwatch::new(0.0),
            clock: 0.0,
            events: Vec::new(),
        })
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.flags.paused != paused {
            log::info!("{}", if paused { "Paused" } else { "Resumed" });
        }
        self.flags.paused = paused;
    }

    /// Start over after the host reloaded the scene
    pub fn restart(&mut self, body: &dyn PhysicsBody) {
        self.player.reset();
        self.flags.game_over = false;
        self.camera.bind(&follow_target(body, false));
        self.stopwatch.restart(self.clock);
        log::info!("Level restarted");
    }
}

fn follow_target(body: &dyn PhysicsBody, dragging: bool) -> FollowTarget {
    FollowTarget {
        position: body.position(),
        velocity: body.velocity(),
        dragging,
    }
}

/// Advance the level by one frame
pub fn tick(level: &mut Level, frame: &mut Frame<'_>, input: &TickInput, dt: f32) {
    level.events.clear();

    if level.flags.paused {
        push_hud(level, &mut *frame.hud);
        return;
    }

    level.clock += f64::from(dt);

    if let Some(body) = frame.body.as_deref_mut() {
        for contact in &input.contacts {
            level.player.on_contact(
                contact,
                &mut *body,
                &mut *frame.visuals,
                &mut level.flags,
                &mut level.events,
            );
        }

        level.player.update(
            &mut *body,
            input.pointer,
            frame.projection,
            &mut *frame.visuals,
            &mut level.flags,
            dt,
            &mut level.events,
        );

        let target = follow_target(&*body, level.player.is_dragging());
        level.camera.tick(Some(&target), dt);
    }

    for event in &level.events {
        match event {
            GameEvent::SceneRequested(request) => {
                log::info!("Scene requested: {request:?}");
                frame.scenes.load_scene(request);
            }
            GameEvent::Finished => level.stopwatch.finish(level.clock),
            _ => {}
        }
    }

    push_hud(level, &mut *frame.hud);
}

fn push_hud(level: &Level, hud: &mut dyn HudSink) {
    hud.set_score_text(&level.score.text());
    hud.set_timer_text(&level.stopwatch.text(level.clock));
    hud.set_panels(level.flags.panels());
}
