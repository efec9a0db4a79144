//! Launch controller
//!
//! Owns the drag input, turns releases into impulses on the body, and runs
//! the Alive/Dead life cycle triggered by obstacle contacts.

use glam::Vec2;

use super::drag::{DragGesture, DragInput, DragUpdate, LaunchRequest};
use super::host::{AimVisuals, Contact, ContactKind, PhysicsBody, PointerSample, ScreenToWorld};
use super::state::{GameEvent, GameFlags, PlayerState, SceneRequest};
use super::timer::Countdown;
use super::trajectory;
use crate::consts::{POWER_INDICATOR_BASE_SCALE, POWER_INDICATOR_SCALE_RANGE};
use crate::settings::{DeathPolicy, PlayerSettings};

/// Launch force for a drag of `distance`
pub fn force_amount(distance: f32, settings: &PlayerSettings) -> f32 {
    (distance / settings.max_drag_distance) * settings.max_force * settings.force_multiplier
}

/// Impulse vector for a drag of `distance` along `direction`
pub fn launch_impulse(direction: Vec2, distance: f32, settings: &PlayerSettings) -> Vec2 {
    direction * force_amount(distance, settings)
}

#[derive(Debug, Clone)]
pub struct Player {
    settings: PlayerSettings,
    drag: DragInput,
    state: PlayerState,
    /// Soft-reset countdown while dead
    pending_reset: Option<Countdown>,
    /// Current trajectory preview, empty when not aiming
    trajectory: Vec<Vec2>,
}

impl Player {
    pub fn new(settings: &PlayerSettings) -> Self {
        Self {
            settings: settings.clone(),
            drag: DragInput::new(settings),
            state: PlayerState::Alive,
            pending_reset: None,
            trajectory: Vec::with_capacity(settings.aim_line_segments),
        }
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_dead(&self) -> bool {
        self.state == PlayerState::Dead
    }

    /// Whether an aim gesture is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn gesture(&self) -> Option<&DragGesture> {
        self.drag.gesture()
    }

    pub fn trajectory(&self) -> &[Vec2] {
        &self.trajectory
    }

    /// Seconds until the soft reset fires, if one is scheduled
    pub fn reset_remaining(&self) -> Option<f32> {
        self.pending_reset.map(|t| t.remaining())
    }

    /// Per-tick input handling
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        body: &mut dyn PhysicsBody,
        pointer: PointerSample,
        projection: &dyn ScreenToWorld,
        visuals: &mut dyn AimVisuals,
        flags: &mut GameFlags,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) {
        if let Some(timer) = self.pending_reset.as_mut() {
            if timer.tick(dt) {
                self.pending_reset = None;
                self.respawn(body, flags, events);
            }
        }

        if self.is_dead() {
            return;
        }

        match self.drag.update(pointer, body.position(), projection) {
            DragUpdate::Started => {
                let at = body.position();
                log::info!("Drag started at ({:.2}, {:.2})", at.x, at.y);
                events.push(GameEvent::DragStarted { at });
            }
            DragUpdate::Released(Some(request)) => self.launch(body, request, events),
            DragUpdate::Released(None) => {
                log::debug!("Drag released below launch threshold");
                events.push(GameEvent::DragDropped);
            }
            DragUpdate::Idle | DragUpdate::Aiming | DragUpdate::Rejected { .. } => {}
        }

        if let Some(gesture) = self.drag.gesture().copied() {
            // Hold the body steady while aiming
            body.set_velocity(body.velocity() * self.settings.aiming_velocity_damping);
            self.show_feedback(body.position(), &gesture, visuals);
        } else {
            self.hide_feedback(visuals);
        }
    }

    /// Handle a collision or trigger reported this tick
    pub fn on_contact(
        &mut self,
        contact: &Contact,
        body: &mut dyn PhysicsBody,
        visuals: &mut dyn AimVisuals,
        flags: &mut GameFlags,
        events: &mut Vec<GameEvent>,
    ) {
        match contact.kind {
            ContactKind::Collision if contact.tag == self.settings.obstacle_tag => {
                if self.is_dead() {
                    log::trace!("Obstacle contact while dead ignored");
                    return;
                }
                flags.game_over = true;
                self.die(body, visuals, events);
            }
            ContactKind::Trigger if contact.tag == self.settings.finish_tag => {
                log::info!("Finish reached, loading {}", self.settings.finish_scene);
                events.push(GameEvent::Finished);
                events.push(GameEvent::SceneRequested(SceneRequest::Load(
                    self.settings.finish_scene.clone(),
                )));
            }
            _ => {}
        }
    }

    /// Re-enable input after the host reloaded the scene
    pub fn reset(&mut self) {
        self.pending_reset = None;
        self.drag.cancel();
        self.trajectory.clear();
        self.state = PlayerState::Alive;
    }

    fn launch(&mut self, body: &mut dyn PhysicsBody, request: LaunchRequest, events: &mut Vec<GameEvent>) {
        let impulse = launch_impulse(request.direction, request.distance, &self.settings);
        log::info!(
            "Launch: distance {:.2}, impulse ({:.2}, {:.2})",
            request.distance,
            impulse.x,
            impulse.y
        );
        body.apply_impulse(impulse);
        events.push(GameEvent::Launched { impulse });
    }

    fn die(&mut self, body: &mut dyn PhysicsBody, visuals: &mut dyn AimVisuals, events: &mut Vec<GameEvent>) {
        self.state = PlayerState::Dead;
        body.set_velocity(Vec2::ZERO);
        self.hide_feedback(visuals);
        self.drag.cancel();
        log::info!("Player died ({})", self.settings.death_policy.as_str());
        events.push(GameEvent::Died);

        match self.settings.death_policy {
            DeathPolicy::SoftReset { delay_secs } => {
                self.pending_reset = Some(Countdown::new(delay_secs));
            }
            DeathPolicy::HardReload => {
                events.push(GameEvent::SceneRequested(SceneRequest::ReloadCurrent));
            }
        }
    }

    fn respawn(&mut self, body: &mut dyn PhysicsBody, flags: &mut GameFlags, events: &mut Vec<GameEvent>) {
        let at = self.settings.spawn_point;
        self.state = PlayerState::Alive;
        body.set_position(at);
        body.set_velocity(Vec2::ZERO);
        flags.game_over = false;
        log::info!("Respawned at ({:.2}, {:.2})", at.x, at.y);
        events.push(GameEvent::Respawned { at });
    }

    fn show_feedback(&mut self, body_pos: Vec2, gesture: &DragGesture, visuals: &mut dyn AimVisuals) {
        let velocity = gesture.direction * force_amount(gesture.distance, &self.settings);
        trajectory::predict_default_into(
            &mut self.trajectory,
            body_pos,
            velocity,
            self.settings.aim_line_segments,
        );
        visuals.show_trajectory(&self.trajectory);

        let power = gesture.distance / self.settings.max_drag_distance;
        visuals.show_power(
            body_pos - gesture.direction * gesture.distance,
            POWER_INDICATOR_BASE_SCALE + power * POWER_INDICATOR_SCALE_RANGE,
        );
    }

    fn hide_feedback(&mut self, visuals: &mut dyn AimVisuals) {
        self.trajectory.clear();
        visuals.hide_trajectory();
        visuals.hide_power();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Default)]
    pub(crate) struct FakeBody {
        pub pos: Vec2,
        pub vel: Vec2,
        pub impulses: Vec<Vec2>,
    }

    impl PhysicsBody for FakeBody {
        fn position(&self) -> Vec2 {
            self.pos
        }
        fn set_position(&mut self, position: Vec2) {
            self.pos = position;
        }
        fn velocity(&self) -> Vec2 {
            self.vel
        }
        fn set_velocity(&mut self, velocity: Vec2) {
            self.vel = velocity;
        }
        fn apply_impulse(&mut self, impulse: Vec2) {
            self.impulses.push(impulse);
            self.vel += impulse;
        }
    }

    pub(crate) struct Identity;

    impl ScreenToWorld for Identity {
        fn screen_to_world(&self, screen: Vec2) -> Vec2 {
            screen
        }
    }

    #[derive(Debug, Default)]
    pub(crate) struct FakeVisuals {
        pub trajectory: Vec<Vec2>,
        pub power: Option<(Vec2, f32)>,
    }

    impl AimVisuals for FakeVisuals {
        fn show_trajectory(&mut self, points: &[Vec2]) {
            self.trajectory = points.to_vec();
        }
        fn hide_trajectory(&mut self) {
            self.trajectory.clear();
        }
        fn show_power(&mut self, position: Vec2, scale: f32) {
            self.power = Some((position, scale));
        }
        fn hide_power(&mut self) {
            self.power = None;
        }
    }

    struct Rig {
        player: Player,
        body: FakeBody,
        visuals: FakeVisuals,
        flags: GameFlags,
        events: Vec<GameEvent>,
    }

    impl Rig {
        fn new(settings: PlayerSettings) -> Self {
            Self {
                player: Player::new(&settings),
                body: FakeBody::default(),
                visuals: FakeVisuals::default(),
                flags: GameFlags::default(),
                events: Vec::new(),
            }
        }

        fn step(&mut self, pointer: PointerSample, dt: f32) {
            self.player.update(
                &mut self.body,
                pointer,
                &Identity,
                &mut self.visuals,
                &mut self.flags,
                dt,
                &mut self.events,
            );
        }

        fn contact(&mut self, contact: Contact) {
            self.player.on_contact(
                &contact,
                &mut self.body,
                &mut self.visuals,
                &mut self.flags,
                &mut self.events,
            );
        }

        /// Grab the body, pull to `to`, and let go
        fn drag_and_release(&mut self, to: Vec2) {
            self.step(PointerSample::pressed_at(self.body.pos), 0.016);
            self.step(PointerSample::pressed_at(to), 0.016);
            self.step(PointerSample::released(), 0.016);
        }
    }

    #[test]
    fn test_full_drag_impulse_is_100() {
        let mut rig = Rig::new(PlayerSettings::default());
        rig.drag_and_release(Vec2::new(0.0, -10.0));
        assert_eq!(rig.body.impulses.len(), 1);
        assert!((rig.body.impulses[0].length() - 100.0).abs() < 1e-4);
        assert!(rig.body.impulses[0].y > 0.0);
        assert!(rig.events.iter().any(|e| matches!(e, GameEvent::Launched { .. })));
    }

    #[test]
    fn test_short_drag_applies_nothing() {
        let mut rig = Rig::new(PlayerSettings::default());
        rig.drag_and_release(Vec2::new(0.05, 0.0));
        assert!(rig.body.impulses.is_empty());
        assert!(rig.events.contains(&GameEvent::DragDropped));
    }

    #[test]
    fn test_aiming_damps_velocity() {
        let mut rig = Rig::new(PlayerSettings::default());
        rig.body.vel = Vec2::new(10.0, 0.0);
        rig.step(PointerSample::pressed_at(Vec2::ZERO), 0.016);
        assert!((rig.body.vel.x - 4.0).abs() < 1e-5);
        rig.step(PointerSample::pressed_at(Vec2::ZERO), 0.016);
        assert!((rig.body.vel.x - 1.6).abs() < 1e-5);
    }

    #[test]
    fn test_preview_shown_only_while_aiming() {
        let mut rig = Rig::new(PlayerSettings::default());
        rig.step(PointerSample::pressed_at(Vec2::ZERO), 0.016);
        rig.step(PointerSample::pressed_at(Vec2::new(-1.5, 0.0)), 0.016);
        assert_eq!(rig.player.trajectory().len(), 20);
        assert_eq!(rig.visuals.trajectory.len(), 20);
        assert_eq!(rig.player.trajectory()[0], Vec2::ZERO);

        let (position, scale) = rig.visuals.power.unwrap();
        assert!((scale - 0.75).abs() < 1e-6);
        assert!((position - Vec2::new(-1.5, 0.0)).length() < 1e-6);

        rig.step(PointerSample::released(), 0.016);
        assert!(rig.player.trajectory().is_empty());
        assert!(rig.visuals.trajectory.is_empty());
        assert!(rig.visuals.power.is_none());
    }

    #[test]
    fn test_obstacle_kills_once() {
        let mut rig = Rig::new(PlayerSettings::default());
        rig.body.vel = Vec2::new(3.0, 7.0);
        rig.step(PointerSample::pressed_at(Vec2::ZERO), 0.016);
        rig.step(PointerSample::pressed_at(Vec2::new(0.0, -1.0)), 0.016);

        rig.contact(Contact::collision("Obstacle"));
        assert!(rig.player.is_dead());
        assert!(rig.flags.game_over);
        assert_eq!(rig.body.vel, Vec2::ZERO);
        assert!(!rig.player.is_dragging());
        assert!(rig.visuals.trajectory.is_empty());

        let reset_before = rig.player.reset_remaining();
        rig.body.vel = Vec2::new(1.0, 1.0);
        rig.contact(Contact::collision("Obstacle"));
        assert_eq!(rig.player.reset_remaining(), reset_before);
        assert_eq!(rig.body.vel, Vec2::new(1.0, 1.0));
        let deaths = rig.events.iter().filter(|e| **e == GameEvent::Died).count();
        assert_eq!(deaths, 1);
    }

    #[test]
    fn test_other_tags_are_ignored() {
        let mut rig = Rig::new(PlayerSettings::default());
        rig.contact(Contact::collision("Wall"));
        rig.contact(Contact::trigger("Obstacle"));
        assert!(!rig.player.is_dead());
        assert!(rig.events.is_empty());
    }

    #[test]
    fn test_dead_player_ignores_input() {
        let mut rig = Rig::new(PlayerSettings::default());
        rig.contact(Contact::collision("Obstacle"));
        rig.drag_and_release(Vec2::new(0.0, -3.0));
        assert!(rig.body.impulses.is_empty());
        assert!(!rig.player.is_dragging());
    }

    #[test]
    fn test_soft_reset_respawns_after_delay() {
        let mut settings = PlayerSettings::default();
        settings.spawn_point = Vec2::new(0.0, 1.0);
        let mut rig = Rig::new(settings);
        rig.body.pos = Vec2::new(4.0, 9.0);
        rig.contact(Contact::collision("Obstacle"));

        rig.step(PointerSample::released(), 1.5);
        assert!(rig.player.is_dead());
        rig.step(PointerSample::released(), 0.6);
        assert!(!rig.player.is_dead());
        assert!(!rig.flags.game_over);
        assert_eq!(rig.body.pos, Vec2::new(0.0, 1.0));
        assert!(rig.events.contains(&GameEvent::Respawned { at: Vec2::new(0.0, 1.0) }));
        assert_eq!(rig.player.reset_remaining(), None);
    }

    #[test]
    fn test_hard_reload_requests_scene_immediately() {
        let mut settings = PlayerSettings::default();
        settings.death_policy = DeathPolicy::HardReload;
        let mut rig = Rig::new(settings);
        rig.contact(Contact::collision("Obstacle"));
        assert!(rig.events.contains(&GameEvent::SceneRequested(SceneRequest::ReloadCurrent)));
        assert_eq!(rig.player.reset_remaining(), None);

        // Stays dead until the host resets it
        rig.step(PointerSample::released(), 10.0);
        assert!(rig.player.is_dead());
        rig.player.reset();
        assert!(!rig.player.is_dead());
    }

    #[test]
    fn test_reset_cancels_pending_respawn() {
        let mut rig = Rig::new(PlayerSettings::default());
        rig.body.pos = Vec2::new(2.0, 2.0);
        rig.contact(Contact::collision("Obstacle"));
        rig.player.reset();
        rig.step(PointerSample::released(), 5.0);
        assert_eq!(rig.body.pos, Vec2::new(2.0, 2.0));
        assert!(!rig.events.iter().any(|e| matches!(e, GameEvent::Respawned { .. })));
    }

    #[test]
    fn test_finish_trigger_requests_scene_even_when_dead() {
        let mut rig = Rig::new(PlayerSettings::default());
        rig.contact(Contact::collision("Obstacle"));
        rig.contact(Contact::trigger("Finish"));
        assert!(rig.events.contains(&GameEvent::Finished));
        assert!(rig.events.contains(&GameEvent::SceneRequested(SceneRequest::Load("Home".into()))));
    }

    #[test]
    fn test_zero_distance_gives_zero_impulse() {
        let settings = PlayerSettings::default();
        assert_eq!(launch_impulse(Vec2::Y, 0.0, &settings), Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_impulse_is_linear_in_distance(d in 0.0f32..3.0, k in 0.0f32..1.0) {
            let settings = PlayerSettings::default();
            let full = force_amount(d, &settings);
            let scaled = force_amount(d * k, &settings);
            prop_assert!((scaled - full * k).abs() < 1e-3);
            prop_assert!(full >= 0.0);
        }
    }
}
