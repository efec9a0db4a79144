//! Slingclimb headless demo
//!
//! Runs the gameplay core against a stand-in physics body and a seeded
//! autoplayer, logging what happens along the way.
//!
//! Usage: `slingclimb [settings.json] [soft|hard] [seed]`
//! (set `RUST_LOG=info` or `debug` to see the log)

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use slingclimb::sim::{
    AimVisuals, Contact, Frame, GameEvent, HudSink, Level, PhysicsBody, PointerSample, SceneLoader,
    SceneRequest, ScreenToWorld, TickInput, tick,
};
use slingclimb::{DeathPolicy, PanelVisibility, Settings};

/// Frame time (60 Hz)
const DT: f32 = 1.0 / 60.0;
/// Give up after this many frames (3 minutes)
const MAX_FRAMES: u32 = 60 * 180;

const GRAVITY: Vec2 = Vec2::new(0.0, -9.81);
const GROUND_FRICTION: f32 = 0.8;
/// Walls at +-this x are obstacles
const SHAFT_HALF_WIDTH: f32 = 6.0;
const FINISH_HEIGHT: f32 = 40.0;

const SCREEN_SIZE: Vec2 = Vec2::new(800.0, 600.0);
const PIXELS_PER_UNIT: f32 = 40.0;

/// Ballistic body standing in for the engine's rigid body
#[derive(Debug, Default)]
struct SimBody {
    pos: Vec2,
    vel: Vec2,
    touching_wall: bool,
    reached_finish: bool,
}

impl SimBody {
    fn at(pos: Vec2) -> Self {
        Self {
            pos,
            ..Default::default()
        }
    }

    /// Integrate one step and report contacts entered during it
    fn step(&mut self, dt: f32) -> Vec<Contact> {
        let mut contacts = Vec::new();

        self.vel += GRAVITY * dt;
        self.pos += self.vel * dt;

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel.y = 0.0;
            self.vel.x *= GROUND_FRICTION;
        }

        let at_wall = self.pos.x.abs() >= SHAFT_HALF_WIDTH;
        if at_wall {
            self.pos.x = self.pos.x.clamp(-SHAFT_HALF_WIDTH, SHAFT_HALF_WIDTH);
            self.vel.x = 0.0;
            if !self.touching_wall {
                contacts.push(Contact::collision("Obstacle"));
            }
        }
        self.touching_wall = at_wall;

        if self.pos.y >= FINISH_HEIGHT && !self.reached_finish {
            self.reached_finish = true;
            contacts.push(Contact::trigger("Finish"));
        }

        contacts
    }
}

impl PhysicsBody for SimBody {
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
        // Unit mass
        self.vel += impulse;
    }
}

/// Orthographic camera looking at `center`
struct OrthoProjection {
    center: Vec2,
}

impl OrthoProjection {
    fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let rel = (world - self.center) * PIXELS_PER_UNIT;
        Vec2::new(rel.x, -rel.y) + SCREEN_SIZE / 2.0
    }
}

impl ScreenToWorld for OrthoProjection {
    fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let rel = screen - SCREEN_SIZE / 2.0;
        Vec2::new(rel.x, -rel.y) / PIXELS_PER_UNIT + self.center
    }
}

#[derive(Default)]
struct LogVisuals {
    aiming: bool,
}

impl AimVisuals for LogVisuals {
    fn show_trajectory(&mut self, points: &[Vec2]) {
        if !self.aiming {
            if let Some(end) = points.last() {
                log::debug!("Aim line shown, ends at ({:.2}, {:.2})", end.x, end.y);
            }
        }
        self.aiming = true;
    }
    fn hide_trajectory(&mut self) {
        if self.aiming {
            log::debug!("Aim line hidden");
        }
        self.aiming = false;
    }
    fn show_power(&mut self, _position: Vec2, scale: f32) {
        log::trace!("Power indicator scale {scale:.2}");
    }
    fn hide_power(&mut self) {}
}

#[derive(Default)]
struct DemoScenes {
    pending: Option<SceneRequest>,
}

impl SceneLoader for DemoScenes {
    fn load_scene(&mut self, request: &SceneRequest) {
        self.pending = Some(request.clone());
    }
}

#[derive(Default)]
struct LogHud {
    score: String,
    timer: String,
    panels: PanelVisibility,
}

impl HudSink for LogHud {
    fn set_score_text(&mut self, text: &str) {
        if self.score != text {
            log::debug!("Score: {text}");
            self.score = text.to_string();
        }
    }
    fn set_timer_text(&mut self, text: &str) {
        self.timer.clear();
        self.timer.push_str(text);
    }
    fn set_panels(&mut self, panels: PanelVisibility) {
        if self.panels != panels {
            log::info!("Panels: game over {}, score {}", panels.game_over, panels.score);
            self.panels = panels;
        }
    }
}

/// Seeded bot that grabs the body once it settles and flings it upward
enum Bot {
    Waiting,
    Pulling { frames_left: u32, offset: Vec2 },
    Releasing,
}

impl Bot {
    const PULL_FRAMES: u32 = 20;

    fn pointer(&mut self, body: &SimBody, projection: &OrthoProjection, rng: &mut Pcg32) -> PointerSample {
        match *self {
            Bot::Waiting => {
                if body.vel.length() < 0.2 {
                    // Pull down and slightly sideways so the launch goes up
                    let angle = rng.random_range(-2.3f32..-0.85);
                    let length = rng.random_range(1.0f32..4.0);
                    let offset = Vec2::from_angle(angle) * length;
                    *self = Bot::Pulling {
                        frames_left: Self::PULL_FRAMES,
                        offset,
                    };
                    return PointerSample::pressed_at(projection.world_to_screen(body.pos));
                }
                PointerSample::released()
            }
            Bot::Pulling { frames_left, offset } => {
                let progress = 1.0 - frames_left as f32 / Self::PULL_FRAMES as f32;
                *self = if frames_left <= 1 {
                    Bot::Releasing
                } else {
                    Bot::Pulling {
                        frames_left: frames_left - 1,
                        offset,
                    }
                };
                PointerSample::pressed_at(projection.world_to_screen(body.pos + offset * progress))
            }
            Bot::Releasing => {
                *self = Bot::Waiting;
                PointerSample::released()
            }
        }
    }
}

fn parse_args() -> slingclimb::Result<(Settings, u64)> {
    let mut settings = Settings::default();
    let mut seed = 7;
    let mut policy = None;

    for arg in std::env::args().skip(1) {
        if arg.ends_with(".json") {
            settings = Settings::load(&arg)?;
        } else if let Some(p) = DeathPolicy::from_str(&arg) {
            policy = Some(p);
        } else if let Ok(s) = arg.parse() {
            seed = s;
        } else {
            log::warn!("Ignoring argument {arg}");
        }
    }

    if let Some(policy) = policy {
        settings.override_death_policy(policy);
    }
    Ok((settings, seed))
}

fn run() -> slingclimb::Result<()> {
    let (settings, seed) = parse_args()?;
    log::info!("Slingclimb demo, seed {seed}");

    let spawn = settings.player.spawn_point;
    let mut body = SimBody::at(spawn);
    let mut level = Level::new(settings, &body)?;
    let mut rng = Pcg32::seed_from_u64(seed);

    let mut bot = Bot::Waiting;
    let mut visuals = LogVisuals::default();
    let mut scenes = DemoScenes::default();
    let mut hud = LogHud::default();
    let mut contacts = Vec::new();
    let (mut launches, mut deaths, mut best_height) = (0u32, 0u32, 0.0f32);

    for frame_index in 0..MAX_FRAMES {
        let camera = level.camera.position();
        let projection = OrthoProjection {
            center: Vec2::new(camera.x, camera.y),
        };
        let pointer = if level.player.is_dead() {
            bot = Bot::Waiting;
            PointerSample::released()
        } else {
            bot.pointer(&body, &projection, &mut rng)
        };

        let input = TickInput {
            pointer,
            contacts: std::mem::take(&mut contacts),
        };
        let mut frame = Frame {
            body: Some(&mut body as &mut dyn PhysicsBody),
            projection: &projection,
            visuals: &mut visuals,
            scenes: &mut scenes,
            hud: &mut hud,
        };
        tick(&mut level, &mut frame, &input, DT);

        for event in &level.events {
            match event {
                GameEvent::Launched { .. } => launches += 1,
                GameEvent::Died => deaths += 1,
                _ => {}
            }
        }

        contacts = body.step(DT);
        best_height = best_height.max(body.pos.y);
        level.score.set(best_height as u32);

        match scenes.pending.take() {
            Some(SceneRequest::ReloadCurrent) => {
                body = SimBody::at(spawn);
                contacts.clear();
                bot = Bot::Waiting;
                level.restart(&body);
            }
            Some(SceneRequest::Load(name)) => {
                log::info!("Loading {name} after {} frames", frame_index + 1);
                break;
            }
            None => {}
        }
    }

    println!(
        "launches {launches}, deaths {deaths}, best height {best_height:.1}, score {}, time {}",
        hud.score, hud.timer
    );
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
