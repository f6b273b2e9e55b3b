use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use boxy::{
    core::prelude::*,
    player::{coin::CoinColour, config::ControllerConfig, PlayerController},
    util::{log::setup_log, prefs::Preferences},
};

const FRAME_DELTA: Duration = Duration::from_micros(16_667);
const FIXED_STEP: Duration = Duration::from_micros(FIXED_UPDATE_INTERVAL_US as u64);
const DEMO_FRAMES: usize = 720;

const GRAVITY: f32 = -9.81;
const HALF_HEIGHT: f32 = 0.5;
const ANGULAR_DAMPING: f32 = 0.98;
const INVERSE_INERTIA: f32 = 50.0;
const START_LEVEL: &str = "start";

/// A box on an infinite flat floor at `y = 0`. Enough physics to jump, land, and tip over.
#[derive(Debug)]
struct Sandbox {
    position: Vec2,
    velocity: Vec2,
    rotation: f32,
    angular_velocity: f32,
    force: Vec2,
    torque: f32,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self {
            position: Vec2 { x: 0.0, y: HALF_HEIGHT },
            velocity: Vec2::zero(),
            rotation: 0.0,
            angular_velocity: 0.0,
            force: Vec2::zero(),
            torque: 0.0,
        }
    }
}

impl Sandbox {
    fn on_floor(&self) -> bool {
        self.position.y <= HALF_HEIGHT + EPSILON
    }

    fn integrate(&mut self, delta: Duration) {
        let dt = gg_float::secs(delta);
        self.velocity += (self.force + Vec2::up() * GRAVITY) * dt;
        self.position += self.velocity * dt;
        if self.position.y < HALF_HEIGHT {
            self.position.y = HALF_HEIGHT;
            self.velocity.y = 0.0;
        }
        self.force = Vec2::zero();

        self.angular_velocity = (self.angular_velocity + self.torque * INVERSE_INERTIA * dt) * ANGULAR_DAMPING;
        self.rotation = (self.rotation + self.angular_velocity * dt).rem_euclid(360.0);
        self.torque = 0.0;
        if self.on_floor() && self.angular_velocity.abs() < 1.0 {
            // Settles flat on whichever face is nearest the floor.
            self.angular_velocity = 0.0;
            self.rotation = ((self.rotation / 90.0).round() * 90.0).rem_euclid(360.0);
        }
    }
}

impl PhysicsWorld for Sandbox {
    fn linecast(&self, from: Vec2, to: Vec2, mask: LayerMask) -> bool {
        mask.contains_layer(LayerMask::GROUND_LAYER) && from.y >= 0.0 && to.y <= 0.0
    }
    fn velocity(&self) -> Vec2 {
        self.velocity
    }
    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }
    fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }
    fn add_torque(&mut self, torque: f32) {
        self.torque += torque;
    }
    fn position(&self) -> Vec2 {
        self.position
    }
    fn rotation_z(&self) -> f32 {
        self.rotation
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum LevelRequest {
    Reload,
    Load(String),
}

struct DemoLevel {
    current: String,
    coins: BTreeMap<String, usize>,
    prefs: Preferences,
    request: Option<LevelRequest>,
}

impl DemoLevel {
    fn new(prefs: Preferences) -> Self {
        Self {
            current: START_LEVEL.to_string(),
            coins: coins_in(START_LEVEL),
            prefs,
            request: None,
        }
    }

    fn remove_coin(&mut self, colour: CoinColour) {
        if let Some(count) = self.coins.get_mut(colour.tag()) {
            *count = count.saturating_sub(1);
        }
    }

    /// Applies a pending reload or level change. Returns true if the level was (re)loaded.
    fn apply_request(&mut self) -> bool {
        let Some(request) = self.request.take() else {
            return false;
        };
        if let LevelRequest::Load(name) = request {
            self.current = name;
        }
        self.coins = coins_in(&self.current);
        info!("loaded level {}", self.current);
        true
    }
}

fn coins_in(level: &str) -> BTreeMap<String, usize> {
    let coins: &[(CoinColour, usize)] = match level {
        START_LEVEL => &[(CoinColour::Red, 3), (CoinColour::Blue, 1)],
        _ => &[(CoinColour::Blue, 2), (CoinColour::Red, 1)],
    };
    coins.iter()
        .map(|(colour, count)| (colour.tag().to_string(), *count))
        .collect()
}

impl LevelHost for DemoLevel {
    fn reload_current_level(&mut self) {
        self.request.get_or_insert(LevelRequest::Reload);
    }
    fn load_level(&mut self, name: &str) {
        self.request = Some(LevelRequest::Load(name.to_string()));
    }
    fn count_entities_tagged(&self, tag: &str) -> usize {
        self.coins.get(tag).copied().unwrap_or(0)
    }
    fn persistent_flag(&self, key: &str) -> i32 {
        self.prefs.get(key)
    }
    fn set_persistent_flag(&mut self, key: &str, value: i32) {
        if let Err(e) = self.prefs.set(key, value) {
            error!("could not persist {key}={value}: {e:?}");
        }
    }
}

#[derive(Default)]
struct LogRenderer {
    overlay_visible: bool,
}

impl Renderer for LogRenderer {
    fn show_cosmetic(&mut self, state: CosmeticState) {
        info!("player looks {}", state.key());
    }
    fn show_overlay(&mut self, overlay: &TextOverlay) {
        if !self.overlay_visible {
            info!("overlay: {}", overlay.text);
            self.overlay_visible = true;
        }
    }
    fn hide_overlay(&mut self) {
        if self.overlay_visible {
            info!("overlay hidden");
            self.overlay_visible = false;
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum ScriptAction {
    Axis(f32),
    JumpDown,
    JumpUp,
    Coin(CoinColour),
    Horrify,
}

const SCRIPT: &[(usize, ScriptAction)] = &[
    (0, ScriptAction::Axis(1.0)),
    (40, ScriptAction::JumpDown),
    (52, ScriptAction::JumpUp),
    (80, ScriptAction::Coin(CoinColour::Red)),
    (100, ScriptAction::Coin(CoinColour::Red)),
    (110, ScriptAction::Horrify),
    (120, ScriptAction::Coin(CoinColour::Red)),
    (200, ScriptAction::Axis(-1.0)),
    (230, ScriptAction::Coin(CoinColour::Blue)),
    (260, ScriptAction::Coin(CoinColour::Red)),
    (300, ScriptAction::JumpDown),
    (310, ScriptAction::JumpUp),
    (520, ScriptAction::Axis(0.0)),
    (560, ScriptAction::Coin(CoinColour::Blue)),
    (600, ScriptAction::Coin(CoinColour::Blue)),
];

struct Demo {
    config: ControllerConfig,
    player: PlayerController,
    sandbox: Sandbox,
    input: InputHandler,
    level: DemoLevel,
    renderer: LogRenderer,
    fixed_update_us: u128,
    loads: usize,
}

impl Demo {
    fn new(config: ControllerConfig, prefs: Preferences) -> Result<Self> {
        Ok(Self {
            player: PlayerController::new(config.clone())?,
            config,
            sandbox: Sandbox::default(),
            input: InputHandler::new(),
            level: DemoLevel::new(prefs),
            renderer: LogRenderer::default(),
            fixed_update_us: 0,
            loads: 0,
        })
    }

    fn apply(&mut self, action: ScriptAction) {
        match action {
            ScriptAction::Axis(axis) => self.input.set_horizontal_axis(axis),
            ScriptAction::JumpDown => self.input.queue_jump_event(true),
            ScriptAction::JumpUp => self.input.queue_jump_event(false),
            ScriptAction::Horrify => self.player.horrify(),
            ScriptAction::Coin(colour) => {
                let mut ctx = UpdateContext::new(
                    &self.input, &mut self.sandbox, &mut self.level, &mut self.renderer);
                if !self.player.handle_get_coin(colour, &mut ctx) {
                    info!("{colour:?} coin ignored ({:?})", self.player.feeling_state());
                }
                self.level.remove_coin(colour);
            }
        }
    }

    fn update(&mut self, delta: Duration) -> Result<()> {
        self.input.update_step();

        let mut ctx = UpdateContext::new(
            &self.input, &mut self.sandbox, &mut self.level, &mut self.renderer);
        self.player.on_frame(delta, &mut ctx);

        self.fixed_update_us += delta.as_micros();
        let fixed_updates = self.fixed_update_us / FIXED_UPDATE_INTERVAL_US;
        self.fixed_update_us -= fixed_updates * FIXED_UPDATE_INTERVAL_US;
        if fixed_updates > MAX_FIXED_UPDATES {
            warn!("fixed update behind, dropping {} steps", fixed_updates - MAX_FIXED_UPDATES);
        }
        for _ in 0..fixed_updates.min(MAX_FIXED_UPDATES) {
            let mut ctx = UpdateContext::new(
                &self.input, &mut self.sandbox, &mut self.level, &mut self.renderer);
            self.player.on_fixed_step(FIXED_STEP, &mut ctx);
            self.sandbox.integrate(FIXED_STEP);
        }

        if self.level.apply_request() {
            self.loads += 1;
            self.sandbox = Sandbox::default();
            self.player = PlayerController::new(self.config.clone())?;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    setup_log(None)?;

    let prefs = match std::env::args().nth(1) {
        Some(path) => Preferences::load(PathBuf::from(path))?,
        None => Preferences::in_memory(),
    };
    let mut demo = Demo::new(ControllerConfig::default(), prefs)?;

    let mut script = SCRIPT.iter().peekable();
    for frame in 0..DEMO_FRAMES {
        while let Some((_, action)) = script.next_if(|(at, _)| *at == frame) {
            demo.apply(*action);
        }
        demo.update(FRAME_DELTA)?;
    }

    info!(
        "demo finished after {DEMO_FRAMES} frames: {} level loads, now in level {}, player {:?}/{:?}",
        demo.loads,
        demo.level.current,
        demo.player.movement_state(),
        demo.player.feeling_state()
    );
    Ok(())
}
