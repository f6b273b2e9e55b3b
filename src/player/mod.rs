use std::time::Duration;

use num_traits::Zero;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::core::{
    coroutine::{update_coroutines, HasScheduler},
    prelude::*,
};

pub mod coin;
pub mod config;
pub mod kinematics;
pub mod rotation;

use coin::{CoinColour, CoinOutcome, CoinScoring};
use config::ControllerConfig;
use kinematics::JumpStep;
use rotation::RotationBand;

#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum MovementState {
    #[default]
    Walking,
    StuckOnSide,
    Jumping,
}

#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum FeelingState {
    #[default]
    Normal,
    Dead,
    TooCool,
    Horrified,
}

impl From<FeelingState> for CosmeticState {
    fn from(value: FeelingState) -> Self {
        match value {
            FeelingState::Normal => CosmeticState::Normal,
            FeelingState::Dead => CosmeticState::Dead,
            FeelingState::TooCool => CosmeticState::Cool,
            FeelingState::Horrified => CosmeticState::Horrified,
        }
    }
}

/// Drives one player entity: movement, jumping, righting itself, dying, and scoring coins.
///
/// The host calls [`on_frame`](Self::on_frame) once per rendered frame and
/// [`on_fixed_step`](Self::on_fixed_step) once per fixed physics step, in any interleaving. A
/// level reload is expected to drop this controller and create a fresh one, which is the only
/// way back from [`FeelingState::Dead`].
#[derive(Debug)]
pub struct PlayerController {
    config: ControllerConfig,

    movement_state: MovementState,
    previous_movement_state: MovementState,
    feeling_state: FeelingState,
    grounded: bool,
    rotation: f32,
    rotation_band: Option<RotationBand>,
    jump_hold_time: f32,

    restarted_since_last_death: bool,
    advance_requested: bool,
    last_cosmetic: Option<CosmeticState>,

    coins: CoinScoring,
    rng: StdRng,
    scheduler: Scheduler<PlayerController>,
}

impl HasScheduler for PlayerController {
    fn scheduler(&mut self) -> &mut Scheduler<Self> {
        &mut self.scheduler
    }
}

impl PlayerController {
    pub fn new(config: ControllerConfig) -> Result<Self> {
        config.validate().context("invalid player controller config")?;
        Ok(Self {
            config,
            movement_state: MovementState::Walking,
            previous_movement_state: MovementState::Walking,
            feeling_state: FeelingState::Normal,
            grounded: false,
            rotation: 0.0,
            rotation_band: None,
            jump_hold_time: 0.0,
            restarted_since_last_death: false,
            advance_requested: false,
            last_cosmetic: None,
            coins: CoinScoring::default(),
            rng: StdRng::from_entropy(),
            scheduler: Scheduler::default(),
        })
    }

    /// Makes the death tumble reproducible.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &ControllerConfig { &self.config }
    pub fn movement_state(&self) -> MovementState { self.movement_state }
    pub fn previous_movement_state(&self) -> MovementState { self.previous_movement_state }
    pub fn feeling_state(&self) -> FeelingState { self.feeling_state }
    pub fn is_grounded(&self) -> bool { self.grounded }
    pub fn rotation_band(&self) -> Option<RotationBand> { self.rotation_band }
    /// Seconds the current jump has been held. Zero outside [`MovementState::Jumping`].
    pub fn jump_hold_time(&self) -> f32 { self.jump_hold_time }
    pub fn coins(&self) -> &CoinScoring { &self.coins }
    /// Game time seen so far, the sum of every `on_frame` delta.
    pub fn elapsed(&self) -> Duration { self.scheduler.now() }
    /// Delayed actions (restart, level advance, message) still pending.
    pub fn pending_actions(&self) -> usize { self.scheduler.len() }

    /// Sensing phase: grounded and rotation checks, state transitions, cosmetics, and the
    /// jump button. Also runs any delayed actions that have come due.
    pub fn on_frame(&mut self, delta: Duration, ctx: &mut UpdateContext<'_>) {
        self.scheduler.advance(delta);

        let position = ctx.physics().position();
        self.grounded = ctx.physics().linecast(
            position,
            position + self.config.ground_check_offset,
            LayerMask::GROUND,
        );
        self.rotation = ctx.physics().rotation_z();
        self.rotation_band = RotationBand::classify(self.rotation);
        self.update_side_state(ctx);

        let jump_pressed = ctx.input().jump_pressed();
        if self.feeling_state == FeelingState::Dead && jump_pressed {
            self.restart_level(ctx);
        }
        self.update_cosmetic(ctx);
        if jump_pressed {
            self.handle_jump_press(ctx);
        }

        update_coroutines(self, ctx);
    }

    fn update_side_state(&mut self, ctx: &mut UpdateContext<'_>) {
        let is_rotated = self.rotation_band.is_some();
        if self.movement_state == MovementState::StuckOnSide && !is_rotated && self.grounded {
            info!("righted at {:.1} degrees", self.rotation);
            self.set_movement_state(MovementState::Walking);
        } else if is_rotated && ctx.physics().velocity().y.is_zero() {
            let velocity = ctx.physics().velocity();
            if !velocity.x.is_zero() {
                ctx.physics().set_velocity(velocity.with_x(0.0));
            }
            if self.movement_state != MovementState::StuckOnSide {
                info!("stuck on side at {:.1} degrees", self.rotation);
                self.set_movement_state(MovementState::StuckOnSide);
            }
        }
    }

    fn update_cosmetic(&mut self, ctx: &mut UpdateContext<'_>) {
        let cosmetic = CosmeticState::from(self.feeling_state);
        if self.last_cosmetic != Some(cosmetic) {
            ctx.renderer().show_cosmetic(cosmetic);
            self.last_cosmetic = Some(cosmetic);
        }
    }

    fn handle_jump_press(&mut self, ctx: &mut UpdateContext<'_>) {
        if self.movement_state == MovementState::StuckOnSide {
            if let Some(band) = self.rotation_band {
                ctx.physics().add_torque(self.config.stuck_torques.for_band(band));
            } else {
                error_every_seconds!(1,
                    "stuck on side but rotation {:.1} is on no side, applying no torque",
                    self.rotation);
            }
            self.set_movement_state(MovementState::Walking);
        } else if self.grounded {
            self.set_movement_state(MovementState::Jumping);
        }
    }

    fn set_movement_state(&mut self, next: MovementState) {
        if next == self.movement_state {
            return;
        }
        if next == MovementState::Jumping || self.movement_state == MovementState::Jumping {
            self.jump_hold_time = 0.0;
        }
        self.previous_movement_state = self.movement_state;
        self.movement_state = next;
    }

    /// Physics phase: horizontal speed from the input axis, and the jump arc.
    pub fn on_fixed_step(&mut self, delta: Duration, ctx: &mut UpdateContext<'_>) {
        let velocity = ctx.physics().velocity();
        let mut next = velocity;

        if self.movement_state != MovementState::StuckOnSide {
            let axis = ctx.input().horizontal_axis();
            next.x = kinematics::horizontal_speed(velocity.x, axis, &self.config);
        }

        if self.movement_state == MovementState::Jumping {
            let step = kinematics::jump_step(
                self.previous_movement_state != MovementState::Jumping,
                ctx.input().jump_held(),
                next.y,
                self.jump_hold_time,
                gg_float::secs(delta),
                &self.config,
            );
            match step {
                JumpStep::Launch => {
                    ctx.physics().add_force(Vec2::up() * self.config.jump_force);
                    self.previous_movement_state = MovementState::Jumping;
                }
                JumpStep::Rise { speed_y, hold_time } => {
                    next.y = speed_y;
                    self.jump_hold_time = hold_time;
                }
                JumpStep::Release { speed_y } => {
                    next.y = speed_y;
                    self.set_movement_state(MovementState::Walking);
                }
            }
        }

        if !next.exactly_eq(velocity) {
            ctx.physics().set_velocity(next);
        }
    }

    /// Handles the player touching a coin. Returns false if the pickup was ignored because the
    /// player is dead or has already won.
    pub fn handle_get_coin(&mut self, colour: CoinColour, ctx: &mut UpdateContext<'_>) -> bool {
        if matches!(self.feeling_state, FeelingState::Dead | FeelingState::TooCool) {
            return false;
        }
        match self.coins.collect(colour, ctx.level()) {
            CoinOutcome::Counted { .. } | CoinOutcome::AlreadyComplete => {}
            CoinOutcome::GoalReached => {
                info!("collected every {colour:?} coin");
                self.feeling_state = FeelingState::TooCool;
                self.scheduler.start_coroutine_after(|this: &mut Self, ctx, _last_state| {
                    this.advance_level(ctx);
                    CoroutineResponse::Complete
                }, ADVANCE_LEVEL_DELAY);
            }
            CoinOutcome::WrongColour { committed } => {
                info!("picked up a {colour:?} coin while collecting {committed:?}");
                self.die(ctx);
            }
        }
        true
    }

    /// Something scary is nearby. Only a Normal player can be horrified.
    pub fn horrify(&mut self) {
        if self.feeling_state == FeelingState::Normal {
            self.feeling_state = FeelingState::Horrified;
        }
    }

    /// Kills the player: a tumbling torque, then a restart after a short delay. The first death
    /// ever also shows an explanatory message before restarting. Does nothing if already dead.
    pub fn die(&mut self, ctx: &mut UpdateContext<'_>) {
        if self.feeling_state == FeelingState::Dead {
            return;
        }
        self.feeling_state = FeelingState::Dead;

        let torque = if self.grounded {
            -ctx.physics().velocity().x.signum() * RAGDOLL_GROUNDED_TORQUE
        } else {
            let magnitude = self.rng.gen_range(RAGDOLL_AIRBORNE_TORQUE);
            if self.rng.gen_bool(0.5) { magnitude } else { -magnitude }
        };
        ctx.physics().add_torque(torque);
        self.restarted_since_last_death = false;

        let first_death = ctx.level().persistent_flag(HAS_DIED_KEY) == 0;
        info!("died (grounded: {}, first death: {first_death})", self.grounded);
        if first_death {
            ctx.level().set_persistent_flag(HAS_DIED_KEY, 1);
            let mut shown_since = None;
            self.scheduler.start_coroutine_after(move |this: &mut Self, ctx, _last_state| {
                let now = this.scheduler.now();
                let since = *shown_since.get_or_insert(now);
                let t = (now - since).as_secs_f32() / FIRST_DEATH_MESSAGE_DURATION.as_secs_f32();
                if t >= 1.0 {
                    ctx.renderer().hide_overlay();
                    this.restart_level(ctx);
                    CoroutineResponse::Complete
                } else {
                    let overlay = TextOverlay::at_fraction(this.config.first_death_message.as_str(), t);
                    ctx.renderer().show_overlay(&overlay);
                    CoroutineResponse::Yield
                }
            }, DEATH_ACTION_DELAY);
        } else {
            self.scheduler.start_coroutine_after(|this: &mut Self, ctx, _last_state| {
                this.restart_level(ctx);
                CoroutineResponse::Complete
            }, DEATH_ACTION_DELAY);
        }
    }

    /// Asks the host to reload the level, at most once per death.
    pub fn restart_level(&mut self, ctx: &mut UpdateContext<'_>) {
        if self.restarted_since_last_death {
            return;
        }
        self.restarted_since_last_death = true;
        info!("restarting level");
        ctx.level().reload_current_level();
    }

    /// Asks the host to load the next level, at most once.
    pub fn advance_level(&mut self, ctx: &mut UpdateContext<'_>) {
        if self.advance_requested {
            return;
        }
        self.advance_requested = true;
        info!("advancing to level {}", self.config.next_level);
        ctx.level().load_level(&self.config.next_level);
    }
}
