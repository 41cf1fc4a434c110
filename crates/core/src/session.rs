//! Game session module - lifecycle state machine and per-tick rules
//!
//! This module ties together the grid, the active part, the scheduler and the
//! random source.
//!
//! # Phases
//!
//! - `Intro --Start--> Playing`: fresh grid, no part, counters reset, frame armed
//! - `Playing --PauseResume--> Playing`: toggles `running`; resume re-arms
//! - `Playing --(gravity blocked while y < 0)--> GameOver`: frame cancelled
//! - `GameOver --Start--> Playing`: same reset as from the intro
//!
//! # Ticks
//!
//! Every accepted frame decrements the fast countdown. When it elapses an
//! input-response tick runs (spawn, rotation, horizontal moves, soft drop),
//! then the slow countdown is decremented; when that elapses a gravity tick
//! runs (descend, or merge + row-clear, or game over). The frame is rendered
//! after every input-response tick.

use log::{debug, info};

use crate::collision::collides;
use crate::grid::Grid;
use crate::keys::KeySet;
use crate::part::Part;
use crate::rng::{RandomSource, SimpleRng};
use crate::scheduler::{FrameStep, Scheduler};
use crate::snapshot::{Frame, RenderSink};
use crate::types::{ConfigError, EngineConfig, Key, Phase};

/// What a call to [`GameSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No frame was pending (intro, paused or game over).
    Inactive,
    /// The frame arrived below the throttle floor and was dropped.
    Throttled,
    /// The frame was accepted; no countdown elapsed.
    Idle,
    /// An input-response tick ran.
    Input,
    /// An input-response tick and a gravity tick ran.
    Gravity,
    /// The gravity tick ended the game.
    GameOver,
}

#[derive(Debug, Clone)]
pub struct GameSession<R: RandomSource = SimpleRng> {
    config: EngineConfig,
    phase: Phase,
    running: bool,
    grid: Grid,
    part: Option<Part>,
    keys: KeySet,
    rotate_lock: bool,
    scheduler: Scheduler,
    rng: R,
    rows_cleared: u32,
    parts_spawned: u32,
}

impl<R: RandomSource> GameSession<R> {
    /// Create a session in the intro phase.
    pub fn new(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.rows, config.cols)?;

        Ok(Self {
            config,
            phase: Phase::Intro,
            running: false,
            grid,
            part: None,
            keys: KeySet::empty(),
            rotate_lock: false,
            scheduler: Scheduler::new(&config),
            rng,
            rows_cleared: 0,
            parts_spawned: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&Part> {
        self.part.as_ref()
    }

    pub fn keys(&self) -> KeySet {
        self.keys
    }

    pub fn rotate_locked(&self) -> bool {
        self.rotate_lock
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    pub fn parts_spawned(&self) -> u32 {
        self.parts_spawned
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn part_mut(&mut self) -> &mut Option<Part> {
        &mut self.part
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            phase: self.phase,
            running: self.running,
            grid: &self.grid,
            part: self.part.as_ref(),
            rows_cleared: self.rows_cleared,
            parts_spawned: self.parts_spawned,
        }
    }

    /// Hand the current state to a sink (e.g. after a terminal resize).
    pub fn render<S: RenderSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.render(&self.frame())
    }

    /// Key-down: mark the key held and dispatch edge-triggered transitions.
    pub fn key_down<S: RenderSink>(&mut self, key: Key, sink: &mut S) -> Result<(), S::Error> {
        self.keys.insert(KeySet::from(key));

        match key {
            Key::Start if self.phase.accepts_start() => {
                self.new_game();
                self.render(sink)
            }
            Key::PauseResume if self.phase == Phase::Playing => {
                self.toggle_pause();
                self.render(sink)
            }
            _ => Ok(()),
        }
    }

    /// Key-up: clear the held flag; releasing a rotation key unlocks rotation.
    pub fn key_up(&mut self, key: Key) {
        self.keys.remove(KeySet::from(key));
        if self.phase == Phase::Playing && key.is_rotation() {
            self.rotate_lock = false;
        }
    }

    fn new_game(&mut self) {
        self.grid.reset();
        self.phase = Phase::Playing;
        self.running = true;
        self.part = None;
        self.rotate_lock = false;
        self.rows_cleared = 0;
        self.parts_spawned = 0;
        self.scheduler.reset();
        self.scheduler.arm();
        info!(
            "new game on a {}x{} grid",
            self.config.rows, self.config.cols
        );
    }

    fn toggle_pause(&mut self) {
        self.running = !self.running;
        if self.running {
            self.scheduler.arm();
        } else {
            self.scheduler.cancel();
        }
        info!("{}", if self.running { "resumed" } else { "paused" });
    }

    /// Offer one real-time frame at monotonic time `now_ms`.
    pub fn tick<S: RenderSink>(&mut self, now_ms: u64, sink: &mut S) -> Result<TickOutcome, S::Error> {
        let outcome = match self.scheduler.frame(now_ms) {
            FrameStep::NotArmed => return Ok(TickOutcome::Inactive),
            FrameStep::Throttled => return Ok(TickOutcome::Throttled),
            FrameStep::Idle => TickOutcome::Idle,
            FrameStep::Input => {
                self.input_tick();
                if self.scheduler.keyframe() {
                    if self.gravity_tick() {
                        self.render(sink)?;
                        return Ok(TickOutcome::GameOver);
                    }
                    TickOutcome::Gravity
                } else {
                    TickOutcome::Input
                }
            }
        };

        if outcome != TickOutcome::Idle {
            self.render(sink)?;
        }
        if self.phase == Phase::Playing && self.running {
            self.scheduler.arm();
        }
        Ok(outcome)
    }

    /// Input-response tick: spawn when empty, else apply held keys.
    fn input_tick(&mut self) {
        let Some(mut part) = self.part else {
            self.spawn();
            return;
        };

        if part.y < 0 && self.keys.intersects(KeySet::ROTATE) && !self.rotate_lock {
            self.rotate_lock = true;
            let reverse = !self.keys.contains(KeySet::ROTATE_CW);
            part.rotate(reverse);
            if collides(&self.grid, &part) {
                part.rotate(!reverse);
            }
        }

        if self.keys.contains(KeySet::MOVE_LEFT) {
            self.try_translate(&mut part, -1, 0);
        }
        if self.keys.contains(KeySet::MOVE_RIGHT) {
            self.try_translate(&mut part, 1, 0);
        }
        if self.keys.contains(KeySet::SOFT_DROP) {
            self.try_translate(&mut part, 0, 1);
        }

        self.part = Some(part);
    }

    fn try_translate(&self, part: &mut Part, dx: i32, dy: i32) -> bool {
        part.translate(dx, dy);
        if collides(&self.grid, part) {
            part.translate(-dx, -dy);
            return false;
        }
        true
    }

    fn spawn(&mut self) {
        let part = Part::spawn(&mut self.rng, self.config.cols);
        debug!("spawned {:?} at ({}, {})", part.kind, part.x, part.y);
        self.part = Some(part);
        self.parts_spawned = self.parts_spawned.wrapping_add(1);
    }

    /// Gravity tick. Returns true when the game ended.
    fn gravity_tick(&mut self) -> bool {
        let Some(mut part) = self.part else {
            return false;
        };

        part.translate(0, 1);
        if !collides(&self.grid, &part) {
            self.part = Some(part);
            return false;
        }
        part.translate(0, -1);

        if part.y < 0 {
            self.part = Some(part);
            self.end_game();
            return true;
        }

        self.grid.merge(&part);
        self.part = None;
        let cleared = self.grid.clear_completed_rows();
        if cleared > 0 {
            self.rows_cleared += cleared as u32;
            info!("cleared {} rows ({} total)", cleared, self.rows_cleared);
        }
        false
    }

    fn end_game(&mut self) {
        self.phase = Phase::GameOver;
        self.running = false;
        self.scheduler.cancel();
        info!(
            "game over after {} parts, {} rows cleared",
            self.parts_spawned, self.rows_cleared
        );
    }
}
