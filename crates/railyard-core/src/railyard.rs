//! Railyard Session Owner
//!
//! `Railyard` owns the ECS world and the tick schedule. It is the only
//! writer of session state: ticks, chat and promise reports all go through
//! `&mut self`.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use railyard_events::{ChatReply, Outcome, Phase, SessionSnapshot, TickReport};

use crate::components::{Grid, Roster, SessionState, TickLog};
use crate::config::RailyardConfig;
use crate::error::RailyardError;
use crate::negotiation;
use crate::output::{capture_snapshot, rehydrate};
use crate::setup::{populate_grid, roster_summary, spawn_roster, RosterSummary};
use crate::systems::build_tick_schedule;
use crate::SimRng;

/// A single game session
pub struct Railyard {
    world: World,
    schedule: Schedule,
    config: RailyardConfig,
}

impl Railyard {
    /// Creates a session with an empty grid. The grid is populated and the
    /// roster spawned on `start`.
    pub fn new(config: RailyardConfig) -> Result<Self, RailyardError> {
        config.validate()?;
        let grid = Grid::new(config.session.grid_size)?;
        Ok(Self::assemble(config, grid))
    }

    /// Creates a session over a prepared grid. A non-empty grid is used as
    /// is; an empty one is populated on `start`.
    pub fn with_grid(config: RailyardConfig, grid: Grid) -> Result<Self, RailyardError> {
        config.validate()?;
        for train in &config.trains {
            train.validate(grid.size())?;
        }
        Ok(Self::assemble(config, grid))
    }

    /// Rebuilds a session from a snapshot. Conversation memory starts empty.
    pub fn from_snapshot(
        config: RailyardConfig,
        snapshot: &SessionSnapshot,
    ) -> Result<Self, RailyardError> {
        if snapshot.grid.size != config.session.grid_size {
            return Err(RailyardError::SnapshotGridMismatch {
                expected: config.session.grid_size,
                found: snapshot.grid.size,
            });
        }

        let mut world = World::new();
        rehydrate(&mut world, snapshot)?;
        world.insert_resource(SimRng(SmallRng::seed_from_u64(config.session.seed)));

        Ok(Self {
            world,
            schedule: build_tick_schedule(),
            config,
        })
    }

    fn assemble(config: RailyardConfig, grid: Grid) -> Self {
        let mut world = World::new();
        world.insert_resource(grid);
        world.insert_resource(Roster::default());
        world.insert_resource(SessionState::new(config.session.max_turns));
        world.insert_resource(TickLog::new());
        world.insert_resource(SimRng(SmallRng::seed_from_u64(config.session.seed)));

        Self {
            world,
            schedule: build_tick_schedule(),
            config,
        }
    }

    /// Populates an empty grid, spawns the roster, locks every train onto
    /// its first target and activates the session.
    pub fn start(&mut self) -> Result<(), RailyardError> {
        if self.phase() != Phase::NotStarted {
            return Err(RailyardError::AlreadyStarted);
        }

        if self.world.resource::<Grid>().is_empty() {
            let count = self.config.session.initial_entities;
            self.world
                .resource_scope(|world, mut rng: Mut<SimRng>| {
                    let mut grid = world.resource_mut::<Grid>();
                    populate_grid(&mut grid, count, &mut rng.0)
                })?;
        }

        spawn_roster(&mut self.world, &self.config.trains)?;

        let remaining = self.world.resource::<Grid>().remaining();
        let mut state = self.world.resource_mut::<SessionState>();
        state.phase = Phase::Active;
        tracing::info!(
            "Session {} started: {} trains, {} entities, {} turns",
            state.session_id,
            self.config.trains.len(),
            remaining,
            state.max_turns
        );
        Ok(())
    }

    /// Runs one tick. Returns `None` when the session is not active.
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.is_active() {
            return None;
        }

        self.schedule.run(&mut self.world);

        let state = self.world.resource::<SessionState>();
        let report = self
            .world
            .resource::<TickLog>()
            .to_report(state.turn, state.outcome);
        tracing::debug!(
            "Turn {}: {} moves, {} consumed, {} collisions",
            report.turn,
            report.moves.len(),
            report.consumptions.len(),
            report.collisions.len()
        );
        Some(report)
    }

    /// Routes a message to the addressed trains in roster order and returns
    /// their replies. An inactive session, or mentions matching no train,
    /// yield no replies.
    pub fn handle_player_message(&mut self, text: &str) -> Vec<ChatReply> {
        self.addressed(text)
            .into_iter()
            .filter_map(|entity| self.respond(entity, text))
            .collect()
    }

    /// Trains a message is addressed to, in roster order. Empty when the
    /// session is not active.
    pub fn addressed(&self, text: &str) -> Vec<Entity> {
        if !self.is_active() {
            return Vec::new();
        }
        negotiation::select_addressed(&self.world, text)
    }

    /// One train's reply to a message.
    pub fn respond(&mut self, train: Entity, text: &str) -> Option<ChatReply> {
        if !self.is_active() {
            return None;
        }
        negotiation::respond_to_chat(&mut self.world, train, text)
    }

    /// Records a broken promise against the trains `text` mentions (all
    /// trains when it mentions none). Returns how many trains were marked;
    /// zero when the session is not active.
    pub fn report_broken_promise(&mut self, text: &str) -> usize {
        if !self.is_active() {
            return 0;
        }
        negotiation::report_broken_promise(&mut self.world, text)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        capture_snapshot(&self.world)
    }

    pub fn roster_summary(&self) -> RosterSummary {
        roster_summary(&self.world)
    }

    pub fn phase(&self) -> Phase {
        self.world.resource::<SessionState>().phase
    }

    pub fn is_active(&self) -> bool {
        self.phase() == Phase::Active
    }

    pub fn turn(&self) -> u32 {
        self.world.resource::<SessionState>().turn
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.world.resource::<SessionState>().outcome
    }

    pub fn config(&self) -> &RailyardConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }
}
