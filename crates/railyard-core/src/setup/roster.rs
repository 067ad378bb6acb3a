//! Train Spawning
//!
//! Spawns the configured roster in order and locks each train onto its
//! first target.

use bevy_ecs::prelude::*;
use railyard_events::{EntityKind, Framework};
use std::collections::HashSet;
use std::fmt;

use crate::brain;
use crate::components::{
    Body, ChatHistory, ConversationMemory, Disposition, Grid, Livery, Persona, PromiseLedger,
    Pursuit, Roster, Train, TrainId, TrainName,
};
use crate::config::TrainConfig;
use crate::error::RailyardError;

/// Spawns one train and appends it to the roster. The grid resource must
/// already be in place; the train's target is selected from it.
pub fn spawn_train(world: &mut World, spec: &TrainConfig) -> Entity {
    let head = spec.body[0];
    let target = brain::select_target(world.resource::<Grid>(), head, spec.target_kind);

    let entity = world
        .spawn((
            Train,
            TrainId(spec.id.clone()),
            TrainName(spec.name.clone()),
            Livery(spec.color.clone()),
            Persona {
                framework: spec.framework,
                beliefs: spec.beliefs,
            },
            Body::new(spec.body.clone(), spec.direction),
            Pursuit {
                target_kind: spec.target_kind,
                target,
            },
            Disposition::default(),
            PromiseLedger::default(),
            ConversationMemory::new(),
            ChatHistory::default(),
        ))
        .id();

    world.resource_mut::<Roster>().push(entity);
    entity
}

/// Validates the whole roster against the grid, then spawns it in order.
/// Nothing is spawned if any entry is invalid.
pub fn spawn_roster(world: &mut World, trains: &[TrainConfig]) -> Result<Vec<Entity>, RailyardError> {
    if trains.is_empty() {
        return Err(RailyardError::EmptyRoster);
    }

    let size = world.resource::<Grid>().size();
    let mut ids = HashSet::new();
    for spec in trains {
        if !ids.insert(spec.id.as_str()) {
            return Err(RailyardError::DuplicateTrain(spec.id.clone()));
        }
        spec.validate(size)?;
    }

    let entities = trains.iter().map(|spec| spawn_train(world, spec)).collect();
    Ok(entities)
}

/// One roster line for the start banner
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub name: String,
    pub framework: Framework,
    pub target_kind: EntityKind,
}

/// Summary of spawned trains
#[derive(Debug, Clone, PartialEq)]
pub struct RosterSummary {
    pub trains: Vec<RosterEntry>,
    pub entities_on_grid: usize,
}

/// Summarizes the roster in roster order.
pub fn roster_summary(world: &World) -> RosterSummary {
    let trains = world
        .resource::<Roster>()
        .iter()
        .filter_map(|entity| {
            let name = world.get::<TrainName>(entity)?;
            let persona = world.get::<Persona>(entity)?;
            let pursuit = world.get::<Pursuit>(entity)?;
            Some(RosterEntry {
                name: name.0.clone(),
                framework: persona.framework,
                target_kind: pursuit.target_kind,
            })
        })
        .collect();

    RosterSummary {
        trains,
        entities_on_grid: world.resource::<Grid>().remaining(),
    }
}

impl fmt::Display for RosterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} trains active:", self.trains.len())?;
        for train in &self.trains {
            writeln!(f, "  {} ({}) -> {}s", train.name, train.framework, train.target_kind)?;
        }
        write!(f, "Grid: {} entities present", self.entities_on_grid)
    }
}
