//! Session Snapshots
//!
//! Copies the world into a `SessionSnapshot` and rebuilds a world from one.
//! Snapshots never alias session state.

use bevy_ecs::prelude::*;
use railyard_events::{SessionSnapshot, TrainSnapshot};

use crate::components::{
    Body, ChatHistory, ConversationMemory, Disposition, Grid, Livery, Persona, PromiseLedger,
    Pursuit, Roster, SessionState, TickLog, Train, TrainId, TrainName,
};
use crate::error::RailyardError;

fn capture_train(world: &World, entity: Entity) -> Option<TrainSnapshot> {
    let persona = world.get::<Persona>(entity)?;
    let body = world.get::<Body>(entity)?;
    let pursuit = world.get::<Pursuit>(entity)?;
    let disposition = world.get::<Disposition>(entity)?;

    Some(TrainSnapshot {
        id: world.get::<TrainId>(entity)?.0.clone(),
        name: world.get::<TrainName>(entity)?.0.clone(),
        color: world.get::<Livery>(entity)?.0.clone(),
        framework: persona.framework,
        target_kind: pursuit.target_kind,
        body: body.segments.clone(),
        direction: body.direction,
        mood: disposition.mood,
        paused: disposition.paused,
        appetite: disposition.appetite,
        broken_promises: world.get::<PromiseLedger>(entity).map_or(0, |l| l.broken),
        beliefs: persona.beliefs,
        target: pursuit.target.clone(),
    })
}

/// Captures the full session state, trains in roster order.
pub fn capture_snapshot(world: &World) -> SessionSnapshot {
    let state = world.resource::<SessionState>();
    let trains = world
        .resource::<Roster>()
        .iter()
        .filter_map(|entity| capture_train(world, entity))
        .collect();

    SessionSnapshot {
        session_id: state.session_id.clone(),
        phase: state.phase,
        turn: state.turn,
        max_turns: state.max_turns,
        grid: world.resource::<Grid>().to_snapshot(),
        trains,
        collisions: world.resource::<TickLog>().collisions.clone(),
        outcome: state.outcome,
    }
}

/// Inserts the session resources and trains described by a snapshot.
///
/// Conversation memory and chat history start empty.
pub fn rehydrate(world: &mut World, snapshot: &SessionSnapshot) -> Result<(), RailyardError> {
    let grid = Grid::from_snapshot(&snapshot.grid)?;
    let size = grid.size();

    for train in &snapshot.trains {
        if train.body.is_empty() {
            return Err(RailyardError::EmptyBody(train.id.clone()));
        }
        if let Some(&position) = train.body.iter().find(|p| !p.in_bounds(size)) {
            return Err(RailyardError::SegmentOutOfBounds {
                train: train.id.clone(),
                position,
                size,
            });
        }
    }

    world.insert_resource(grid);
    world.insert_resource(SessionState {
        session_id: snapshot.session_id.clone(),
        phase: snapshot.phase,
        turn: snapshot.turn,
        max_turns: snapshot.max_turns,
        outcome: snapshot.outcome,
    });
    let mut log = TickLog::new();
    log.collisions = snapshot.collisions.clone();
    world.insert_resource(log);

    let mut roster = Roster::default();
    for train in &snapshot.trains {
        let entity = world
            .spawn((
                Train,
                TrainId(train.id.clone()),
                TrainName(train.name.clone()),
                Livery(train.color.clone()),
                Persona {
                    framework: train.framework,
                    beliefs: train.beliefs,
                },
                Body::new(train.body.clone(), train.direction),
                Pursuit {
                    target_kind: train.target_kind,
                    target: train.target.clone(),
                },
                Disposition {
                    mood: train.mood,
                    appetite: train.appetite,
                    paused: train.paused,
                },
                PromiseLedger {
                    broken: train.broken_promises,
                },
                ConversationMemory::new(),
                ChatHistory::default(),
            ))
            .id();
        roster.push(entity);
    }
    world.insert_resource(roster);

    tracing::info!(
        "Rehydrated session {} at turn {} with {} trains",
        snapshot.session_id,
        snapshot.turn,
        snapshot.trains.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use railyard_events::fixtures::sample_session;
    use railyard_events::Position;

    #[test]
    fn test_rehydrate_then_capture_matches_fixture() {
        let snapshot = sample_session();
        let mut world = World::new();
        rehydrate(&mut world, &snapshot).unwrap();
        assert_eq!(capture_snapshot(&world), snapshot);
    }

    #[test]
    fn test_rehydrate_rejects_out_of_bounds_body() {
        let mut snapshot = sample_session();
        snapshot.trains[0].body[0] = Position::new(snapshot.grid.size, 0);
        let mut world = World::new();
        let err = rehydrate(&mut world, &snapshot).unwrap_err();
        assert!(matches!(err, RailyardError::SegmentOutOfBounds { .. }));
        assert!(world.get_resource::<Roster>().is_none());
    }

    #[test]
    fn test_rehydrate_rejects_empty_body() {
        let mut snapshot = sample_session();
        snapshot.trains[1].body.clear();
        let mut world = World::new();
        assert!(matches!(
            rehydrate(&mut world, &snapshot),
            Err(RailyardError::EmptyBody(_))
        ));
    }
}
