//! Movement System
//!
//! Applies each unpaused train's move intent in roster order, then handles
//! consumption when a head lands on its target.

use bevy_ecs::prelude::*;
use railyard_events::{ConsumptionRecord, MoveRecord};

use crate::brain::{self, MoveIntent};
use crate::components::{Body, Disposition, Grid, Pursuit, Roster, TickLog, Train, TrainName};

/// System: advance every unpaused train by one cell
pub fn move_trains(
    roster: Res<Roster>,
    mut grid: ResMut<Grid>,
    mut log: ResMut<TickLog>,
    mut trains: Query<(&TrainName, &mut Body, &mut Pursuit, &mut Disposition), With<Train>>,
) {
    let size = grid.size();

    for entity in roster.iter() {
        let Ok((name, mut body, mut pursuit, mut disposition)) = trains.get_mut(entity) else {
            continue;
        };
        if disposition.paused {
            continue;
        }

        // Drop a lock on an entity another train already ate
        if pursuit.target.as_ref().is_some_and(|t| !grid.holds(t)) {
            let head = body.head();
            let kind = pursuit.target_kind;
            pursuit.target = brain::select_target(&grid, head, kind);
        }

        match brain::plan_move(&body, &pursuit, disposition.paused, size) {
            MoveIntent::Advance { direction, to } => {
                body.direction = direction;
                body.advance(to);
                tracing::debug!("{} moved {} to {}", name.0, direction, to);
                log.moves.push(MoveRecord {
                    train: name.0.clone(),
                    direction,
                    head: to,
                });

                let reached = pursuit.target.as_ref().is_some_and(|t| t.position == to);
                if reached {
                    if let Some(record) =
                        consume_target(&mut grid, name, &mut body, &mut pursuit, &mut disposition)
                    {
                        log.consumptions.push(record);
                    }
                }
            }
            MoveIntent::Blocked { direction } => {
                body.direction = direction;
            }
            MoveIntent::Idle | MoveIntent::Halted => {}
        }
    }
}

/// Eats the pursued entity: clears its cell, lowers appetite, grows the
/// body by one segment and immediately picks the next target.
pub fn consume_target(
    grid: &mut Grid,
    name: &TrainName,
    body: &mut Body,
    pursuit: &mut Pursuit,
    disposition: &mut Disposition,
) -> Option<ConsumptionRecord> {
    let lock = pursuit.target.take()?;
    let eaten = grid.take(lock.position);

    disposition.digest();
    body.grow();
    pursuit.target = brain::select_target(grid, body.head(), pursuit.target_kind);

    tracing::info!(
        "{} consumed {} at {} (appetite {:.1}, mood {})",
        name.0,
        lock.label,
        lock.position,
        disposition.appetite,
        disposition.mood
    );

    Some(ConsumptionRecord {
        train: name.0.clone(),
        label: eaten.map_or(lock.label, |e| e.label),
        position: lock.position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use railyard_events::{Direction, EntityKind, Mood, Position};

    fn spawn_train(world: &mut World, name: &str, segments: Vec<Position>, kind: EntityKind) -> Entity {
        let head = segments[0];
        let target = brain::select_target(world.resource::<Grid>(), head, kind);
        let entity = world
            .spawn((
                Train,
                TrainName(name.to_string()),
                Body::new(segments, Direction::Right),
                Pursuit {
                    target_kind: kind,
                    target,
                },
                Disposition::default(),
            ))
            .id();
        world.resource_mut::<Roster>().push(entity);
        entity
    }

    fn setup_world(grid: Grid) -> World {
        let mut world = World::new();
        world.insert_resource(grid);
        world.insert_resource(Roster::default());
        world.insert_resource(TickLog::new());
        world
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(move_trains);
        schedule.run(world);
    }

    #[test]
    fn test_train_slides_toward_target() {
        let mut grid = Grid::new(9).unwrap();
        grid.place(EntityKind::Goal, "Goal 1", Position::new(5, 0)).unwrap();
        let mut world = setup_world(grid);
        let train = spawn_train(
            &mut world,
            "A",
            vec![Position::new(2, 0), Position::new(1, 0), Position::new(0, 0)],
            EntityKind::Goal,
        );

        run(&mut world);

        let body = world.get::<Body>(train).unwrap();
        assert_eq!(
            body.segments,
            vec![Position::new(3, 0), Position::new(2, 0), Position::new(1, 0)]
        );
        assert_eq!(body.direction, Direction::Right);
        assert_eq!(world.resource::<TickLog>().moves.len(), 1);
    }

    #[test]
    fn test_consumption_grows_and_retargets() {
        let mut grid = Grid::new(9).unwrap();
        grid.place(EntityKind::Goal, "Goal 1", Position::new(1, 0)).unwrap();
        grid.place(EntityKind::Goal, "Goal 2", Position::new(1, 5)).unwrap();
        let mut world = setup_world(grid);
        let train = spawn_train(&mut world, "A", vec![Position::new(0, 0)], EntityKind::Goal);

        run(&mut world);

        assert!(world.resource::<Grid>().get(Position::new(1, 0)).is_none());
        let body = world.get::<Body>(train).unwrap();
        assert_eq!(body.segments, vec![Position::new(1, 0), Position::new(1, 0)]);

        let disposition = world.get::<Disposition>(train).unwrap();
        assert_eq!(disposition.appetite, 0.5);
        assert_eq!(disposition.mood, Mood::Hungry);

        let pursuit = world.get::<Pursuit>(train).unwrap();
        assert_eq!(pursuit.target.as_ref().map(|t| t.label.as_str()), Some("Goal 2"));

        let log = world.resource::<TickLog>();
        assert_eq!(log.consumptions.len(), 1);
        assert_eq!(log.consumptions[0].label, "Goal 1");
    }

    #[test]
    fn test_paused_train_does_not_move() {
        let mut grid = Grid::new(9).unwrap();
        grid.place(EntityKind::Goal, "Goal 1", Position::new(8, 8)).unwrap();
        let mut world = setup_world(grid);
        let train = spawn_train(&mut world, "A", vec![Position::new(0, 0)], EntityKind::Goal);
        world.get_mut::<Disposition>(train).unwrap().comply();

        run(&mut world);

        assert_eq!(world.get::<Body>(train).unwrap().segments, vec![Position::new(0, 0)]);
        assert!(world.resource::<TickLog>().moves.is_empty());
    }

    #[test]
    fn test_idle_train_stays_put() {
        let grid = Grid::new(9).unwrap();
        let mut world = setup_world(grid);
        let train = spawn_train(&mut world, "A", vec![Position::new(4, 4)], EntityKind::Entity);

        run(&mut world);

        assert_eq!(world.get::<Body>(train).unwrap().head(), Position::new(4, 4));
        assert!(world.get::<Pursuit>(train).unwrap().target.is_none());
    }

    #[test]
    fn test_stale_lock_is_replaced() {
        let mut grid = Grid::new(9).unwrap();
        grid.place(EntityKind::Entity, "Entity 1", Position::new(1, 0)).unwrap();
        grid.place(EntityKind::Entity, "Entity 2", Position::new(0, 6)).unwrap();
        let mut world = setup_world(grid);
        // Both trains lock onto Entity 1; the first one eats it
        spawn_train(&mut world, "first", vec![Position::new(0, 0)], EntityKind::Entity);
        let second = spawn_train(&mut world, "second", vec![Position::new(3, 0)], EntityKind::Entity);

        run(&mut world);

        let pursuit = world.get::<Pursuit>(second).unwrap();
        assert_eq!(pursuit.target.as_ref().map(|t| t.label.as_str()), Some("Entity 2"));
        // Heading re-planned toward the new target: (3,0) -> (0,6) is dx 3, dy 6
        assert_eq!(world.get::<Body>(second).unwrap().head(), Position::new(3, 1));
    }
}
