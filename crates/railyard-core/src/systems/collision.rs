//! Collision System
//!
//! Maps every body segment of every train to its cell after movement. Any
//! cell with two or more occupants crashes every train on it, permanently.
//! A head folding back onto its own body counts the same as two trains
//! meeting.

use bevy_ecs::prelude::*;
use railyard_events::{CollisionRecord, Position};
use std::collections::BTreeMap;

use crate::components::{Body, Disposition, Roster, TickLog, Train, TrainName};

/// A train segment standing on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    /// Index into the roster
    pub slot: usize,
    pub is_head: bool,
    /// Tail copy left by growth; it separates on the next move
    pub stub: bool,
}

/// Cell -> segments standing on it, keyed `(y, x)` so iteration is row-major
#[derive(Debug, Default)]
pub struct OccupancyMap {
    cells: BTreeMap<(u32, u32), Vec<Occupant>>,
}

impl OccupancyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_body(&mut self, slot: usize, segments: &[Position]) {
        for (index, position) in segments.iter().enumerate() {
            let stub = index > 0 && segments[index - 1] == *position;
            self.cells
                .entry((position.y, position.x))
                .or_default()
                .push(Occupant {
                    slot,
                    is_head: index == 0,
                    stub,
                });
        }
    }

    pub fn occupants(&self, position: Position) -> &[Occupant] {
        self.cells
            .get(&(position.y, position.x))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cells with at least two occupants, not counting growth stubs, with
    /// the distinct roster slots involved in ascending order.
    pub fn collisions(&self) -> Vec<(Position, Vec<usize>)> {
        let mut found = Vec::new();
        for (&(y, x), occupants) in &self.cells {
            let solid: Vec<usize> = occupants.iter().filter(|o| !o.stub).map(|o| o.slot).collect();
            if solid.len() < 2 {
                continue;
            }
            let mut slots = solid;
            slots.sort_unstable();
            slots.dedup();
            found.push((Position::new(x, y), slots));
        }
        found
    }
}

/// System: detect shared cells and crash every train involved
pub fn detect_collisions(
    roster: Res<Roster>,
    mut log: ResMut<TickLog>,
    mut trains: Query<(&TrainName, &Body, &mut Disposition), With<Train>>,
) {
    let slots: Vec<Entity> = roster.iter().collect();

    let mut occupancy = OccupancyMap::new();
    for (slot, entity) in slots.iter().enumerate() {
        if let Ok((_, body, _)) = trains.get(*entity) {
            occupancy.insert_body(slot, &body.segments);
        }
    }

    for (position, involved) in occupancy.collisions() {
        let head_on = occupancy
            .occupants(position)
            .iter()
            .filter(|o| o.is_head)
            .count();

        let mut names = Vec::with_capacity(involved.len());
        for slot in involved {
            if let Ok((name, _, mut disposition)) = trains.get_mut(slots[slot]) {
                disposition.crash();
                names.push(name.0.clone());
            }
        }

        let record = CollisionRecord {
            x: position.x,
            y: position.y,
            trains: names,
        };
        tracing::info!("{} ({} heads on the cell)", record, head_on);
        log.collisions.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railyard_events::{Direction, Mood};

    fn p(x: u32, y: u32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_growth_stub_is_not_a_collision() {
        let mut map = OccupancyMap::new();
        map.insert_body(0, &[p(8, 0), p(8, 0)]);
        map.insert_body(1, &[p(2, 2), p(1, 2), p(1, 2)]);
        assert!(map.collisions().is_empty());
        assert_eq!(map.occupants(p(8, 0)).len(), 2);
        assert!(map.occupants(p(1, 2))[1].stub);
    }

    #[test]
    fn test_head_folding_onto_own_body_collides() {
        let mut map = OccupancyMap::new();
        map.insert_body(0, &[p(1, 4), p(0, 4), p(1, 4)]);
        assert_eq!(map.collisions(), vec![(p(1, 4), vec![0])]);
    }

    #[test]
    fn test_body_contact_counts() {
        let mut map = OccupancyMap::new();
        map.insert_body(0, &[p(3, 3), p(2, 3)]);
        map.insert_body(1, &[p(2, 4), p(2, 3), p(2, 2)]);
        map.insert_body(2, &[p(7, 7)]);
        let collisions = map.collisions();
        assert_eq!(collisions, vec![(p(2, 3), vec![0, 1])]);
    }

    #[test]
    fn test_collisions_are_row_major() {
        let mut map = OccupancyMap::new();
        map.insert_body(0, &[p(5, 1), p(1, 2)]);
        map.insert_body(1, &[p(1, 2), p(5, 1)]);
        let cells: Vec<Position> = map.collisions().into_iter().map(|(c, _)| c).collect();
        assert_eq!(cells, vec![p(5, 1), p(1, 2)]);
    }

    #[test]
    fn test_detect_crashes_everyone_on_the_cell() {
        let mut world = World::new();
        world.insert_resource(TickLog::new());
        let mut roster = Roster::default();
        let bodies = [
            ("A", vec![p(4, 2), p(3, 2)]),
            ("B", vec![p(4, 2), p(4, 3)]),
            ("C", vec![p(0, 0)]),
        ];
        for (name, segments) in bodies {
            let entity = world
                .spawn((
                    Train,
                    TrainName(name.to_string()),
                    Body::new(segments, Direction::Up),
                    Disposition::default(),
                ))
                .id();
            roster.push(entity);
        }
        let trains = roster.trains.clone();
        world.insert_resource(roster);

        let mut schedule = Schedule::default();
        schedule.add_systems(detect_collisions);
        schedule.run(&mut world);

        let log = world.resource::<TickLog>();
        assert_eq!(log.collisions.len(), 1);
        assert_eq!(log.collisions[0].trains, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(log.collisions[0].position(), p(4, 2));

        assert_eq!(world.get::<Disposition>(trains[0]).unwrap().mood, Mood::Crashed);
        assert!(world.get::<Disposition>(trains[1]).unwrap().paused);
        assert!(!world.get::<Disposition>(trains[2]).unwrap().paused);
    }
}
