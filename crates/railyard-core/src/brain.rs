//! BDI Brain
//!
//! Pure decision functions for trains. Beliefs come from a grid borrow and
//! the train's own components; the result is an intent that the movement
//! system applies. Nothing here mutates session state.

use railyard_events::{Direction, EntityKind, Position, Situation, TargetLock};

use crate::components::{Body, Grid, Pursuit};

/// Distance at or under which a hunt becomes an approach
pub const APPROACH_DISTANCE: u32 = 2;

/// What a train wants to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveIntent {
    /// Step the head onto `to`
    Advance { direction: Direction, to: Position },
    /// Facing a wall; the heading still updates
    Blocked { direction: Direction },
    /// Nothing to pursue
    Idle,
    /// Paused by negotiation or collision
    Halted,
}

/// Belief: how far along the hunt is.
pub fn assess_situation(head: Position, target: Option<&TargetLock>) -> Situation {
    let Some(target) = target else {
        return Situation::Idle;
    };
    match head.manhattan(target.position) {
        0 => Situation::Consuming,
        d if d <= APPROACH_DISTANCE => Situation::Approaching,
        _ => Situation::Hunting,
    }
}

/// Desire: the nearest entity of `kind` by Manhattan distance.
///
/// Ties go to the first entity in row-major scan order. Cells under the
/// train's own body are not excluded.
pub fn select_target(grid: &Grid, head: Position, kind: EntityKind) -> Option<TargetLock> {
    let mut best: Option<(u32, TargetLock)> = None;
    for entity in grid.entities().filter(|e| e.kind == kind) {
        let distance = head.manhattan(entity.position);
        if best.as_ref().map_or(true, |(d, _)| distance < *d) {
            best = Some((distance, entity.lock()));
        }
    }
    best.map(|(_, lock)| lock)
}

/// Intention: greedy heading toward the target, horizontal on ties.
pub fn calculate_direction(head: Position, target: Position) -> Direction {
    let dx = head.x.abs_diff(target.x);
    let dy = head.y.abs_diff(target.y);
    if dx >= dy {
        if target.x > head.x {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if target.y > head.y {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Plans one step for a train.
pub fn plan_move(body: &Body, pursuit: &Pursuit, paused: bool, grid_size: u32) -> MoveIntent {
    if paused {
        return MoveIntent::Halted;
    }
    let Some(target) = pursuit.target.as_ref() else {
        return MoveIntent::Idle;
    };

    let head = body.head();
    let direction = calculate_direction(head, target.position);
    let to = head.step(direction, grid_size);
    if to == head {
        MoveIntent::Blocked { direction }
    } else {
        MoveIntent::Advance { direction, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railyard_events::EntityKey;

    fn lock_at(x: u32, y: u32) -> TargetLock {
        TargetLock {
            key: EntityKey(1),
            label: "target".into(),
            position: Position::new(x, y),
        }
    }

    fn pursuing(x: u32, y: u32) -> Pursuit {
        Pursuit {
            target_kind: EntityKind::Goal,
            target: Some(lock_at(x, y)),
        }
    }

    #[test]
    fn test_select_nearest() {
        let mut grid = Grid::new(9).unwrap();
        grid.place(EntityKind::Goal, "far", Position::new(8, 8)).unwrap();
        grid.place(EntityKind::Goal, "near", Position::new(2, 1)).unwrap();
        grid.place(EntityKind::Entity, "wrong kind", Position::new(0, 1)).unwrap();

        let lock = select_target(&grid, Position::new(0, 0), EntityKind::Goal).unwrap();
        assert_eq!(lock.label, "near");
    }

    #[test]
    fn test_select_ties_follow_scan_order() {
        let mut grid = Grid::new(9).unwrap();
        // Both two cells from (4,4); (4,2) has the lower y
        grid.place(EntityKind::Entity, "below", Position::new(4, 6)).unwrap();
        grid.place(EntityKind::Entity, "right", Position::new(6, 4)).unwrap();
        grid.place(EntityKind::Entity, "above", Position::new(4, 2)).unwrap();
        grid.place(EntityKind::Entity, "left", Position::new(2, 4)).unwrap();

        let lock = select_target(&grid, Position::new(4, 4), EntityKind::Entity).unwrap();
        assert_eq!(lock.label, "above");

        // Same row: lowest x wins
        grid.take(Position::new(4, 2));
        let lock = select_target(&grid, Position::new(4, 4), EntityKind::Entity).unwrap();
        assert_eq!(lock.label, "left");
    }

    #[test]
    fn test_select_none_when_no_candidates() {
        let mut grid = Grid::new(9).unwrap();
        grid.place(EntityKind::Obstacle, "rock", Position::new(3, 3)).unwrap();
        assert!(select_target(&grid, Position::new(0, 0), EntityKind::Goal).is_none());
    }

    #[test]
    fn test_direction_prefers_horizontal_on_ties() {
        let head = Position::new(4, 4);
        assert_eq!(calculate_direction(head, Position::new(6, 6)), Direction::Right);
        assert_eq!(calculate_direction(head, Position::new(2, 2)), Direction::Left);
        assert_eq!(calculate_direction(head, Position::new(5, 8)), Direction::Down);
        assert_eq!(calculate_direction(head, Position::new(4, 0)), Direction::Up);
    }

    #[test]
    fn test_plan_move_noops() {
        let body = Body::new(vec![Position::new(0, 0)], Direction::Right);
        let idle = Pursuit::new(EntityKind::Goal);
        assert_eq!(plan_move(&body, &idle, false, 9), MoveIntent::Idle);
        assert_eq!(plan_move(&body, &pursuing(8, 0), true, 9), MoveIntent::Halted);
    }

    #[test]
    fn test_plan_move_advances() {
        let body = Body::new(vec![Position::new(0, 0)], Direction::Up);
        assert_eq!(
            plan_move(&body, &pursuing(8, 0), false, 9),
            MoveIntent::Advance {
                direction: Direction::Right,
                to: Position::new(1, 0)
            }
        );
    }

    #[test]
    fn test_plan_move_blocked_when_target_under_head_at_wall() {
        // dx == dy == 0 resolves to Left, which is a wall at x == 0
        let body = Body::new(vec![Position::new(0, 3)], Direction::Right);
        assert_eq!(
            plan_move(&body, &pursuing(0, 3), false, 9),
            MoveIntent::Blocked {
                direction: Direction::Left
            }
        );
    }

    #[test]
    fn test_assess_situation() {
        let head = Position::new(0, 0);
        assert_eq!(assess_situation(head, None), Situation::Idle);
        assert_eq!(assess_situation(head, Some(&lock_at(0, 0))), Situation::Consuming);
        assert_eq!(assess_situation(head, Some(&lock_at(1, 1))), Situation::Approaching);
        assert_eq!(assess_situation(head, Some(&lock_at(3, 0))), Situation::Hunting);
    }
}
