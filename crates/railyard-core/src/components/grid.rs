//! Grid World
//!
//! The square cell store owned by the session. Cells live in a flat arena
//! indexed by `y * size + x`; trains only ever hold coordinates into it.

use bevy_ecs::prelude::*;
use railyard_events::{EntityKey, EntityKind, EntitySnapshot, GridSnapshot, Position, TargetLock};

use crate::error::{RailyardError, MAX_GRID_SIZE};

/// Default grid side length
pub const DEFAULT_GRID_SIZE: u32 = 9;

/// Something standing on a grid cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridEntity {
    pub key: EntityKey,
    pub kind: EntityKind,
    pub label: String,
    pub position: Position,
}

impl GridEntity {
    /// Weak reference a train keeps while pursuing this entity.
    pub fn lock(&self) -> TargetLock {
        TargetLock {
            key: self.key,
            label: self.label.clone(),
            position: self.position,
        }
    }

    pub fn to_snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            key: self.key,
            kind: self.kind,
            label: self.label.clone(),
            x: self.position.x,
            y: self.position.y,
        }
    }
}

/// Resource: the grid arena
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    cells: Vec<Option<GridEntity>>,
    next_key: u32,
}

impl Grid {
    /// Creates an empty grid with `size` cells per side.
    pub fn new(size: u32) -> Result<Self, RailyardError> {
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(RailyardError::InvalidGridSize(size));
        }
        Ok(Self {
            size,
            cells: vec![None; (size * size) as usize],
            next_key: 1,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    fn index(&self, position: Position) -> Option<usize> {
        position
            .in_bounds(self.size)
            .then(|| (position.y * self.size + position.x) as usize)
    }

    /// Returns the entity on a cell, if any.
    pub fn get(&self, position: Position) -> Option<&GridEntity> {
        self.index(position).and_then(|i| self.cells[i].as_ref())
    }

    pub fn is_free(&self, position: Position) -> bool {
        self.index(position).is_some_and(|i| self.cells[i].is_none())
    }

    /// Places a new entity on an empty cell and returns its key.
    pub fn place(
        &mut self,
        kind: EntityKind,
        label: impl Into<String>,
        position: Position,
    ) -> Result<EntityKey, RailyardError> {
        let key = EntityKey(self.next_key);
        self.insert(GridEntity {
            key,
            kind,
            label: label.into(),
            position,
        })?;
        Ok(key)
    }

    /// Puts back an entity with a known key, e.g. from a snapshot.
    pub fn restore(&mut self, entity: GridEntity) -> Result<(), RailyardError> {
        self.insert(entity)
    }

    fn insert(&mut self, entity: GridEntity) -> Result<(), RailyardError> {
        let index = self
            .index(entity.position)
            .ok_or(RailyardError::CellOutOfBounds(entity.position))?;
        if self.cells[index].is_some() {
            return Err(RailyardError::CellOccupied(entity.position));
        }
        // Keys are never reused, even for restored entities
        self.next_key = self.next_key.max(entity.key.0 + 1);
        self.cells[index] = Some(entity);
        Ok(())
    }

    /// Empties a cell, returning what stood there.
    pub fn take(&mut self, position: Position) -> Option<GridEntity> {
        let index = self.index(position)?;
        self.cells[index].take()
    }

    /// True if the entity behind a target lock is still on its cell.
    pub fn holds(&self, lock: &TargetLock) -> bool {
        self.get(lock.position).is_some_and(|e| e.key == lock.key)
    }

    /// Iterates entities in row-major scan order (lowest y, then lowest x).
    pub fn entities(&self) -> impl Iterator<Item = &GridEntity> {
        self.cells.iter().flatten()
    }

    /// Number of entities still on the grid.
    pub fn remaining(&self) -> usize {
        self.entities().count()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn to_snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            size: self.size,
            entities: self.entities().map(GridEntity::to_snapshot).collect(),
        }
    }

    /// Rebuilds a grid from a snapshot.
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Result<Self, RailyardError> {
        let mut grid = Grid::new(snapshot.size)?;
        for entity in &snapshot.entities {
            grid.restore(GridEntity {
                key: entity.key,
                kind: entity.kind,
                label: entity.label.clone(),
                position: entity.position(),
            })?;
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_sizes() {
        assert_eq!(Grid::new(0), Err(RailyardError::InvalidGridSize(0)));
        assert!(Grid::new(MAX_GRID_SIZE + 1).is_err());
        assert!(Grid::new(DEFAULT_GRID_SIZE).is_ok());
    }

    #[test]
    fn test_place_and_take() {
        let mut grid = Grid::new(9).unwrap();
        let key = grid.place(EntityKind::Goal, "Goal 1", Position::new(8, 0)).unwrap();
        assert_eq!(grid.remaining(), 1);
        assert_eq!(grid.get(Position::new(8, 0)).map(|e| e.key), Some(key));

        assert_eq!(
            grid.place(EntityKind::Entity, "dup", Position::new(8, 0)),
            Err(RailyardError::CellOccupied(Position::new(8, 0)))
        );
        assert_eq!(
            grid.place(EntityKind::Entity, "off", Position::new(9, 0)),
            Err(RailyardError::CellOutOfBounds(Position::new(9, 0)))
        );

        let taken = grid.take(Position::new(8, 0)).unwrap();
        assert_eq!(taken.label, "Goal 1");
        assert!(grid.is_empty());
        assert!(grid.take(Position::new(8, 0)).is_none());
    }

    #[test]
    fn test_keys_are_not_reused() {
        let mut grid = Grid::new(3).unwrap();
        let first = grid.place(EntityKind::Entity, "a", Position::new(0, 0)).unwrap();
        grid.take(Position::new(0, 0));
        let second = grid.place(EntityKind::Entity, "b", Position::new(0, 0)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_lock_goes_stale_after_take() {
        let mut grid = Grid::new(9).unwrap();
        grid.place(EntityKind::Entity, "Entity 1", Position::new(2, 2)).unwrap();
        let lock = grid.get(Position::new(2, 2)).unwrap().lock();
        assert!(grid.holds(&lock));

        grid.take(Position::new(2, 2));
        assert!(!grid.holds(&lock));

        // A different entity on the same cell does not revive the lock
        grid.place(EntityKind::Entity, "Entity 2", Position::new(2, 2)).unwrap();
        assert!(!grid.holds(&lock));
    }

    #[test]
    fn test_scan_order_is_row_major() {
        let mut grid = Grid::new(9).unwrap();
        grid.place(EntityKind::Entity, "late", Position::new(0, 3)).unwrap();
        grid.place(EntityKind::Entity, "early", Position::new(7, 1)).unwrap();
        grid.place(EntityKind::Entity, "first", Position::new(2, 1)).unwrap();

        let labels: Vec<_> = grid.entities().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "early", "late"]);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut grid = Grid::new(9).unwrap();
        grid.place(EntityKind::Obstacle, "Obstacle 1", Position::new(4, 4)).unwrap();
        grid.place(EntityKind::Goal, "Goal 2", Position::new(1, 7)).unwrap();

        let rebuilt = Grid::from_snapshot(&grid.to_snapshot()).unwrap();
        assert_eq!(rebuilt, grid);
    }
}
