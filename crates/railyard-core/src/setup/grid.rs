//! Grid Population
//!
//! Scatters entities of random kinds over free cells.

use rand::rngs::SmallRng;
use rand::Rng;
use railyard_events::{EntityKind, Position};

use crate::components::Grid;
use crate::error::RailyardError;

/// Places `count` entities on random free cells. Labels are `"{kind} {n}"`
/// with `n` counting from 1 in placement order.
pub fn populate_grid(grid: &mut Grid, count: usize, rng: &mut SmallRng) -> Result<(), RailyardError> {
    let size = grid.size();
    let mut free: Vec<Position> = (0..size)
        .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
        .filter(|&p| grid.is_free(p))
        .collect();

    if count > free.len() {
        return Err(RailyardError::GridFull {
            requested: count,
            free: free.len(),
        });
    }

    let kinds = EntityKind::all();
    for i in 0..count {
        let position = free.swap_remove(rng.gen_range(0..free.len()));
        let kind = kinds[rng.gen_range(0..kinds.len())];
        grid.place(kind, format!("{} {}", kind, i + 1), position)?;
    }

    tracing::info!("Populated grid with {} entities", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_populate_places_requested_count() {
        let mut grid = Grid::new(9).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        populate_grid(&mut grid, 8, &mut rng).unwrap();
        assert_eq!(grid.remaining(), 8);

        let mut labels: Vec<String> = grid.entities().map(|e| e.label.clone()).collect();
        labels.sort_by_key(|l| l.rsplit(' ').next().and_then(|n| n.parse::<u32>().ok()));
        for (i, label) in labels.iter().enumerate() {
            assert!(label.ends_with(&format!(" {}", i + 1)), "bad label {label}");
        }
    }

    #[test]
    fn test_populate_is_deterministic() {
        let mut a = Grid::new(9).unwrap();
        let mut b = Grid::new(9).unwrap();
        populate_grid(&mut a, 10, &mut SmallRng::seed_from_u64(7)).unwrap();
        populate_grid(&mut b, 10, &mut SmallRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_populate_skips_occupied_cells() {
        let mut grid = Grid::new(2).unwrap();
        grid.place(EntityKind::Goal, "kept", Position::new(0, 0)).unwrap();
        populate_grid(&mut grid, 3, &mut SmallRng::seed_from_u64(1)).unwrap();
        assert_eq!(grid.remaining(), 4);
        assert_eq!(grid.get(Position::new(0, 0)).unwrap().label, "kept");
    }

    #[test]
    fn test_populate_rejects_overflow() {
        let mut grid = Grid::new(2).unwrap();
        let err = populate_grid(&mut grid, 5, &mut SmallRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(err, RailyardError::GridFull { requested: 5, free: 4 });
        assert!(grid.is_empty());
    }
}
