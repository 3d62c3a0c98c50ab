// src/generator/path.rs
//
// The required path through a level: a biased random walk from a random
// cell on the bottom row to the top row. Every move adds a matching exit
// pair to the two cells it joins, so the resulting requirement grid is
// symmetric and connected by construction.

use crate::error::GenerationError;
use crate::template::{Direction, Feature, GridPos, RequirementGrid, RequirementSet};
use log::{debug, trace};
use rand::Rng;

// Weights of the candidate directions.
const TOP_WEIGHT: usize = 1;
const SIDE_WEIGHT: usize = 2;

/// Result of one path walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathWalk {
    pub requirements: RequirementGrid,
    pub entrance: GridPos,
    pub exit: GridPos,
    /// Every move made, in order.
    pub directions: Vec<Direction>,
}

#[derive(Debug, Clone)]
pub struct PathGenerator {
    rows: usize,
    columns: usize,
    max_steps: usize,
}

impl PathGenerator {
    pub fn new(rows: usize, columns: usize, max_steps: usize) -> Self {
        assert!(rows > 0 && columns > 0, "path grid must be at least 1x1");
        PathGenerator {
            rows,
            columns,
            max_steps,
        }
    }

    /// Walks from a uniformly random column on row 0.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PathWalk, GenerationError> {
        let column = rng.random_range(0..self.columns);
        self.generate_from(column, rng)
    }

    /// Walks from `start_column` on row 0.
    pub fn generate_from<R: Rng + ?Sized>(
        &self,
        start_column: usize,
        rng: &mut R,
    ) -> Result<PathWalk, GenerationError> {
        assert!(
            start_column < self.columns,
            "start column {} outside a grid of {} columns",
            start_column,
            self.columns
        );

        let mut grid = RequirementGrid::new(self.rows, self.columns);
        let entrance = GridPos::new(0, start_column);
        let mut current = entrance;
        let mut last_direction = None;
        let mut directions = Vec::new();

        cell_mut(&mut grid, current).features.insert(Feature::Entrance);

        loop {
            let direction = self.choose_direction(current.row, current.column, last_direction, rng);

            // Moving up from the last row ends the walk.
            if direction == Direction::Top && current.row == self.rows - 1 {
                cell_mut(&mut grid, current).features.insert(Feature::Exit);
                debug!(
                    "Path walk finished at {:?} after {} moves",
                    current,
                    directions.len()
                );
                return Ok(PathWalk {
                    requirements: grid,
                    entrance,
                    exit: current,
                    directions,
                });
            }

            if directions.len() >= self.max_steps {
                return Err(GenerationError::StepBudgetExhausted {
                    budget: self.max_steps,
                });
            }

            let next = match grid.neighbour(current, direction) {
                Some(next) => next,
                None => unreachable!("{:?} from {:?} leaves the grid", direction, current),
            };
            let exits = direction.exits();
            let exit = exits[rng.random_range(0..exits.len())];

            cell_mut(&mut grid, current).exits.insert(exit);
            cell_mut(&mut grid, next).exits.insert(exit.opposite());
            trace!("{:?} -> {:?} through {:?}", current, next, exit);

            directions.push(direction);
            last_direction = Some(direction);
            current = next;
        }
    }

    /// Draws the next move. Top is always a candidate; Left and Right are
    /// candidates (at twice the weight) while they stay inside the grid and
    /// do not reverse the previous move.
    pub fn choose_direction<R: Rng + ?Sized>(
        &self,
        _row: usize,
        column: usize,
        last_direction: Option<Direction>,
        rng: &mut R,
    ) -> Direction {
        let mut candidates = Vec::with_capacity(TOP_WEIGHT + 2 * SIDE_WEIGHT);

        if column > 0 && last_direction != Some(Direction::Right) {
            candidates.extend([Direction::Left; SIDE_WEIGHT]);
        }
        if column < self.columns - 1 && last_direction != Some(Direction::Left) {
            candidates.extend([Direction::Right; SIDE_WEIGHT]);
        }
        candidates.extend([Direction::Top; TOP_WEIGHT]);

        candidates[rng.random_range(0..candidates.len())]
    }
}

fn cell_mut(grid: &mut RequirementGrid, pos: GridPos) -> &mut RequirementSet {
    match grid.get_mut(pos) {
        Some(cell) => cell,
        None => unreachable!("walk left the grid at {:?}", pos),
    }
}
