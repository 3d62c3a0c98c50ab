// src/template/requirement.rs

use crate::template::{Direction, Exit, Feature};
use std::collections::{BTreeSet, VecDeque};

/// The exits and features a chosen template must satisfy for one grid cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSet {
    pub exits: BTreeSet<Exit>,
    pub features: BTreeSet<Feature>,
}

impl RequirementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.exits.is_empty() && self.features.is_empty()
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

/// A `(row, column)` position in the template grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub row: usize,
    pub column: usize,
}

impl GridPos {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Row-major H×W matrix of requirement sets produced by the path walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementGrid {
    rows: usize,
    columns: usize,
    cells: Vec<RequirementSet>,
}

impl RequirementGrid {
    /// Creates a grid where every cell has an empty requirement set.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![RequirementSet::new(); rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, pos: GridPos) -> Option<&RequirementSet> {
        if pos.row < self.rows && pos.column < self.columns {
            self.cells.get(pos.row * self.columns + pos.column)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut RequirementSet> {
        if pos.row < self.rows && pos.column < self.columns {
            self.cells.get_mut(pos.row * self.columns + pos.column)
        } else {
            None
        }
    }

    /// The neighbour of `pos` one step in `direction`, if it is inside the grid.
    pub fn neighbour(&self, pos: GridPos, direction: Direction) -> Option<GridPos> {
        let (dr, dc) = direction.grid_delta();
        let row = pos.row.checked_add_signed(dr)?;
        let column = pos.column.checked_add_signed(dc)?;
        if row < self.rows && column < self.columns {
            Some(GridPos::new(row, column))
        } else {
            None
        }
    }

    /// Iterates cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &RequirementSet)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, set)| (GridPos::new(i / columns, i % columns), set))
    }

    /// The first cell carrying `feature`, if any.
    pub fn find_feature(&self, feature: Feature) -> Option<GridPos> {
        self.iter()
            .find(|(_, set)| set.has_feature(feature))
            .map(|(pos, _)| pos)
    }

    /// Checks that every required exit is matched by its opposite on the
    /// neighbouring cell, and that no exit points off the grid.
    pub fn is_symmetric(&self) -> bool {
        self.iter().all(|(pos, set)| {
            set.exits.iter().all(|exit| {
                match self
                    .neighbour(pos, exit.side())
                    .and_then(|n| self.get(n))
                {
                    Some(other) => other.exits.contains(&exit.opposite()),
                    None => false,
                }
            })
        })
    }

    /// Breadth-first search over cells joined by matching exit pairs.
    /// Returns true when `to` is reachable from `from`.
    pub fn is_connected(&self, from: GridPos, to: GridPos) -> bool {
        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        if self.get(from).is_none() {
            return false;
        }
        visited[from.row * self.columns + from.column] = true;
        queue.push_back(from);

        while let Some(pos) = queue.pop_front() {
            if pos == to {
                return true;
            }
            let Some(set) = self.get(pos) else { continue };
            for exit in &set.exits {
                let Some(next) = self.neighbour(pos, exit.side()) else { continue };
                let Some(next_set) = self.get(next) else { continue };
                let index = next.row * self.columns + next.column;
                if !visited[index] && next_set.exits.contains(&exit.opposite()) {
                    visited[index] = true;
                    queue.push_back(next);
                }
            }
        }
        false
    }
}
