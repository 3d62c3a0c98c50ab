// src/generator/level.rs

use crate::generator::path::PathWalk;
use crate::template::{Direction, GridPos, RequirementGrid, TemplateId};
use crate::utils::TilePoint;
use crate::world::{InstanceHandle, TileInventory, WorldBuilder};
use log::debug;

/// A template instantiated into one interior grid cell.
#[derive(Debug, Clone)]
pub struct PlacedTemplate {
    pub pos: GridPos,
    pub template: TemplateId,
    /// World tile of the template's bottom-left corner.
    pub origin: TilePoint,
    pub handle: InstanceHandle,
    pub inventory: TileInventory,
}

/// A generated level: the requirement grid it was built from and every
/// instance it owns in the world.
#[derive(Debug)]
pub struct Level {
    requirements: RequirementGrid,
    entrance: GridPos,
    exit: GridPos,
    path: Vec<Direction>,
    pub(crate) border: Vec<InstanceHandle>,
    pub(crate) cells: Vec<PlacedTemplate>,
    pub(crate) spawned: Vec<InstanceHandle>,
}

impl Level {
    pub(crate) fn new(walk: PathWalk) -> Self {
        Level {
            requirements: walk.requirements,
            entrance: walk.entrance,
            exit: walk.exit,
            path: walk.directions,
            border: Vec::new(),
            cells: Vec::new(),
            spawned: Vec::new(),
        }
    }

    pub fn requirements(&self) -> &RequirementGrid {
        &self.requirements
    }

    pub fn rows(&self) -> usize {
        self.requirements.rows()
    }

    pub fn columns(&self) -> usize {
        self.requirements.columns()
    }

    pub fn entrance_cell(&self) -> GridPos {
        self.entrance
    }

    /// The cell carrying the level exit. Nothing is built there yet; the
    /// position is kept for whatever ends the level.
    pub fn exit_cell(&self) -> GridPos {
        self.exit
    }

    /// The moves of the path walk, entrance to exit.
    pub fn path(&self) -> &[Direction] {
        &self.path
    }

    pub fn cell(&self, pos: GridPos) -> Option<&PlacedTemplate> {
        if pos.row >= self.rows() || pos.column >= self.columns() {
            return None;
        }
        self.cells.get(pos.row * self.columns() + pos.column)
    }

    /// Interior templates in row-major order.
    pub fn cells(&self) -> &[PlacedTemplate] {
        &self.cells
    }

    pub fn border(&self) -> &[InstanceHandle] {
        &self.border
    }

    pub fn spawned(&self) -> &[InstanceHandle] {
        &self.spawned
    }

    pub fn instance_count(&self) -> usize {
        self.border.len() + self.cells.len() + self.spawned.len()
    }

    /// Requirements alongside the placed templates, for the passes that
    /// mutate tile inventories.
    pub(crate) fn parts_mut(&mut self) -> (&RequirementGrid, &mut [PlacedTemplate]) {
        (&self.requirements, &mut self.cells)
    }

    /// Destroys every instance the level owns: spawned entities first,
    /// then the interior, then the border.
    pub fn teardown<W: WorldBuilder + ?Sized>(self, world: &mut W) {
        debug!("Tearing down level ({} instances)", self.instance_count());
        for handle in self.spawned {
            world.destroy(handle);
        }
        for placed in self.cells {
            world.destroy(placed.handle);
        }
        for handle in self.border {
            world.destroy(handle);
        }
    }
}
