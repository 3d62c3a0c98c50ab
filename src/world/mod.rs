// src/world/mod.rs
//! Boundary with the engine that owns game objects.
//!
//! The generator never creates or destroys anything itself: it asks a
//! [`WorldBuilder`] to instantiate templates and remove tiles, and moves the
//! externally owned [`PlayerEntity`] once the level is complete.

pub mod inventory;
pub mod tile_world;

pub use inventory::TileInventory;
pub use tile_world::TileWorld;

use crate::error::WorldError;
use crate::template::TemplateId;
use crate::utils::{Point2D, TilePoint};

/// Handle to an instantiated template or spawned entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceHandle(pub u64);

/// Handle to a single tile inside an instantiated template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileHandle(pub u64);

/// What the world builder hands back for a freshly instantiated template.
#[derive(Debug, Clone)]
pub struct PlacedInstance {
    pub handle: InstanceHandle,
    pub inventory: TileInventory,
}

/// Materializes and disposes of game objects on behalf of the generator.
pub trait WorldBuilder {
    /// Instantiates `template` with its bottom-left tile at `origin`.
    fn instantiate(
        &mut self,
        template: &TemplateId,
        origin: TilePoint,
    ) -> Result<PlacedInstance, WorldError>;

    /// Destroys an instance (or spawned entity) and everything it owns.
    fn destroy(&mut self, instance: InstanceHandle);

    /// Removes a single tile. Removing an already removed tile is a no-op.
    fn remove_tile(&mut self, tile: TileHandle);

    /// Makes a hidden tile visible and active.
    fn reveal_tile(&mut self, tile: TileHandle);

    /// Spawns an entity of `kind` at a world tile position.
    fn spawn_entity(&mut self, kind: &str, at: TilePoint) -> Result<InstanceHandle, WorldError>;
}

/// The externally owned player object.
pub trait PlayerEntity {
    fn set_position(&mut self, position: Point2D);
    fn set_visible(&mut self, visible: bool);
}

/// A plain player record, enough for headless runs and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Point2D,
    pub visible: bool,
    /// How many times the player has been moved.
    pub placements: usize,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: Point2D::new(0.0, 0.0),
            visible: false,
            placements: 0,
        }
    }
}

impl PlayerEntity for Player {
    fn set_position(&mut self, position: Point2D) {
        self.position = position;
        self.placements += 1;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
