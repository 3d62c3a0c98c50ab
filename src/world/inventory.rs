// src/world/inventory.rs

use crate::template::blueprint::TileKind;
use crate::utils::TilePoint;
use crate::world::TileHandle;
use std::collections::HashMap;
use std::mem;

/// The tagged tiles of one template instance, keyed by role.
/// Positions are template-local.
#[derive(Debug, Clone, Default)]
pub struct TileInventory {
    exit_tiles: HashMap<TilePoint, TileHandle>,
    door: Option<(TilePoint, TileHandle)>,
    breakables: Vec<(TilePoint, TileHandle)>,
    breakable_chance: f64,
    spawn_points: Vec<(TilePoint, TileHandle)>,
}

impl TileInventory {
    pub fn new(breakable_chance: f64) -> Self {
        Self {
            breakable_chance,
            ..Self::default()
        }
    }

    /// Records a tile under its role. Plain walls carry no role.
    pub fn insert(&mut self, kind: TileKind, pos: TilePoint, tile: TileHandle) {
        match kind {
            TileKind::Wall => {}
            TileKind::ExitWall => {
                self.exit_tiles.insert(pos, tile);
            }
            TileKind::Door => self.door = Some((pos, tile)),
            TileKind::Breakable => self.breakables.push((pos, tile)),
            TileKind::SpawnPoint => self.spawn_points.push((pos, tile)),
        }
    }

    pub fn exit_tile(&self, pos: TilePoint) -> Option<TileHandle> {
        self.exit_tiles.get(&pos).copied()
    }

    /// Removes the exit tile at `pos` from the inventory, returning it.
    pub fn take_exit_tile(&mut self, pos: TilePoint) -> Option<TileHandle> {
        self.exit_tiles.remove(&pos)
    }

    pub fn exit_tile_count(&self) -> usize {
        self.exit_tiles.len()
    }

    pub fn door(&self) -> Option<(TilePoint, TileHandle)> {
        self.door
    }

    pub fn breakable_chance(&self) -> f64 {
        self.breakable_chance
    }

    pub fn breakables(&self) -> &[(TilePoint, TileHandle)] {
        &self.breakables
    }

    pub fn spawn_points(&self) -> &[(TilePoint, TileHandle)] {
        &self.spawn_points
    }

    pub fn take_spawn_points(&mut self) -> Vec<(TilePoint, TileHandle)> {
        mem::take(&mut self.spawn_points)
    }

    /// Drops the given breakables from the inventory after removal.
    pub fn forget_breakables(&mut self, removed: &[TileHandle]) {
        self.breakables.retain(|(_, tile)| !removed.contains(tile));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_by_role() {
        let mut inventory = TileInventory::new(0.25);
        inventory.insert(TileKind::Wall, TilePoint::new(0, 0), TileHandle(1));
        inventory.insert(TileKind::ExitWall, TilePoint::new(7, 0), TileHandle(2));
        inventory.insert(TileKind::Door, TilePoint::new(7, 1), TileHandle(3));
        inventory.insert(TileKind::Breakable, TilePoint::new(3, 5), TileHandle(4));
        inventory.insert(TileKind::SpawnPoint, TilePoint::new(8, 9), TileHandle(5));

        assert_eq!(inventory.exit_tile_count(), 1);
        assert_eq!(inventory.exit_tile(TilePoint::new(7, 0)), Some(TileHandle(2)));
        assert_eq!(inventory.door(), Some((TilePoint::new(7, 1), TileHandle(3))));
        assert_eq!(inventory.breakables().len(), 1);
        assert_eq!(inventory.spawn_points().len(), 1);
        assert_eq!(inventory.breakable_chance(), 0.25);
    }

    #[test]
    fn test_take_exit_tile_once() {
        let mut inventory = TileInventory::new(0.0);
        inventory.insert(TileKind::ExitWall, TilePoint::new(1, 0), TileHandle(9));
        assert_eq!(inventory.take_exit_tile(TilePoint::new(1, 0)), Some(TileHandle(9)));
        assert_eq!(inventory.take_exit_tile(TilePoint::new(1, 0)), None);
        assert_eq!(inventory.exit_tile_count(), 0);
    }

    #[test]
    fn test_forget_breakables() {
        let mut inventory = TileInventory::new(1.0);
        inventory.insert(TileKind::Breakable, TilePoint::new(3, 5), TileHandle(1));
        inventory.insert(TileKind::Breakable, TilePoint::new(4, 5), TileHandle(2));
        inventory.forget_breakables(&[TileHandle(1)]);
        assert_eq!(inventory.breakables(), &[(TilePoint::new(4, 5), TileHandle(2))]);
    }
}
