// src/generator/decorate.rs
//
// Randomized touches applied after carving: breakable tiles crumble and
// spawn markers turn into entities. Exit walls and doors are left alone.

use crate::error::WorldError;
use crate::generator::level::Level;
use crate::template::SpawnTable;
use crate::world::WorldBuilder;
use log::debug;
use rand::Rng;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecorationReport {
    pub tiles_broken: usize,
    pub entities_spawned: usize,
}

pub fn decorate_level<W: WorldBuilder + ?Sized, R: Rng + ?Sized>(
    world: &mut W,
    level: &mut Level,
    spawns: &SpawnTable,
    rng: &mut R,
) -> Result<DecorationReport, WorldError> {
    let mut report = DecorationReport::default();

    for placed in level.cells.iter_mut() {
        let chance = placed.inventory.breakable_chance();
        let mut broken = Vec::new();
        for (_, tile) in placed.inventory.breakables() {
            if rng.random_bool(chance) {
                world.remove_tile(*tile);
                broken.push(*tile);
            }
        }
        placed.inventory.forget_breakables(&broken);
        report.tiles_broken += broken.len();

        // Markers are always removed, whether or not something spawns.
        for (local, marker) in placed.inventory.take_spawn_points() {
            if !spawns.kinds.is_empty() && rng.random_bool(spawns.chance) {
                let kind = &spawns.kinds[rng.random_range(0..spawns.kinds.len())];
                let at = placed.origin + local;
                let handle = world.spawn_entity(kind, at)?;
                level.spawned.push(handle);
                report.entities_spawned += 1;
                debug!("Spawned '{}' at {:?}", kind, at);
            }
            world.remove_tile(marker);
        }
    }

    Ok(report)
}
