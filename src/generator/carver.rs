// src/generator/carver.rs
//
// Opens the walls of placed templates for every exit their cell requires.

use crate::generator::level::{Level, PlacedTemplate};
use crate::template::{CarveSteps, Exit, RequirementSet, TEMPLATE_TILE_HEIGHT, TEMPLATE_TILE_WIDTH};
use crate::utils::TilePoint;
use crate::world::{TileInventory, WorldBuilder};
use log::trace;

/// Removes the exit tiles obstructing `exit`, returning how many were
/// removed. Carving an exit that is already open removes nothing.
pub fn carve_doorway<W: WorldBuilder + ?Sized>(
    world: &mut W,
    inventory: &mut TileInventory,
    exit: Exit,
) -> usize {
    let start = exit.local_coordinate();
    match exit.carve_steps() {
        CarveSteps::Single(step) => carve_run(world, inventory, start, step),
        CarveSteps::Both(toward, away) => {
            // The centre is taken once; each side then runs on its own.
            let mut removed = 0;
            if let Some(tile) = inventory.take_exit_tile(start) {
                world.remove_tile(tile);
                removed += 1;
            }
            removed
                + carve_run(world, inventory, start + toward, toward)
                + carve_run(world, inventory, start + away, away)
        }
    }
}

/// Carves every required exit of one placed template.
pub fn carve_cell<W: WorldBuilder + ?Sized>(
    world: &mut W,
    requirements: &RequirementSet,
    placed: &mut PlacedTemplate,
) -> usize {
    let mut removed = 0;
    for exit in &requirements.exits {
        let count = carve_doorway(world, &mut placed.inventory, *exit);
        trace!(
            "Carved {} tiles for {} on '{}' at {:?}",
            count,
            exit,
            placed.template,
            placed.pos
        );
        removed += count;
    }
    removed
}

/// Carves every required exit across the level.
pub fn carve_level<W: WorldBuilder + ?Sized>(world: &mut W, level: &mut Level) -> usize {
    let (requirements, cells) = level.parts_mut();
    let mut removed = 0;
    for placed in cells.iter_mut() {
        if let Some(set) = requirements.get(placed.pos) {
            removed += carve_cell(world, set, placed);
        }
    }
    removed
}

// Removes consecutive exit tiles from `from`, stepping by `step`.
fn carve_run<W: WorldBuilder + ?Sized>(
    world: &mut W,
    inventory: &mut TileInventory,
    from: TilePoint,
    step: TilePoint,
) -> usize {
    let mut pos = from;
    let mut removed = 0;
    while in_template(pos) {
        let Some(tile) = inventory.take_exit_tile(pos) else {
            break;
        };
        world.remove_tile(tile);
        removed += 1;
        pos = pos + step;
    }
    removed
}

fn in_template(pos: TilePoint) -> bool {
    (0..TEMPLATE_TILE_WIDTH).contains(&pos.x) && (0..TEMPLATE_TILE_HEIGHT).contains(&pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::blueprint::TileKind;
    use crate::template::{SpawnTable, TemplateBlueprint, TemplateSet};
    use crate::world::{PlacedInstance, TileWorld};

    fn world_with(room: TemplateBlueprint) -> (TileWorld, PlacedInstance) {
        let set = TemplateSet {
            templates: vec![room.clone()],
            border: TemplateBlueprint::solid("rock"),
            spawns: SpawnTable::default(),
        };
        let mut world = TileWorld::new(&set);
        let placed = world.instantiate(&room.id, TilePoint::new(0, 0)).unwrap();
        (world, placed)
    }

    fn exit_walls(world: &TileWorld) -> Vec<TilePoint> {
        world
            .tiles
            .read()
            .values()
            .filter(|t| t.kind == TileKind::ExitWall)
            .map(|t| t.position)
            .collect()
    }

    #[test]
    fn test_corner_exit_walks_one_way() {
        let room = TemplateBlueprint::walled_room("room", [Exit::BottomLeft, Exit::BottomMiddle], false);
        let (mut world, mut placed) = world_with(room);

        assert_eq!(carve_doorway(&mut world, &mut placed.inventory, Exit::BottomLeft), 3);
        for x in 1..=3 {
            assert!(world.tile_at(TilePoint::new(x, 0)).is_none());
        }
        // The neighbouring middle doorway is untouched.
        assert_eq!(exit_walls(&world).len(), 3);
        assert_eq!(world.tile_at(TilePoint::new(4, 0)).unwrap().kind, TileKind::Wall);
    }

    #[test]
    fn test_middle_exit_walks_both_ways() {
        let room = TemplateBlueprint::walled_room("room", [Exit::LeftMiddle], false);
        let (mut world, mut placed) = world_with(room);

        assert_eq!(carve_doorway(&mut world, &mut placed.inventory, Exit::LeftMiddle), 3);
        for y in 6..=8 {
            assert!(world.tile_at(TilePoint::new(0, y)).is_none());
        }
        assert_eq!(world.tile_at(TilePoint::new(0, 5)).unwrap().kind, TileKind::Wall);
        assert_eq!(world.tile_at(TilePoint::new(0, 9)).unwrap().kind, TileKind::Wall);
    }

    #[test]
    fn test_middle_exit_without_centre_stays_symmetric() {
        let room = TemplateBlueprint::walled_room("room", [Exit::BottomMiddle], false);
        let (mut world, mut placed) = world_with(room);
        let centre = placed.inventory.take_exit_tile(TilePoint::new(7, 0)).unwrap();
        world.remove_tile(centre);

        assert_eq!(carve_doorway(&mut world, &mut placed.inventory, Exit::BottomMiddle), 2);
        assert!(world.tile_at(TilePoint::new(6, 0)).is_none());
        assert!(world.tile_at(TilePoint::new(8, 0)).is_none());
        assert_eq!(world.tile_at(TilePoint::new(5, 0)).unwrap().kind, TileKind::Wall);
        assert_eq!(world.tile_at(TilePoint::new(9, 0)).unwrap().kind, TileKind::Wall);
        assert!(exit_walls(&world).is_empty());
    }

    #[test]
    fn test_carving_is_idempotent() {
        let room = TemplateBlueprint::walled_room("room", Exit::ALL, false);
        let (mut world, mut placed) = world_with(room);

        for exit in Exit::ALL {
            let first = carve_doorway(&mut world, &mut placed.inventory, exit);
            let after_first = world.get_level_checksum();
            let second = carve_doorway(&mut world, &mut placed.inventory, exit);

            assert_eq!(first, 3, "{}", exit);
            assert_eq!(second, 0, "{}", exit);
            assert_eq!(world.get_level_checksum(), after_first);
        }
        assert!(exit_walls(&world).is_empty());
    }

    #[test]
    fn test_unsupported_exit_removes_nothing() {
        let room = TemplateBlueprint::walled_room("room", [Exit::TopMiddle], false);
        let (mut world, mut placed) = world_with(room);
        let tiles = world.num_tiles();
        assert_eq!(carve_doorway(&mut world, &mut placed.inventory, Exit::RightTop), 0);
        assert_eq!(world.num_tiles(), tiles);
    }

    #[test]
    fn test_long_authored_doorway() {
        // A hand-authored room whose top-left doorway runs five tiles.
        let mut room = TemplateBlueprint::solid("wide");
        room.rows[0] = "#XXXXX##########".to_string();
        room.supported_exits.insert(Exit::TopLeft);
        room.validate().unwrap();

        let (mut world, mut placed) = world_with(room);
        assert_eq!(carve_doorway(&mut world, &mut placed.inventory, Exit::TopLeft), 5);
        assert!(world.tile_at(TilePoint::new(5, 15)).is_none());
        assert_eq!(world.tile_at(TilePoint::new(6, 15)).unwrap().kind, TileKind::Wall);
    }
}
