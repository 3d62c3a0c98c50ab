// src/generator/wiring.rs

use crate::error::GenerationError;
use crate::generator::level::Level;
use crate::template::Feature;
use crate::utils::Point2D;
use crate::world::{PlayerEntity, WorldBuilder};
use log::info;

/// Moves the player to the entrance template's door and reveals the door.
///
/// The door is looked up before anything is touched, so a template without
/// one fails the attempt with the player left where it was.
pub fn wire_entrance<W: WorldBuilder + ?Sized, P: PlayerEntity + ?Sized>(
    world: &mut W,
    player: &mut P,
    level: &Level,
) -> Result<Point2D, GenerationError> {
    let pos = level
        .requirements()
        .find_feature(Feature::Entrance)
        .ok_or(GenerationError::MissingEntrance)?;
    let placed = level.cell(pos).ok_or(GenerationError::MissingEntrance)?;
    let (local, door) = placed
        .inventory
        .door()
        .ok_or_else(|| GenerationError::MissingDoorTile {
            pos,
            template: placed.template.clone(),
        })?;

    let position = (placed.origin + local).to_point();
    player.set_position(position);
    player.set_visible(true);
    world.reveal_tile(door);

    info!(
        "Player placed at ({}, {}) in '{}' at {:?}",
        position.x, position.y, placed.template, pos
    );
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::path::PathGenerator;
    use crate::generator::placer::{place_interior, select_templates};
    use crate::template::{Exit, GridPos, SpawnTable, TemplateBlueprint, TemplateSet};
    use crate::utils::TilePoint;
    use crate::world::{Player, TileWorld};
    use assert_approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build(set: &TemplateSet, world: &mut TileWorld, seed: u64) -> Level {
        let mut rng = StdRng::seed_from_u64(seed);
        let catalog = set.catalog().unwrap();
        let walk = PathGenerator::new(3, 3, 32).generate_from(1, &mut rng).unwrap();
        let selection = select_templates(&catalog, &walk.requirements, &mut rng).unwrap();
        let mut level = Level::new(walk);
        place_interior(world, &mut level, selection).unwrap();
        level
    }

    #[test]
    fn test_player_moves_to_entrance_door() {
        let set = TemplateSet::standard();
        let mut world = TileWorld::new(&set);
        let mut player = Player::default();
        let level = build(&set, &mut world, 8);

        let position = wire_entrance(&mut world, &mut player, &level).unwrap();

        // Entrance at (0, 1): origin (16, 0), door at local (7, 1).
        assert_approx_eq!(position.x, 23.0);
        assert_approx_eq!(position.y, 1.0);
        assert_eq!(player.position, position);
        assert!(player.visible);
        assert_eq!(player.placements, 1);

        let door = world.tile_at(TilePoint::new(23, 1)).unwrap();
        assert!(door.visible);
    }

    #[test]
    fn test_missing_door_leaves_player_alone() {
        let mut room = TemplateBlueprint::walled_room("doorless", Exit::ALL, false);
        // Row y = 1 without its door.
        room.rows[14] = "X..............X".to_string();
        room.validate().unwrap();

        let set = TemplateSet {
            templates: vec![room],
            border: TemplateBlueprint::solid("rock"),
            spawns: SpawnTable::default(),
        };
        let mut world = TileWorld::new(&set);
        let mut player = Player::default();
        let level = build(&set, &mut world, 3);

        let err = wire_entrance(&mut world, &mut player, &level).unwrap_err();
        assert_eq!(
            err,
            GenerationError::MissingDoorTile {
                pos: GridPos::new(0, 1),
                template: "doorless".into(),
            }
        );
        assert!(err.is_retryable());
        assert_eq!(player, Player::default());
    }
}
