#![warn(non_snake_case)]
//! # Roomgrid Main Entry Point
//!
//! Generates one level from the built-in template set (or a set named in
//! the configuration), prints it as ASCII and reports its checksum.
//!
//! Usage: `roomgrid [config.json]`

use log::info;
use roomgrid::config::GeneratorConfig;
use roomgrid::generator::{LevelGenerator, LevelHost};
use roomgrid::template::TemplateSet;
use roomgrid::world::{Player, TileWorld};
use std::env;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::init();
    info!("roomgrid starting...");

    let config = match env::args().nth(1) {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig::default(),
    };
    let set = match &config.template_file {
        Some(path) => TemplateSet::from_json_file(path)?,
        None => TemplateSet::standard(),
    };

    let mut host = LevelHost::new(LevelGenerator::new(config, &set)?);
    let mut world = TileWorld::new(&set);
    let mut player = Player::default();
    let (seed, mut rng) = host.generator().seeded_rng();
    info!("Using seed {}", seed);

    host.regenerate(&mut world, &mut player, &mut rng)?;

    print!("{}", world.render_ascii());
    println!("seed: {}", seed);
    if let Some(level) = host.level().read().as_ref() {
        println!(
            "entrance: {:?}  exit: {:?}  player: ({}, {})",
            level.entrance_cell(),
            level.exit_cell(),
            player.position.x,
            player.position.y
        );
    }
    if let Some(stats) = host.generator().stats() {
        println!(
            "attempts: {}  path: {}  carved: {}  broken: {}  spawned: {}  time: {:.2}ms",
            stats.attempts,
            stats.path_length,
            stats.tiles_carved,
            stats.tiles_broken,
            stats.entities_spawned,
            stats.generation_time
        );
    }
    println!("checksum: {:08x}", world.get_level_checksum());

    info!("roomgrid exiting.");
    Ok(())
}
