// src/generator/mod.rs
//! Level generation: path walk, template selection and placement, doorway
//! carving, decoration and player wiring, with whole-level retries.

pub mod carver;
pub mod decorate;
pub mod host;
pub mod level;
pub mod path;
pub mod placer;
pub mod wiring;

pub use decorate::DecorationReport;
pub use host::LevelHost;
pub use level::{Level, PlacedTemplate};
pub use path::{PathGenerator, PathWalk};

use crate::config::GeneratorConfig;
use crate::error::{ConfigError, GenerationError};
use crate::template::{GridPos, SpawnTable, TemplateCatalog, TemplateId, TemplateSet};
use crate::world::{PlayerEntity, WorldBuilder};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

#[derive(Default, Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Milliseconds spent on the successful attempt.
    pub generation_time: f64,
    pub attempts: usize,
    pub path_length: usize,
    pub templates_placed: usize,
    pub tiles_carved: usize,
    pub tiles_broken: usize,
    pub entities_spawned: usize,
}

pub struct LevelGenerator {
    config: GeneratorConfig,
    catalog: TemplateCatalog,
    border: TemplateId,
    spawns: SpawnTable,
    stats: Option<GenerationStats>,
}

impl LevelGenerator {
    pub fn new(config: GeneratorConfig, set: &TemplateSet) -> Result<Self, ConfigError> {
        set.validate()?;
        let catalog = set.catalog()?;
        Self::with_catalog(config, catalog, set.border.id.clone(), set.spawns.clone())
    }

    /// Builds a generator over an existing catalog. The world builder must
    /// know every catalogued template plus `border`.
    pub fn with_catalog(
        config: GeneratorConfig,
        catalog: TemplateCatalog,
        border: TemplateId,
        spawns: SpawnTable,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        spawns.validate()?;
        Ok(LevelGenerator {
            config,
            catalog,
            border,
            spawns,
            stats: None,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Statistics of the last successful generation.
    pub fn stats(&self) -> Option<&GenerationStats> {
        self.stats.as_ref()
    }

    /// An RNG seeded from the configured seed, or from a fresh random one.
    /// The seed is returned so a run can be reproduced.
    pub fn seeded_rng(&self) -> (u64, StdRng) {
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        (seed, StdRng::seed_from_u64(seed))
    }

    /// Generates a complete level into `world` and places `player` at its
    /// entrance.
    ///
    /// Failed attempts are torn down before the next one starts. Errors that
    /// a new walk cannot fix are returned at once; otherwise generation gives
    /// up after `max_attempts` with the last failure.
    pub fn generate<W, P, R>(
        &mut self,
        world: &mut W,
        player: &mut P,
        rng: &mut R,
    ) -> Result<Level, GenerationError>
    where
        W: WorldBuilder + ?Sized,
        P: PlayerEntity + ?Sized,
        R: Rng + ?Sized,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let start = Instant::now();
            info!("Generation attempt {}/{}", attempt, self.config.max_attempts);

            match self.attempt(world, player, rng) {
                Ok((level, mut stats)) => {
                    stats.attempts = attempt;
                    stats.generation_time = start.elapsed().as_secs_f64() * 1000.0;
                    info!(
                        "Generated {}x{} level in {} attempt(s), {:.2}ms",
                        level.rows(),
                        level.columns(),
                        attempt,
                        stats.generation_time
                    );
                    self.stats = Some(stats);
                    return Ok(level);
                }
                Err(e) if !e.is_retryable() => {
                    warn!("Attempt {} failed, not retrying: {}", attempt, e);
                    return Err(e);
                }
                Err(e) if attempt >= self.config.max_attempts => {
                    warn!("Attempt {} failed: {}", attempt, e);
                    return Err(GenerationError::AttemptsExhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
                Err(e) => warn!("Attempt {} failed: {}", attempt, e),
            }
        }
    }

    fn attempt<W, P, R>(
        &self,
        world: &mut W,
        player: &mut P,
        rng: &mut R,
    ) -> Result<(Level, GenerationStats), GenerationError>
    where
        W: WorldBuilder + ?Sized,
        P: PlayerEntity + ?Sized,
        R: Rng + ?Sized,
    {
        let walker = PathGenerator::new(
            self.config.grid_rows,
            self.config.grid_columns,
            self.config.max_path_steps,
        );
        let walk = walker.generate(rng)?;
        let selection = placer::select_templates(&self.catalog, &walk.requirements, rng)?;

        let mut level = Level::new(walk);
        match self.build(world, player, &mut level, selection, rng) {
            Ok(stats) => Ok((level, stats)),
            Err(e) => {
                level.teardown(world);
                Err(e)
            }
        }
    }

    fn build<W, P, R>(
        &self,
        world: &mut W,
        player: &mut P,
        level: &mut Level,
        selection: Vec<(GridPos, TemplateId)>,
        rng: &mut R,
    ) -> Result<GenerationStats, GenerationError>
    where
        W: WorldBuilder + ?Sized,
        P: PlayerEntity + ?Sized,
        R: Rng + ?Sized,
    {
        placer::place_border(world, level, &self.border)?;
        placer::place_interior(world, level, selection)?;
        let tiles_carved = carver::carve_level(world, level);
        let report = decorate::decorate_level(world, level, &self.spawns, rng)?;
        wiring::wire_entrance(world, player, level)?;

        Ok(GenerationStats {
            path_length: level.path().len(),
            templates_placed: level.cells().len(),
            tiles_carved,
            tiles_broken: report.tiles_broken,
            entities_spawned: report.entities_spawned,
            ..GenerationStats::default()
        })
    }
}
