// src/generator/host.rs

use crate::error::GenerationError;
use crate::generator::{Level, LevelGenerator};
use crate::world::{PlayerEntity, WorldBuilder};
use log::{debug, error};
use parking_lot::RwLock;
use rand::Rng;
use std::sync::Arc;

/// Owns the current level and replaces it on demand.
///
/// Regeneration holds the level's write lock from teardown until the new
/// level is complete, so readers see either no level or a whole one.
pub struct LevelHost {
    generator: LevelGenerator,
    pub level: Arc<RwLock<Option<Level>>>,
}

impl LevelHost {
    pub fn new(generator: LevelGenerator) -> Self {
        LevelHost {
            generator,
            level: Arc::new(RwLock::new(None)),
        }
    }

    // Thread-safe getter.
    pub fn level(&self) -> Arc<RwLock<Option<Level>>> {
        Arc::clone(&self.level)
    }

    pub fn is_ready(&self) -> bool {
        self.level.read().is_some()
    }

    pub fn generator(&self) -> &LevelGenerator {
        &self.generator
    }

    /// Tears down the current level, if any, and generates a new one. On
    /// failure the host is left without a level.
    pub fn regenerate<W, P, R>(
        &mut self,
        world: &mut W,
        player: &mut P,
        rng: &mut R,
    ) -> Result<(), GenerationError>
    where
        W: WorldBuilder + ?Sized,
        P: PlayerEntity + ?Sized,
        R: Rng + ?Sized,
    {
        let mut slot = self.level.write();
        if let Some(old) = slot.take() {
            debug!("Replacing current level");
            old.teardown(world);
        }

        match self.generator.generate(world, player, rng) {
            Ok(level) => {
                *slot = Some(level);
                Ok(())
            }
            Err(e) => {
                error!("Level generation failed: {}", e);
                Err(e)
            }
        }
    }

    /// Destroys the current level, if any.
    pub fn teardown<W: WorldBuilder + ?Sized>(&mut self, world: &mut W) {
        if let Some(level) = self.level.write().take() {
            level.teardown(world);
        }
    }
}
