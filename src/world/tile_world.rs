// src/world/tile_world.rs

use crate::error::WorldError;
use crate::template::blueprint::TileKind;
use crate::template::{TemplateBlueprint, TemplateId, TemplateSet};
use crate::utils::TilePoint;
use crate::world::{InstanceHandle, PlacedInstance, TileHandle, TileInventory, WorldBuilder};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// An instantiated template.
#[derive(Debug, Clone)]
pub struct WorldInstance {
    pub template: TemplateId,
    pub origin: TilePoint,
    pub tiles: Vec<TileHandle>,
}

/// A live tile, in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldTile {
    pub instance: InstanceHandle,
    pub position: TilePoint,
    pub kind: TileKind,
    pub visible: bool,
}

/// A spawned entity.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldEntity {
    pub kind: String,
    pub position: TilePoint,
}

/// An in-memory world that materializes authored blueprints as tiles.
/// Doors start hidden, as they are in the authored templates.
#[derive(Default)]
pub struct TileWorld {
    blueprints: HashMap<TemplateId, TemplateBlueprint>,
    entity_kinds: BTreeSet<String>,

    pub instances: Arc<RwLock<BTreeMap<InstanceHandle, WorldInstance>>>,
    pub tiles: Arc<RwLock<BTreeMap<TileHandle, WorldTile>>>,
    pub entities: Arc<RwLock<BTreeMap<InstanceHandle, WorldEntity>>>,

    pub checksum: Arc<RwLock<u32>>,
    next_handle: u64,
}

impl TileWorld {
    /// Create a world that knows every template and entity kind in `set`.
    pub fn new(set: &TemplateSet) -> Self {
        let mut blueprints: HashMap<TemplateId, TemplateBlueprint> = set
            .templates
            .iter()
            .map(|t| (t.id.clone(), t.clone()))
            .collect();
        blueprints.insert(set.border.id.clone(), set.border.clone());

        Self {
            blueprints,
            entity_kinds: set.spawns.kinds.iter().cloned().collect(),
            ..Self::default()
        }
    }

    pub fn num_instances(&self) -> usize {
        self.instances.read().len()
    }

    pub fn num_tiles(&self) -> usize {
        self.tiles.read().len()
    }

    pub fn num_entities(&self) -> usize {
        self.entities.read().len()
    }

    /// The live tile at a world position, if any.
    pub fn tile_at(&self, position: TilePoint) -> Option<WorldTile> {
        self.tiles
            .read()
            .values()
            .find(|tile| tile.position == position)
            .cloned()
    }

    pub fn tile(&self, handle: TileHandle) -> Option<WorldTile> {
        self.tiles.read().get(&handle).cloned()
    }

    /// Number of live tiles of `kind` belonging to `instance`.
    pub fn count_tiles(&self, instance: InstanceHandle, kind: TileKind) -> usize {
        self.tiles
            .read()
            .values()
            .filter(|tile| tile.instance == instance && tile.kind == kind)
            .count()
    }

    /// Computes a checksum over every live tile and entity.
    pub fn get_level_checksum(&self) -> u32 {
        let mut checksum = 0u32;
        {
            let tiles = self.tiles.read();
            for (handle, tile) in tiles.iter() {
                checksum_tile(&mut checksum, *handle, tile);
            }
        }
        {
            let entities = self.entities.read();
            for (handle, entity) in entities.iter() {
                checksum_entity(&mut checksum, *handle, entity);
            }
        }
        *self.checksum.write() = checksum;
        checksum
    }

    /// Draws the live tile map, top row first. Hidden doors draw as floor,
    /// entities as `m`.
    pub fn render_ascii(&self) -> String {
        let tiles = self.tiles.read();
        let entities = self.entities.read();

        let positions = tiles
            .values()
            .map(|t| t.position)
            .chain(entities.values().map(|e| e.position));
        let Some((min, max)) = positions.fold(None, |acc: Option<(TilePoint, TilePoint)>, p| {
            Some(match acc {
                None => (p, p),
                Some((lo, hi)) => (
                    TilePoint::new(lo.x.min(p.x), lo.y.min(p.y)),
                    TilePoint::new(hi.x.max(p.x), hi.y.max(p.y)),
                ),
            })
        }) else {
            return String::new();
        };

        let width = (max.x - min.x + 1) as usize;
        let height = (max.y - min.y + 1) as usize;
        let mut canvas = vec![vec!['.'; width]; height];
        for tile in tiles.values() {
            let c = match tile.kind {
                TileKind::Door if !tile.visible => '.',
                kind => kind.to_char(),
            };
            canvas[(tile.position.y - min.y) as usize][(tile.position.x - min.x) as usize] = c;
        }
        for entity in entities.values() {
            canvas[(entity.position.y - min.y) as usize][(entity.position.x - min.x) as usize] = 'm';
        }

        let mut out = String::with_capacity((width + 1) * height);
        for row in canvas.iter().rev() {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }

    pub fn clear(&mut self) {
        self.instances.write().clear();
        self.tiles.write().clear();
        self.entities.write().clear();
        *self.checksum.write() = 0;
    }

    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl WorldBuilder for TileWorld {
    fn instantiate(
        &mut self,
        template: &TemplateId,
        origin: TilePoint,
    ) -> Result<PlacedInstance, WorldError> {
        let blueprint = self
            .blueprints
            .get(template)
            .ok_or_else(|| WorldError::UnknownTemplate(template.clone()))?;
        // Sets built in code never went through loading, so check here too.
        let layout = blueprint
            .validate()
            .and_then(|_| blueprint.tiles())
            .map_err(|e| WorldError::InvalidTemplate {
                id: template.clone(),
                reason: e.to_string(),
            })?;
        let breakable_chance = blueprint.breakable_chance;

        let handle = InstanceHandle(self.next_handle());
        let mut inventory = TileInventory::new(breakable_chance);
        let mut owned = Vec::with_capacity(layout.len());
        let mut new_tiles = Vec::with_capacity(layout.len());

        for (local, kind) in layout {
            let tile = TileHandle(self.next_handle());
            inventory.insert(kind, local, tile);
            owned.push(tile);
            new_tiles.push((
                tile,
                WorldTile {
                    instance: handle,
                    position: origin + local,
                    kind,
                    visible: kind != TileKind::Door,
                },
            ));
        }

        self.tiles.write().extend(new_tiles);
        self.instances.write().insert(
            handle,
            WorldInstance {
                template: template.clone(),
                origin,
                tiles: owned,
            },
        );

        Ok(PlacedInstance { handle, inventory })
    }

    fn destroy(&mut self, instance: InstanceHandle) {
        if let Some(removed) = self.instances.write().remove(&instance) {
            let mut tiles = self.tiles.write();
            for tile in removed.tiles {
                tiles.remove(&tile);
            }
            return;
        }
        self.entities.write().remove(&instance);
    }

    fn remove_tile(&mut self, tile: TileHandle) {
        self.tiles.write().remove(&tile);
    }

    fn reveal_tile(&mut self, tile: TileHandle) {
        if let Some(tile) = self.tiles.write().get_mut(&tile) {
            tile.visible = true;
        }
    }

    fn spawn_entity(&mut self, kind: &str, at: TilePoint) -> Result<InstanceHandle, WorldError> {
        if !self.entity_kinds.contains(kind) {
            return Err(WorldError::UnknownEntity(kind.to_string()));
        }
        let handle = InstanceHandle(self.next_handle());
        self.entities.write().insert(
            handle,
            WorldEntity {
                kind: kind.to_string(),
                position: at,
            },
        );
        Ok(handle)
    }
}

// --- Checksum helper functions ---

fn add_crc(crc: &mut u32, value: i64) {
    *crc = crc.rotate_left(5).wrapping_add(value as u32);
}

fn checksum_tile(crc: &mut u32, handle: TileHandle, tile: &WorldTile) {
    add_crc(crc, handle.0 as i64);
    add_crc(crc, tile.position.x as i64);
    add_crc(crc, tile.position.y as i64);
    add_crc(crc, tile.kind.to_char() as i64);
    add_crc(crc, tile.visible as i64);
}

fn checksum_entity(crc: &mut u32, handle: InstanceHandle, entity: &WorldEntity) {
    add_crc(crc, handle.0 as i64);
    add_crc(crc, entity.position.x as i64);
    add_crc(crc, entity.position.y as i64);
    for byte in entity.kind.as_bytes() {
        add_crc(crc, *byte as i64);
    }
}
