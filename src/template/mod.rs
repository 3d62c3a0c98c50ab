// src/template/mod.rs
pub mod blueprint;
pub mod catalog;
pub mod exit;
pub mod requirement;

pub use blueprint::{SpawnTable, TemplateBlueprint, TemplateSet};
pub use catalog::{CatalogEntry, TemplateCatalog};
pub use exit::{CarveSteps, Direction, Exit, Feature};
pub use requirement::{GridPos, RequirementGrid, RequirementSet};

use serde::{Deserialize, Serialize};
use std::fmt;

// Template dimensions, in tiles.
pub const TEMPLATE_TILE_WIDTH: i32 = 16;
pub const TEMPLATE_TILE_HEIGHT: i32 = 16;

/// Identifier of an authored template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        TemplateId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(id: &str) -> Self {
        TemplateId::new(id)
    }
}
