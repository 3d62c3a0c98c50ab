// src/error.rs
//! Error types for catalog building, world collaboration, configuration
//! loading and level generation.

use crate::template::{Exit, GridPos, TemplateId};
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised while building a template catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("template '{0}' is registered more than once")]
    DuplicateTemplate(TemplateId),

    #[error("a catalog needs at least one template")]
    Empty,
}

/// Errors reported by a world-builder collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("unknown template '{0}'")]
    UnknownTemplate(TemplateId),

    #[error("unknown entity kind '{0}'")]
    UnknownEntity(String),

    #[error("template '{id}' cannot be instantiated: {reason}")]
    InvalidTemplate { id: TemplateId, reason: String },
}

/// Errors raised while loading configuration or template sets.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("template '{id}': {reason}")]
    Blueprint { id: String, reason: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors raised while generating a level.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("no template supports exits {exits:?} required at {pos:?}")]
    CatalogExhausted { pos: GridPos, exits: BTreeSet<Exit> },

    #[error("path walk exceeded its budget of {budget} steps")]
    StepBudgetExhausted { budget: usize },

    #[error("entrance template '{template}' at {pos:?} has no door tile")]
    MissingDoorTile { pos: GridPos, template: TemplateId },

    #[error("requirement grid has no entrance cell")]
    MissingEntrance,

    #[error("world builder failed: {0}")]
    World(#[from] WorldError),

    #[error("gave up after {attempts} attempts: {last}")]
    AttemptsExhausted {
        attempts: usize,
        last: Box<GenerationError>,
    },
}

impl GenerationError {
    /// Whether a fresh attempt with a new random walk may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::CatalogExhausted { .. }
                | GenerationError::StepBudgetExhausted { .. }
                | GenerationError::MissingDoorTile { .. }
        )
    }
}
