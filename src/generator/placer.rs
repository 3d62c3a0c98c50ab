// src/generator/placer.rs
//
// Template selection and placement. Selection is done for the whole grid
// before anything is instantiated, so a cell no template can satisfy
// never leaves half a level in the world.

use crate::error::{GenerationError, WorldError};
use crate::generator::level::{Level, PlacedTemplate};
use crate::template::{
    GridPos, RequirementGrid, TemplateCatalog, TemplateId, TEMPLATE_TILE_HEIGHT,
    TEMPLATE_TILE_WIDTH,
};
use crate::utils::TilePoint;
use crate::world::WorldBuilder;
use log::debug;
use rand::Rng;

/// World tile origin of the template at `(row, column)`. Border cells use
/// -1 and the grid size as coordinates.
pub fn template_origin(row: isize, column: isize) -> TilePoint {
    TilePoint::new(
        column as i32 * TEMPLATE_TILE_WIDTH,
        row as i32 * TEMPLATE_TILE_HEIGHT,
    )
}

/// Chooses a template for every interior cell, row-major.
///
/// Cells without required exits draw from the full template list; the rest
/// draw from the catalog's candidates for their exits.
pub fn select_templates<R: Rng + ?Sized>(
    catalog: &TemplateCatalog,
    requirements: &RequirementGrid,
    rng: &mut R,
) -> Result<Vec<(GridPos, TemplateId)>, GenerationError> {
    let mut selection = Vec::with_capacity(requirements.rows() * requirements.columns());

    for (pos, set) in requirements.iter() {
        let template = if set.exits.is_empty() {
            let templates = catalog.templates();
            templates[rng.random_range(0..templates.len())].clone()
        } else {
            let candidates = catalog.query(&set.exits);
            if candidates.is_empty() {
                return Err(GenerationError::CatalogExhausted {
                    pos,
                    exits: set.exits.clone(),
                });
            }
            let index = rng.random_range(0..candidates.len());
            match candidates.into_iter().nth(index) {
                Some(template) => template,
                None => unreachable!("candidate index {} out of range", index),
            }
        };
        debug!("{:?} requires {:?} -> '{}'", pos, set.exits, template);
        selection.push((pos, template));
    }

    Ok(selection)
}

/// Places a one-cell ring of `border` around the grid.
pub fn place_border<W: WorldBuilder + ?Sized>(
    world: &mut W,
    level: &mut Level,
    border: &TemplateId,
) -> Result<(), WorldError> {
    let rows = level.rows() as isize;
    let columns = level.columns() as isize;

    for row in -1..=rows {
        for column in -1..=columns {
            let on_ring = row == -1 || row == rows || column == -1 || column == columns;
            if !on_ring {
                continue;
            }
            let placed = world.instantiate(border, template_origin(row, column))?;
            level.border.push(placed.handle);
        }
    }
    Ok(())
}

/// Instantiates the selected templates, recording each in the level as it
/// goes so a failure part-way can still be torn down.
pub fn place_interior<W: WorldBuilder + ?Sized>(
    world: &mut W,
    level: &mut Level,
    selection: Vec<(GridPos, TemplateId)>,
) -> Result<(), WorldError> {
    for (pos, template) in selection {
        let origin = template_origin(pos.row as isize, pos.column as isize);
        let placed = world.instantiate(&template, origin)?;
        level.cells.push(PlacedTemplate {
            pos,
            template,
            origin,
            handle: placed.handle,
            inventory: placed.inventory,
        });
    }
    Ok(())
}
