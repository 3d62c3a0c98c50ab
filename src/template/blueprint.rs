// src/template/blueprint.rs
//
// Authored template data: the tile layout of each room template, the solid
// border template and the spawn table. Template sets are plain JSON files.

use crate::error::ConfigError;
use crate::template::{
    CarveSteps, CatalogEntry, Direction, Exit, TemplateCatalog, TemplateId,
    TEMPLATE_TILE_HEIGHT, TEMPLATE_TILE_WIDTH,
};
use crate::utils::TilePoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Number of tiles in a carvable doorway segment.
const DOORWAY_WIDTH: i32 = 3;

/// What an authored tile is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// `#`: solid wall, never removed by generation.
    Wall,
    /// `X`: wall that obstructs an exit; carved when the exit is required.
    ExitWall,
    /// `D`: hidden door, revealed on the entrance template.
    Door,
    /// `B`: breakable, removed at random during decoration.
    Breakable,
    /// `S`: spawn marker, resolved during decoration.
    SpawnPoint,
}

impl TileKind {
    pub fn from_char(c: char) -> Option<Option<TileKind>> {
        match c {
            '.' | ' ' => Some(None),
            '#' => Some(Some(TileKind::Wall)),
            'X' => Some(Some(TileKind::ExitWall)),
            'D' => Some(Some(TileKind::Door)),
            'B' => Some(Some(TileKind::Breakable)),
            'S' => Some(Some(TileKind::SpawnPoint)),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::ExitWall => 'X',
            TileKind::Door => 'D',
            TileKind::Breakable => 'B',
            TileKind::SpawnPoint => 'S',
        }
    }
}

/// One authored room template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateBlueprint {
    pub id: TemplateId,
    #[serde(default)]
    pub supported_exits: BTreeSet<Exit>,
    /// Tile rows, top row first, one character per tile.
    pub rows: Vec<String>,
    /// Chance that each breakable tile is removed during decoration.
    #[serde(default)]
    pub breakable_chance: f64,
}

impl TemplateBlueprint {
    /// Parses the rows into template-local tiles (y = 0 is the bottom row).
    pub fn tiles(&self) -> Result<Vec<(TilePoint, TileKind)>, ConfigError> {
        if self.rows.len() != TEMPLATE_TILE_HEIGHT as usize {
            return Err(self.invalid(format!(
                "expected {} rows, found {}",
                TEMPLATE_TILE_HEIGHT,
                self.rows.len()
            )));
        }

        let mut tiles = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            let y = TEMPLATE_TILE_HEIGHT - 1 - i as i32;
            if row.chars().count() != TEMPLATE_TILE_WIDTH as usize {
                return Err(self.invalid(format!(
                    "row {} has {} tiles, expected {}",
                    i,
                    row.chars().count(),
                    TEMPLATE_TILE_WIDTH
                )));
            }
            for (x, c) in row.chars().enumerate() {
                match TileKind::from_char(c) {
                    Some(Some(kind)) => tiles.push((TilePoint::new(x as i32, y), kind)),
                    Some(None) => {}
                    None => {
                        return Err(self.invalid(format!("unknown tile '{}' at ({}, {})", c, x, y)))
                    }
                }
            }
        }
        Ok(tiles)
    }

    /// Checks the layout parses, the breakable chance is a probability and
    /// every declared exit has an exit wall at its doorway start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.breakable_chance) {
            return Err(self.invalid(format!(
                "breakable_chance {} is not in [0, 1]",
                self.breakable_chance
            )));
        }
        let tiles = self.tiles()?;
        for exit in &self.supported_exits {
            let start = exit.local_coordinate();
            let has_exit_wall = tiles
                .iter()
                .any(|(pos, kind)| *pos == start && *kind == TileKind::ExitWall);
            if !has_exit_wall {
                return Err(self.invalid(format!(
                    "declares {} but has no exit wall at ({}, {})",
                    exit, start.x, start.y
                )));
            }
        }
        Ok(())
    }

    pub fn catalog_entry(&self) -> CatalogEntry {
        CatalogEntry::new(self.id.clone(), self.supported_exits.iter().copied())
    }

    /// Builds a walled room with doorway segments for `exits`, a hidden
    /// door and, when `decorated`, breakable ledges and a spawn marker.
    pub fn walled_room(id: &str, exits: impl IntoIterator<Item = Exit>, decorated: bool) -> Self {
        let w = TEMPLATE_TILE_WIDTH as usize;
        let h = TEMPLATE_TILE_HEIGHT as usize;
        // Indexed [y][x], y = 0 at the bottom.
        let mut grid = vec![vec!['.'; w]; h];
        for y in 0..h {
            for x in 0..w {
                if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                    grid[y][x] = '#';
                }
            }
        }

        let supported_exits: BTreeSet<Exit> = exits.into_iter().collect();
        for exit in &supported_exits {
            for pos in doorway_segment(*exit) {
                grid[pos.y as usize][pos.x as usize] = 'X';
            }
        }

        grid[1][(TEMPLATE_TILE_WIDTH as usize - 1) / 2] = 'D';
        if decorated {
            for x in [3, 4, 5, 10, 11, 12] {
                grid[5][x] = 'B';
            }
            grid[9][8] = 'S';
        }

        let rows = grid
            .iter()
            .rev()
            .map(|row| row.iter().collect::<String>())
            .collect();

        TemplateBlueprint {
            id: TemplateId::new(id),
            supported_exits,
            rows,
            breakable_chance: if decorated { 0.5 } else { 0.0 },
        }
    }

    /// A template made entirely of wall, used for the border ring.
    pub fn solid(id: &str) -> Self {
        let row: String = "#".repeat(TEMPLATE_TILE_WIDTH as usize);
        TemplateBlueprint {
            id: TemplateId::new(id),
            supported_exits: BTreeSet::new(),
            rows: vec![row; TEMPLATE_TILE_HEIGHT as usize],
            breakable_chance: 0.0,
        }
    }

    fn invalid(&self, reason: String) -> ConfigError {
        ConfigError::Blueprint {
            id: self.id.to_string(),
            reason,
        }
    }
}

/// The tiles the doorway carver opens for `exit` on a standard room.
fn doorway_segment(exit: Exit) -> Vec<TilePoint> {
    let start = exit.local_coordinate();
    match exit.carve_steps() {
        CarveSteps::Single(step) => (0..DOORWAY_WIDTH)
            .map(|i| start.offset(step.x * i, step.y * i))
            .collect(),
        CarveSteps::Both(a, b) => {
            let reach = DOORWAY_WIDTH / 2;
            let mut tiles = vec![start];
            for i in 1..=reach {
                tiles.push(start.offset(a.x * i, a.y * i));
                tiles.push(start.offset(b.x * i, b.y * i));
            }
            tiles
        }
    }
}

/// Entities that spawn markers may turn into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTable {
    /// Chance that a spawn marker produces an entity.
    pub chance: f64,
    pub kinds: Vec<String>,
}

impl SpawnTable {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.chance) {
            return Err(ConfigError::Invalid(format!(
                "spawn chance {} is not in [0, 1]",
                self.chance
            )));
        }
        if self.chance > 0.0 && self.kinds.is_empty() {
            return Err(ConfigError::Invalid(
                "spawn chance is set but no entity kinds are listed".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SpawnTable {
    fn default() -> Self {
        Self {
            chance: 0.0,
            kinds: Vec::new(),
        }
    }
}

/// Every template available to the generator, plus the border template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSet {
    pub templates: Vec<TemplateBlueprint>,
    pub border: TemplateBlueprint,
    #[serde(default)]
    pub spawns: SpawnTable,
}

impl TemplateSet {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let set: TemplateSet = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for blueprint in &self.templates {
            blueprint.validate()?;
        }
        self.border.validate()?;
        if self.templates.iter().any(|t| t.id == self.border.id) {
            return Err(ConfigError::Invalid(format!(
                "border template '{}' must not be selectable",
                self.border.id
            )));
        }
        self.spawns.validate()
    }

    /// Builds the exit catalog over the selectable templates.
    pub fn catalog(&self) -> Result<TemplateCatalog, ConfigError> {
        Ok(TemplateCatalog::build(
            self.templates.iter().map(|t| t.catalog_entry()),
        )?)
    }

    pub fn get(&self, id: &TemplateId) -> Option<&TemplateBlueprint> {
        if self.border.id == *id {
            return Some(&self.border);
        }
        self.templates.iter().find(|t| t.id == *id)
    }

    /// A built-in set that can satisfy any exit pair the path walk produces.
    pub fn standard() -> Self {
        let side = |d: Direction| d.exits().to_vec();
        let sides = |ds: &[Direction]| ds.iter().flat_map(|d| d.exits()).collect::<Vec<_>>();

        TemplateSet {
            templates: vec![
                TemplateBlueprint::walled_room("hall", Exit::ALL, true),
                TemplateBlueprint::walled_room(
                    "corridor",
                    sides(&[Direction::Left, Direction::Right]),
                    false,
                ),
                TemplateBlueprint::walled_room(
                    "shaft",
                    sides(&[Direction::Bottom, Direction::Top]),
                    true,
                ),
                TemplateBlueprint::walled_room(
                    "crossroads",
                    [
                        Exit::BottomMiddle,
                        Exit::LeftMiddle,
                        Exit::RightMiddle,
                        Exit::TopMiddle,
                    ],
                    false,
                ),
                TemplateBlueprint::walled_room(
                    "lower_bend",
                    sides(&[Direction::Bottom, Direction::Left, Direction::Right]),
                    true,
                ),
                TemplateBlueprint::walled_room(
                    "upper_bend",
                    sides(&[Direction::Top, Direction::Left, Direction::Right]),
                    true,
                ),
                TemplateBlueprint::walled_room("landing", side(Direction::Top), false),
                TemplateBlueprint::walled_room("closet", [], true),
            ],
            border: TemplateBlueprint::solid("bedrock"),
            spawns: SpawnTable {
                chance: 0.35,
                kinds: vec!["crawler".to_string(), "spitter".to_string()],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_set_is_valid() {
        let set = TemplateSet::standard();
        set.validate().unwrap();
        let catalog = set.catalog().unwrap();
        assert_eq!(catalog.templates().len(), set.templates.len());
        assert!(set.get(&TemplateId::new("bedrock")).is_some());
        assert!(set.get(&TemplateId::new("missing")).is_none());
    }

    #[test]
    fn test_standard_set_covers_every_exit_pair() {
        let catalog = TemplateSet::standard().catalog().unwrap();
        for a in Exit::ALL {
            for b in Exit::ALL {
                let found = catalog.query(&BTreeSet::from([a, b]));
                assert!(!found.is_empty(), "no template for {:?} + {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_walled_room_layout() {
        let room = TemplateBlueprint::walled_room("test", [Exit::BottomLeft, Exit::RightMiddle], false);
        let tiles = room.tiles().unwrap();
        let kind_at = |x: i32, y: i32| {
            tiles
                .iter()
                .find(|(p, _)| *p == TilePoint::new(x, y))
                .map(|(_, k)| *k)
        };

        assert_eq!(kind_at(0, 0), Some(TileKind::Wall));
        assert_eq!(kind_at(1, 0), Some(TileKind::ExitWall));
        assert_eq!(kind_at(3, 0), Some(TileKind::ExitWall));
        assert_eq!(kind_at(4, 0), Some(TileKind::Wall));
        assert_eq!(kind_at(15, 6), Some(TileKind::ExitWall));
        assert_eq!(kind_at(15, 8), Some(TileKind::ExitWall));
        assert_eq!(kind_at(15, 9), Some(TileKind::Wall));
        assert_eq!(kind_at(7, 1), Some(TileKind::Door));
        assert_eq!(kind_at(7, 7), None);
        // Undeclared exits stay solid wall.
        assert_eq!(kind_at(7, 15), Some(TileKind::Wall));
    }

    #[test]
    fn test_validate_rejects_bad_layouts() {
        let mut short = TemplateBlueprint::solid("short");
        short.rows.pop();
        assert!(matches!(short.validate(), Err(ConfigError::Blueprint { .. })));

        let mut odd = TemplateBlueprint::solid("odd");
        odd.rows[3] = "#######?########".to_string();
        assert!(odd.validate().is_err());

        // Declares an exit without the wall to carve.
        let mut liar = TemplateBlueprint::solid("liar");
        liar.supported_exits.insert(Exit::TopMiddle);
        assert!(liar.validate().is_err());
    }

    #[test]
    fn test_template_set_json() {
        let set = TemplateSet {
            templates: vec![TemplateBlueprint::walled_room("room", [Exit::TopMiddle], false)],
            border: TemplateBlueprint::solid("rock"),
            spawns: SpawnTable::default(),
        };
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.contains("\"TopMiddle\""));
        let loaded = TemplateSet::from_json_str(&json).unwrap();
        assert_eq!(loaded, set);
    }

    #[test]
    fn test_template_set_rejects_selectable_border() {
        let set = TemplateSet {
            templates: vec![TemplateBlueprint::solid("rock")],
            border: TemplateBlueprint::solid("rock"),
            spawns: SpawnTable::default(),
        };
        assert!(matches!(set.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_exit_name_rejected() {
        let json = r#"{
            "templates": [{ "id": "x", "supported_exits": ["Sideways"], "rows": [] }],
            "border": { "id": "b", "rows": [] }
        }"#;
        assert!(matches!(TemplateSet::from_json_str(json), Err(ConfigError::Json(_))));
    }
}
