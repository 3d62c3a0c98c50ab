// src/template/exit.rs
//
// Directions, exits and features, plus the pure lookups between them.

use crate::template::{TEMPLATE_TILE_HEIGHT, TEMPLATE_TILE_WIDTH};
use crate::utils::TilePoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A template-step between adjacent grid cells. Row 0 is the bottom row,
/// so `Top` increases the row index and `Right` increases the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Bottom,
    Left,
    Right,
    Top,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
        Direction::Top,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Top => Direction::Bottom,
        }
    }

    /// The three exits that lie on this side of a template.
    pub fn exits(self) -> [Exit; 3] {
        match self {
            Direction::Bottom => [Exit::BottomLeft, Exit::BottomMiddle, Exit::BottomRight],
            Direction::Left => [Exit::LeftBottom, Exit::LeftMiddle, Exit::LeftTop],
            Direction::Right => [Exit::RightBottom, Exit::RightMiddle, Exit::RightTop],
            Direction::Top => [Exit::TopLeft, Exit::TopMiddle, Exit::TopRight],
        }
    }

    /// Grid delta as `(row, column)`.
    pub fn grid_delta(self) -> (isize, isize) {
        match self {
            Direction::Bottom => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Top => (1, 0),
        }
    }
}

/// A named doorway position on a template's perimeter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Exit {
    BottomLeft,
    BottomMiddle,
    BottomRight,
    LeftBottom,
    LeftMiddle,
    LeftTop,
    RightBottom,
    RightMiddle,
    RightTop,
    TopLeft,
    TopMiddle,
    TopRight,
}

/// How the doorway carver walks away from an exit's start tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveSteps {
    /// Corner exits: one direction only, given as a unit tile step.
    Single(TilePoint),
    /// Middle exits: both directions along the wall.
    Both(TilePoint, TilePoint),
}

impl Exit {
    pub const ALL: [Exit; 12] = [
        Exit::BottomLeft,
        Exit::BottomMiddle,
        Exit::BottomRight,
        Exit::LeftBottom,
        Exit::LeftMiddle,
        Exit::LeftTop,
        Exit::RightBottom,
        Exit::RightMiddle,
        Exit::RightTop,
        Exit::TopLeft,
        Exit::TopMiddle,
        Exit::TopRight,
    ];

    /// The exit on the matching side of the neighbouring template.
    pub fn opposite(self) -> Exit {
        match self {
            Exit::BottomLeft => Exit::TopLeft,
            Exit::BottomMiddle => Exit::TopMiddle,
            Exit::BottomRight => Exit::TopRight,
            Exit::LeftBottom => Exit::RightBottom,
            Exit::LeftMiddle => Exit::RightMiddle,
            Exit::LeftTop => Exit::RightTop,
            Exit::RightBottom => Exit::LeftBottom,
            Exit::RightMiddle => Exit::LeftMiddle,
            Exit::RightTop => Exit::LeftTop,
            Exit::TopLeft => Exit::BottomLeft,
            Exit::TopMiddle => Exit::BottomMiddle,
            Exit::TopRight => Exit::BottomRight,
        }
    }

    /// The side of the template this exit sits on.
    pub fn side(self) -> Direction {
        match self {
            Exit::BottomLeft | Exit::BottomMiddle | Exit::BottomRight => Direction::Bottom,
            Exit::LeftBottom | Exit::LeftMiddle | Exit::LeftTop => Direction::Left,
            Exit::RightBottom | Exit::RightMiddle | Exit::RightTop => Direction::Right,
            Exit::TopLeft | Exit::TopMiddle | Exit::TopRight => Direction::Top,
        }
    }

    /// Template-local tile of the exit's doorway start. Corner exits sit one
    /// tile in from the edge, middle exits at `(dim - 1) / 2`.
    pub fn local_coordinate(self) -> TilePoint {
        let max_x = TEMPLATE_TILE_WIDTH - 1;
        let max_y = TEMPLATE_TILE_HEIGHT - 1;
        let mid_x = (TEMPLATE_TILE_WIDTH - 1) / 2;
        let mid_y = (TEMPLATE_TILE_HEIGHT - 1) / 2;

        match self {
            Exit::BottomLeft => TilePoint::new(1, 0),
            Exit::BottomMiddle => TilePoint::new(mid_x, 0),
            Exit::BottomRight => TilePoint::new(max_x - 1, 0),
            Exit::LeftBottom => TilePoint::new(0, 1),
            Exit::LeftMiddle => TilePoint::new(0, mid_y),
            Exit::LeftTop => TilePoint::new(0, max_y - 1),
            Exit::RightBottom => TilePoint::new(max_x, 1),
            Exit::RightMiddle => TilePoint::new(max_x, mid_y),
            Exit::RightTop => TilePoint::new(max_x, max_y - 1),
            Exit::TopLeft => TilePoint::new(1, max_y),
            Exit::TopMiddle => TilePoint::new(mid_x, max_y),
            Exit::TopRight => TilePoint::new(max_x - 1, max_y),
        }
    }

    /// Walk policy for the doorway carver. Bottom/Top exits walk along x,
    /// Left/Right exits along y; corners walk towards the middle of the side.
    pub fn carve_steps(self) -> CarveSteps {
        let up = TilePoint::new(0, 1);
        let down = TilePoint::new(0, -1);
        let right = TilePoint::new(1, 0);
        let left = TilePoint::new(-1, 0);

        match self {
            Exit::BottomLeft | Exit::TopLeft => CarveSteps::Single(right),
            Exit::BottomRight | Exit::TopRight => CarveSteps::Single(left),
            Exit::LeftBottom | Exit::RightBottom => CarveSteps::Single(up),
            Exit::LeftTop | Exit::RightTop => CarveSteps::Single(down),
            Exit::BottomMiddle | Exit::TopMiddle => CarveSteps::Both(left, right),
            Exit::LeftMiddle | Exit::RightMiddle => CarveSteps::Both(down, up),
        }
    }
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// An interesting feature of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Feature {
    /// Template contains the entrance of the level.
    Entrance,
    /// Template contains the exit of the level.
    Exit,
}
