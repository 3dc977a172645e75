//! Tile grid geometry.
//!
//! [`TileGrid`] converts between pixel positions and [`TileCell`] coordinates.
//! Cells are square, `tile_size` pixels wide, with cell `(0, 0)` covering
//! `[0, tile_size)` on both axes. Positions left of or above the origin map to
//! negative cells.

use bevy_ecs::prelude::Resource;

use crate::components::mapposition::MapPosition;

const DEFAULT_TILE_SIZE: u32 = 16;

/// Integer `(column, row)` coordinate of a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCell {
    pub col: i32,
    pub row: i32,
}

impl TileCell {
    pub const fn new(col: i32, row: i32) -> Self {
        TileCell { col, row }
    }
}

/// Geometry of the tile map.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct TileGrid {
    /// Width and height of one tile, in pixels.
    pub tile_size: u32,
}

impl Default for TileGrid {
    fn default() -> Self {
        TileGrid {
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl TileGrid {
    pub fn new(tile_size: u32) -> Self {
        TileGrid {
            tile_size: tile_size.max(1),
        }
    }

    /// Cell containing the pixel `(x, y)`.
    pub fn cell_at(&self, x: f32, y: f32) -> TileCell {
        let size = self.tile_size as f32;
        TileCell {
            col: (x / size).floor() as i32,
            row: (y / size).floor() as i32,
        }
    }

    /// Cell containing `position`.
    pub fn cell_of(&self, position: &MapPosition) -> TileCell {
        self.cell_at(position.x, position.y)
    }

    /// Pixel coordinates of the centre of `cell`.
    pub fn center_of(&self, cell: TileCell) -> (f32, f32) {
        let size = self.tile_size as f32;
        (
            cell.col as f32 * size + size / 2.0,
            cell.row as f32 * size + size / 2.0,
        )
    }
}
