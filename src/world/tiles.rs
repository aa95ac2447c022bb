use serde::{Deserialize, Serialize};

use crate::objects::body::Body;

/// Character marking a wall tile in `TileGrid::from_map`.
pub const WALL_CHAR: char = '#';

/// Fixed grid of square tile bodies. Tiles never move; a solid tile acts as
/// a wall, a non-solid one as floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    tile_size: f64,
    cols: usize,
    rows: usize,
    tiles: Vec<Body>,
}

impl TileGrid {
    /// A `cols` × `rows` grid of floor tiles.
    pub fn new(cols: usize, rows: usize, tile_size: f64) -> Self {
        let tiles = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Body::tile(col as i64, row as i64, tile_size)))
            .collect();
        TileGrid { tile_size, cols, rows, tiles }
    }

    /// An empty grid; every lookup misses.
    pub fn empty(tile_size: f64) -> Self {
        TileGrid::new(0, 0, tile_size)
    }

    /// Builds a grid from text rows, one character per tile. `#` is a wall,
    /// anything else is floor. Short rows are padded with floor.
    pub fn from_map(rows: &[&str], tile_size: f64) -> Self {
        let cols = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = TileGrid::new(cols, rows.len(), tile_size);
        for (row, line) in rows.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                if c == WALL_CHAR {
                    grid.set_wall(col as i64, row as i64, true);
                }
            }
        }
        grid
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn index(&self, col: i64, row: i64) -> Option<usize> {
        let col = usize::try_from(col).ok()?;
        let row = usize::try_from(row).ok()?;
        (col < self.cols && row < self.rows).then_some(row * self.cols + col)
    }

    /// Tile at (`col`, `row`), or `None` outside the grid.
    pub fn get(&self, col: i64, row: i64) -> Option<&Body> {
        self.index(col, row).map(|i| &self.tiles[i])
    }

    pub fn get_mut(&mut self, col: i64, row: i64) -> Option<&mut Body> {
        self.index(col, row).map(move |i| &mut self.tiles[i])
    }

    /// Turns a tile into a wall (or back into floor). Returns false outside the grid.
    pub fn set_wall(&mut self, col: i64, row: i64, wall: bool) -> bool {
        match self.get_mut(col, row) {
            Some(tile) => {
                tile.solid = wall;
                tile.label = String::from(if wall { "wall tile" } else { "tile" });
                true
            }
            None => false,
        }
    }

    pub fn is_wall(&self, col: i64, row: i64) -> bool {
        self.get(col, row).is_some_and(|tile| tile.solid)
    }

    /// Tiles within `reach` cells of (`col`, `row`) in each direction, row by row.
    pub fn neighborhood(&self, col: i64, row: i64, reach: i64) -> impl Iterator<Item = (i64, i64, &Body)> + '_ {
        (row - reach..=row + reach).flat_map(move |r| {
            (col - reach..=col + reach).filter_map(move |c| self.get(c, r).map(|tile| (c, r, tile)))
        })
    }
}
