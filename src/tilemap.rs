//! ASCII tile map parsing.
//!
//! A map is an ordered sequence of rows where `'0'` marks a blocked cell
//! and any other character marks a walkable one. Parsing is best-effort:
//! malformed input produces diagnostics, never an error.

use log::warn;

/// Character that marks a blocked (non-walkable) cell.
pub const BLOCKED_TILE: char = '0';

/// A parsed tile map: a rectangular walkability mask plus the cell size
/// used to place nodes in world space.
#[derive(Clone, Debug)]
pub struct TileMap {
    width: i32,
    height: i32,
    cell_size: f32,
    walkable: Vec<bool>,
}

impl TileMap {
    /// Parse an ASCII map.
    ///
    /// The map width is taken from the first row. Rows of a different
    /// length are tolerated with a diagnostic: missing columns are treated
    /// as blocked, extra columns are ignored.
    pub fn parse<S: AsRef<str>>(rows: &[S], cell_size: f32) -> Self {
        let height = rows.len() as i32;
        let width = rows
            .first()
            .map(|r| r.as_ref().chars().count())
            .unwrap_or(0) as i32;

        let mut walkable = vec![false; (width * height) as usize];

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let row_len = row.chars().count() as i32;
            if row_len != width {
                warn!(
                    "mismatched row #{} in ASCII map ({} columns instead of {})",
                    y, row_len, width
                );
            }

            for (x, tile) in row.chars().enumerate().take(width as usize) {
                walkable[y * width as usize + x] = tile != BLOCKED_TILE;
            }
        }

        Self {
            width,
            height,
            cell_size,
            walkable,
        }
    }

    /// Map width in cells
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Map height in cells
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Cell size in world units
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Whether the cell at (x, y) is walkable. Out-of-bounds cells are not.
    #[inline]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return false;
        }
        self.walkable[(y * self.width + x) as usize]
    }
}
