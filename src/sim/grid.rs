//! Occupancy grid and placement search
//!
//! A cell is occupied while the player or an on-board collectable claims it.
//! Enemies never claim cells.

use serde::{Deserialize, Serialize};

use crate::consts::{COLS, ROWS};

/// A tile address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub row: usize,
    pub col: usize,
}

impl Tile {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// Next tile in row-major order, wrapping from the last cell to (0, 0)
    pub fn next_row_major(self) -> Self {
        if self.col + 1 < COLS {
            Self::new(self.row, self.col + 1)
        } else if self.row + 1 < ROWS {
            Self::new(self.row + 1, 0)
        } else {
            Self::new(0, 0)
        }
    }
}

/// ROWS x COLS occupancy matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Grid {
    cells: [[bool; COLS]; ROWS],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every cell
    pub fn rebuild(&mut self) {
        self.cells = [[false; COLS]; ROWS];
    }

    /// Out-of-bounds tiles are never free
    pub fn is_free(&self, tile: Tile) -> bool {
        tile.in_bounds() && !self.cells[tile.row][tile.col]
    }

    /// Mark a cell occupied. Returns false for out-of-bounds tiles.
    pub fn occupy(&mut self, tile: Tile) -> bool {
        if !tile.in_bounds() {
            return false;
        }
        self.cells[tile.row][tile.col] = true;
        true
    }

    /// Mark a cell free. Returns false for out-of-bounds tiles.
    pub fn release(&mut self, tile: Tile) -> bool {
        if !tile.in_bounds() {
            return false;
        }
        self.cells[tile.row][tile.col] = false;
        true
    }

    /// Scan row-major from `start` for a free cell and claim it.
    ///
    /// Probes at most ROWS x COLS cells; `None` means the board is full.
    pub fn find_free_cell(&mut self, start: Tile) -> Option<Tile> {
        let mut probe = Tile::new(start.row % ROWS, start.col % COLS);
        for _ in 0..ROWS * COLS {
            if self.is_free(probe) {
                self.occupy(probe);
                return Some(probe);
            }
            probe = probe.next_row_major();
        }
        None
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c).count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == ROWS * COLS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupy_release() {
        let mut grid = Grid::new();
        let tile = Tile::new(2, 3);
        assert!(grid.is_free(tile));
        assert!(grid.occupy(tile));
        assert!(!grid.is_free(tile));
        assert_eq!(grid.occupied_count(), 1);
        assert!(grid.release(tile));
        assert!(grid.is_free(tile));
        assert!(!grid.occupy(Tile::new(ROWS, 0)));
        assert!(!grid.is_free(Tile::new(0, COLS)));
    }

    #[test]
    fn test_find_free_cell_claims_start() {
        let mut grid = Grid::new();
        let found = grid.find_free_cell(Tile::new(3, 1));
        assert_eq!(found, Some(Tile::new(3, 1)));
        assert!(!grid.is_free(Tile::new(3, 1)));
    }

    #[test]
    fn test_find_free_cell_advances_column_then_row() {
        let mut grid = Grid::new();
        grid.occupy(Tile::new(1, 3));
        grid.occupy(Tile::new(1, 4));
        assert_eq!(grid.find_free_cell(Tile::new(1, 3)), Some(Tile::new(2, 0)));
    }

    #[test]
    fn test_find_free_cell_wraps_to_top() {
        let mut grid = Grid::new();
        grid.occupy(Tile::new(ROWS - 1, COLS - 1));
        assert_eq!(
            grid.find_free_cell(Tile::new(ROWS - 1, COLS - 1)),
            Some(Tile::new(0, 0))
        );
    }

    #[test]
    fn test_find_free_cell_full_board() {
        let mut grid = Grid::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                grid.occupy(Tile::new(row, col));
            }
        }
        assert!(grid.is_full());
        assert_eq!(grid.find_free_cell(Tile::new(2, 2)), None);
    }

    #[test]
    fn test_find_free_cell_last_free_cell() {
        let mut grid = Grid::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                grid.occupy(Tile::new(row, col));
            }
        }
        grid.release(Tile::new(2, 1));
        assert_eq!(grid.find_free_cell(Tile::new(2, 2)), Some(Tile::new(2, 1)));
        assert!(grid.is_full());
    }
}
