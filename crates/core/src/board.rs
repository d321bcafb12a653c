//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of
//! the piece that settled there. Storage is a flat array, so dimensions can
//! never change and every cell is always a valid `Cell`.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom).

use arrayvec::ArrayVec;

use crate::pieces::ActivePiece;
use crate::types::{Cell, PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices removed by one clear, bottom to top
pub type ClearedRows = ArrayVec<u8, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Cells of row `y`
    ///
    /// # Panics
    ///
    /// Panics if `y` is not a board row.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill row `y` with `kind`, optionally leaving one column empty.
    ///
    /// Returns false if `y` is not a board row.
    pub fn fill_row(&mut self, y: i8, kind: PieceKind, gap: Option<i8>) -> bool {
        if y < 0 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        for x in 0..BOARD_WIDTH as i8 {
            let cell = if gap == Some(x) { None } else { Some(kind) };
            self.set(x, y, cell);
        }
        true
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Write `piece` into the board at `position`.
    ///
    /// Cells above the top edge (y < 0) are dropped. The caller must have
    /// confirmed the position is valid; no occupancy check is made.
    ///
    /// # Panics
    ///
    /// Panics if a filled cell falls outside the board horizontally or below
    /// the floor.
    pub fn lock(&mut self, piece: &ActivePiece, position: Position) {
        for (dx, dy) in piece.shape.cells() {
            let x = position.x + dx;
            let y = position.y + dy;
            if y < 0 {
                continue;
            }
            assert!(
                self.set(x, y, Some(piece.kind)),
                "piece cell ({x}, {y}) lies outside the board"
            );
        }
    }

    /// Clear all full rows and return the row indices that were cleared
    /// (sorted bottom to top). Rows above a cleared row fall by the number
    /// of cleared rows beneath them. Uses a two-pointer pass, no allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_y = HEIGHT;

        // Scan from bottom to top
        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y as u8);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + WIDTH, write_y * WIDTH);
                }
            }
        }

        // Refill from the top
        for cell in &mut self.cells[..write_y * WIDTH] {
            *cell = None;
        }

        cleared_rows
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of [`clear_lines`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    pub board: Board,
    pub lines_cleared: u8,
    /// Cleared row indices (pre-clear coordinates), bottom to top
    pub rows: ClearedRows,
}

/// Return a copy of `board` with `piece` burned in at `position`.
///
/// See [`Board::lock`] for the contract.
pub fn place_piece(board: &Board, piece: &ActivePiece, position: Position) -> Board {
    let mut next = board.clone();
    next.lock(piece, position);
    next
}

/// Remove every complete row from a copy of `board`, refilling from the top.
pub fn clear_lines(board: &Board) -> LineClear {
    let mut next = board.clone();
    let rows = next.clear_full_rows();
    LineClear {
        board: next,
        lines_cleared: rows.len() as u8,
        rows,
    }
}
