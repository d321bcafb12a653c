//! Pieces module - Tetromino catalog and rotation states
//!
//! Every piece kind has a fixed, pre-enumerated list of rotation states.
//! Rotating advances through that list modulo its length; there is no
//! runtime rotation math and no wall-kick search.

use crate::types::{PieceKind, Position, BOARD_WIDTH};

/// Filled cells of one rotation state inside a square bounding box.
///
/// Rows are bitmasks with the most significant of the `size` low bits being
/// the leftmost column, so `0b010` in a 3-wide box fills the middle column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    size: u8,
    rows: [u8; 4],
}

impl ShapeMatrix {
    const fn new(size: u8, rows: [u8; 4]) -> Self {
        Self { size, rows }
    }

    /// Side length of the bounding box
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether `(col, row)` inside the bounding box is filled
    #[inline(always)]
    pub fn is_filled(&self, col: u8, row: u8) -> bool {
        if col >= self.size || row >= self.size {
            return false;
        }
        (self.rows[row as usize] >> (self.size - 1 - col)) & 1 == 1
    }

    /// Filled cells as `(dx, dy)` offsets from the box's top-left corner,
    /// row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.size).flat_map(move |row| {
            (0..self.size)
                .filter(move |&col| self.is_filled(col, row))
                .map(move |col| (col as i8, row as i8))
        })
    }

    /// Index of the first row containing a filled cell
    pub fn top_row(&self) -> u8 {
        (0..self.size)
            .find(|&row| self.rows[row as usize] != 0)
            .unwrap_or(0)
    }
}

static I_SHAPES: [ShapeMatrix; 2] = [
    ShapeMatrix::new(4, [0b0000, 0b1111, 0b0000, 0b0000]),
    ShapeMatrix::new(4, [0b0010, 0b0010, 0b0010, 0b0010]),
];

static O_SHAPES: [ShapeMatrix; 1] = [ShapeMatrix::new(2, [0b11, 0b11, 0, 0])];

static T_SHAPES: [ShapeMatrix; 4] = [
    ShapeMatrix::new(3, [0b010, 0b111, 0b000, 0]),
    ShapeMatrix::new(3, [0b010, 0b011, 0b010, 0]),
    ShapeMatrix::new(3, [0b000, 0b111, 0b010, 0]),
    ShapeMatrix::new(3, [0b010, 0b110, 0b010, 0]),
];

static S_SHAPES: [ShapeMatrix; 2] = [
    ShapeMatrix::new(3, [0b011, 0b110, 0b000, 0]),
    ShapeMatrix::new(3, [0b010, 0b011, 0b001, 0]),
];

static Z_SHAPES: [ShapeMatrix; 2] = [
    ShapeMatrix::new(3, [0b110, 0b011, 0b000, 0]),
    ShapeMatrix::new(3, [0b001, 0b011, 0b010, 0]),
];

static J_SHAPES: [ShapeMatrix; 4] = [
    ShapeMatrix::new(3, [0b100, 0b111, 0b000, 0]),
    ShapeMatrix::new(3, [0b011, 0b010, 0b010, 0]),
    ShapeMatrix::new(3, [0b000, 0b111, 0b001, 0]),
    ShapeMatrix::new(3, [0b010, 0b010, 0b110, 0]),
];

static L_SHAPES: [ShapeMatrix; 4] = [
    ShapeMatrix::new(3, [0b001, 0b111, 0b000, 0]),
    ShapeMatrix::new(3, [0b010, 0b010, 0b011, 0]),
    ShapeMatrix::new(3, [0b000, 0b111, 0b100, 0]),
    ShapeMatrix::new(3, [0b110, 0b010, 0b010, 0]),
];

/// Rotation states for a piece kind, in clockwise order
pub fn shapes_for(kind: PieceKind) -> &'static [ShapeMatrix] {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    }
}

/// The falling piece: kind, rotation index and the matching shape.
///
/// Rotation produces a new value; an `ActivePiece` is never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: u8,
    pub shape: &'static ShapeMatrix,
}

impl ActivePiece {
    /// Piece in its first rotation state
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            shape: &shapes_for(kind)[0],
        }
    }

    /// Number of rotation states for this kind
    pub fn rotation_count(&self) -> u8 {
        shapes_for(self.kind).len() as u8
    }

    /// The next rotation state (wraps around)
    pub fn rotated(&self) -> Self {
        let shapes = shapes_for(self.kind);
        let rotation = (self.rotation as usize + 1) % shapes.len();
        Self {
            kind: self.kind,
            rotation: rotation as u8,
            shape: &shapes[rotation],
        }
    }
}

/// Where a freshly spawned piece of `kind` appears.
///
/// Horizontally centred; shifted up so the topmost filled row lands on
/// board row 0 (the I piece spawns at `y = -1`).
pub fn spawn_position(kind: PieceKind) -> Position {
    let shape = &shapes_for(kind)[0];
    let x = (BOARD_WIDTH - shape.size()) / 2;
    Position::new(x as i8, -(shape.top_row() as i8))
}
