use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::BOARD_WIDTH;

/// Enum representing the type of piece.
///
/// Discriminants are the piece ids stored in board cells (`1..=7`); `0` is
/// reserved for an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 1,
    /// O-piece.
    O = 2,
    /// T-piece.
    T = 3,
    /// L-piece.
    L = 4,
    /// J-piece.
    J = 5,
    /// S-piece.
    S = 6,
    /// Z-piece.
    Z = 7,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Returns the cell id of this piece kind (`1..=7`).
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Looks up a piece kind by its cell id.
    ///
    /// # Examples
    ///
    /// ```
    /// use duotris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_id(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_id(7), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_id(0), None);
    /// ```
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::L),
            5 => Some(PieceKind::J),
            6 => Some(PieceKind::S),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Returns the spawn orientation of this piece from the catalog.
    #[must_use]
    pub const fn shape(self) -> PieceShape {
        PIECE_CATALOG[self as usize - 1]
    }
}

/// Immutable bitmask of a piece in one orientation.
///
/// The mask is a `width × height` rectangle; bit `x` of `rows[y]` marks an
/// occupied cell. Rotating produces a new value, so rolling back a rejected
/// rotation is just keeping the old one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceShape {
    width: u8,
    height: u8,
    rows: [u8; 4],
}

impl PieceShape {
    const fn new(width: u8, height: u8, rows: [u8; 4]) -> Self {
        assert!(width as usize <= 4 && height as usize <= 4);
        Self {
            width,
            height,
            rows,
        }
    }

    #[must_use]
    pub const fn width(self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(self) -> usize {
        self.height as usize
    }

    #[must_use]
    pub const fn is_filled(self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && (self.rows[y] & (1 << x)) != 0
    }

    /// Returns the shape turned a quarter clockwise.
    ///
    /// Row `r` of the result is column `r` of `self` read bottom to top
    /// (transpose, then reverse each row).
    #[must_use]
    pub const fn rotated(self) -> Self {
        let mut rows = [0; 4];
        let mut r = 0;
        while r < self.width() {
            let mut c = 0;
            while c < self.height() {
                if self.is_filled(r, self.height() - 1 - c) {
                    rows[r] |= 1 << c;
                }
                c += 1;
            }
            r += 1;
        }
        Self::new(self.height, self.width, rows)
    }

    /// Iterates over occupied `(dx, dy)` offsets inside the bounding box.
    pub fn occupied_cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.height())
            .flat_map(move |y| (0..self.width()).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.is_filled(x, y))
    }
}

impl fmt::Debug for PieceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for y in 0..self.height() {
            let row: String = (0..self.width())
                .map(|x| if self.is_filled(x, y) { '#' } else { '.' })
                .collect();
            list.entry(&row);
        }
        list.finish()
    }
}

const PIECE_CATALOG: [PieceShape; PieceKind::LEN] = {
    const fn m(bits: [bool; 4]) -> u8 {
        let mut mask = 0;
        let mut i = 0;
        while i < 4 {
            if bits[i] {
                mask |= 1 << i;
            }
            i += 1;
        }
        mask
    }

    const C: bool = true;
    const E: bool = false;

    [
        // I-piece
        PieceShape::new(4, 1, [m([C, C, C, C]), 0, 0, 0]),
        // O-piece
        PieceShape::new(2, 2, [m([C, C, E, E]), m([C, C, E, E]), 0, 0]),
        // T-piece
        PieceShape::new(3, 2, [m([C, C, C, E]), m([E, C, E, E]), 0, 0]),
        // L-piece
        PieceShape::new(3, 2, [m([C, C, C, E]), m([C, E, E, E]), 0, 0]),
        // J-piece
        PieceShape::new(3, 2, [m([C, C, C, E]), m([E, E, C, E]), 0, 0]),
        // S-piece
        PieceShape::new(3, 2, [m([C, C, E, E]), m([E, C, C, E]), 0, 0]),
        // Z-piece
        PieceShape::new(3, 2, [m([E, C, C, E]), m([C, C, E, E]), 0, 0]),
    ]
};

/// The active piece: kind, current orientation and board offset.
///
/// `(x, y)` is the board cell under the top-left corner of the shape's
/// bounding box. Offsets are signed because a rotation may push the box past
/// the top or left edge; such a placement always collides and gets rejected.
/// Pieces are immutable - movement and rotation return new `Piece` values.
///
/// # Example
///
/// ```
/// use duotris_engine::{Piece, PieceKind};
///
/// let piece = Piece::spawn(PieceKind::I);
/// assert_eq!((piece.x(), piece.y()), (3, 0));
///
/// let upright = piece.rotated();
/// assert_eq!(upright.shape().height(), 4);
/// assert_eq!((upright.x(), upright.y()), (4, -1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: PieceShape,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece in spawn orientation, centered horizontally on row 0.
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = kind.shape();
        #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let x = ((BOARD_WIDTH - shape.width()) / 2) as i32;
        Self {
            kind,
            shape,
            x,
            y: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> PieceShape {
        self.shape
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns the board coordinates covered by this piece.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.occupied_cells().map(move |(dx, dy)| {
            #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let (dx, dy) = (dx as i32, dy as i32);
            (self.x + dx, self.y + dy)
        })
    }

    #[must_use]
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.shifted(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.shifted(1, 0)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.shifted(0, 1)
    }

    #[must_use]
    pub fn up(&self) -> Self {
        self.shifted(0, -1)
    }

    /// Returns the piece turned a quarter clockwise.
    ///
    /// The I-piece pivots around its second cell instead of the bounding box
    /// corner: it moves by `(+1, -1)` when leaving the horizontal orientation
    /// and by `(-1, +1)` when returning to it.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let rotated = Self {
            shape: self.shape.rotated(),
            ..*self
        };
        match self.kind {
            PieceKind::I if self.shape.width() == 4 => rotated.shifted(1, -1),
            PieceKind::I => rotated.shifted(-1, 1),
            _ => rotated,
        }
    }
}
