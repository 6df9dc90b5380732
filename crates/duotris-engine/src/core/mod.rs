//! Board and piece primitives.
//!
//! - [`PieceKind`] / [`PieceShape`] - the seven-piece catalog and immutable bitmask shapes
//! - [`Piece`] - the active piece with its orientation and board offset
//! - [`Board`] - the 20×10 grid of locked cells, collision checks and line clears

pub use self::{board::*, piece::*};

pub(crate) mod board;
pub(crate) mod piece;

pub(crate) const BOARD_WIDTH: usize = 10;
pub(crate) const BOARD_HEIGHT: usize = 20;
