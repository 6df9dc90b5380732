use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    piece::{Piece, PieceKind},
};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell (id `0`).
    #[default]
    Empty,
    /// Locked piece of a specific type (id `1..=7`).
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    /// Returns the cell id: `0` for empty, otherwise the piece id.
    #[must_use]
    pub fn id(self) -> u8 {
        match self {
            Block::Empty => 0,
            Block::Piece(kind) => kind.id(),
        }
    }
}

type Row = [Block; BOARD_WIDTH];

const EMPTY_ROW: Row = [Block::Empty; BOARD_WIDTH];

fn is_row_filled(row: &Row) -> bool {
    row.iter().all(|b| !b.is_empty())
}

/// The grid of locked cells, 20 rows of 10 columns.
///
/// Row 0 is the top. The dimensions never change; clearing a row shifts
/// everything above it down and inserts an empty row at the top.
///
/// # Example
///
/// ```
/// use duotris_engine::{Board, Piece, PieceKind};
///
/// let mut board = Board::EMPTY;
/// let piece = Piece::spawn(PieceKind::O);
/// assert!(!board.is_colliding(&piece));
///
/// board.fill_piece(&piece);
/// assert!(board.is_colliding(&piece));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    pub fn rows(&self) -> impl Iterator<Item = &[Block; BOARD_WIDTH]> {
        self.rows.iter()
    }

    /// Returns the cell at `(x, y)`, or `None` outside the board.
    #[must_use]
    pub fn block_at(&self, x: i32, y: i32) -> Option<Block> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.get(x).copied()
    }

    #[cfg(test)]
    pub(crate) fn fill_block_at(&mut self, x: usize, y: usize, block: Block) {
        self.rows[y][x] = block;
    }

    /// Checks whether `piece` may stand where it is.
    ///
    /// A placement collides when any occupied cell of the piece lies outside
    /// the board (left, right, above the top or below the bottom) or overlaps a
    /// locked cell. Every move, rotation, spawn and drop is validated here.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        piece
            .occupied_positions()
            .any(|(x, y)| self.block_at(x, y).is_none_or(|b| !b.is_empty()))
    }

    /// Writes the piece's kind into every cell it covers.
    ///
    /// Cells outside the board are skipped.
    pub fn fill_piece(&mut self, piece: &Piece) {
        let block = Block::Piece(piece.kind());
        for (x, y) in piece.occupied_positions() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                *cell = block;
            }
        }
    }

    /// Removes filled rows and returns how many were removed.
    ///
    /// Rows are scanned bottom to top. A filled row is dropped, the rows above
    /// it shift down by one and an empty row appears at the top; the same row
    /// index is then examined again.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        let mut y = BOARD_HEIGHT;
        while y > 0 {
            if is_row_filled(&self.rows[y - 1]) {
                self.rows[..y].rotate_right(1);
                self.rows[0] = EMPTY_ROW;
                count += 1;
            } else {
                y -= 1;
            }
        }
        count
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    /// Builds a board from the bottom rows up; `#` is a locked cell.
    pub(crate) fn board_from_bottom(rows: &[&str]) -> Board {
        let mut board = Board::EMPTY;
        let top = BOARD_HEIGHT - rows.len();
        for (dy, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    board.fill_block_at(x, top + dy, Block::Piece(PieceKind::O));
                }
            }
        }
        board
    }

    #[test]
    fn test_block_ids() {
        assert_eq!(Block::Empty.id(), 0);
        assert_eq!(Block::Piece(PieceKind::I).id(), 1);
        assert_eq!(Block::Piece(PieceKind::Z).id(), 7);
    }

    #[test]
    fn test_empty_board() {
        let board = Board::EMPTY;
        assert_eq!(board.rows().count(), Board::HEIGHT);
        assert!(board.rows().flatten().all(|b| b.is_empty()));
    }

    #[test]
    fn test_collision_with_walls() {
        let board = Board::EMPTY;
        let piece = Piece::spawn(PieceKind::I);

        assert!(!board.is_colliding(&piece.shifted(-3, 0)));
        assert!(board.is_colliding(&piece.shifted(-4, 0)));
        assert!(!board.is_colliding(&piece.shifted(3, 0)));
        assert!(board.is_colliding(&piece.shifted(4, 0)));
        assert!(!board.is_colliding(&piece.shifted(0, 19)));
        assert!(board.is_colliding(&piece.shifted(0, 20)));
        assert!(board.is_colliding(&piece.up()));
    }

    #[test]
    fn test_collision_with_locked_cells() {
        let board = board_from_bottom(&["....#....."]);
        let piece = Piece::spawn(PieceKind::O).shifted(0, 17);
        assert!(!board.is_colliding(&piece));
        assert!(board.is_colliding(&piece.down()));
    }

    #[test]
    fn test_collision_matches_cellwise_definition() {
        let mut rng = Pcg32::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let mut board = Board::EMPTY;
            for y in 0..BOARD_HEIGHT {
                for x in 0..BOARD_WIDTH {
                    if rng.random_bool(0.3) {
                        board.fill_block_at(x, y, Block::Piece(rng.random()));
                    }
                }
            }
            let mut piece = Piece::spawn(rng.random());
            for _ in 0..rng.random_range(0..4) {
                piece = piece.rotated();
            }
            let piece = piece.shifted(rng.random_range(-5..8), rng.random_range(-3..22));

            let expected = piece.occupied_positions().any(|(x, y)| {
                !(0..10).contains(&x)
                    || !(0..20).contains(&y)
                    || !board.rows[usize::try_from(y).unwrap()][usize::try_from(x).unwrap()]
                        .is_empty()
            });
            assert_eq!(board.is_colliding(&piece), expected, "{piece:?}");
        }
    }

    #[test]
    fn test_fill_piece_writes_kind() {
        let mut board = Board::EMPTY;
        let piece = Piece::spawn(PieceKind::T).shifted(0, 18);
        board.fill_piece(&piece);

        assert_eq!(board.block_at(3, 18), Some(Block::Piece(PieceKind::T)));
        assert_eq!(board.block_at(4, 18), Some(Block::Piece(PieceKind::T)));
        assert_eq!(board.block_at(5, 18), Some(Block::Piece(PieceKind::T)));
        assert_eq!(board.block_at(4, 19), Some(Block::Piece(PieceKind::T)));
        assert_eq!(board.block_at(3, 19), Some(Block::Empty));
    }

    #[test]
    fn test_fill_piece_clips_to_board() {
        let mut board = Board::EMPTY;
        let piece = Piece::spawn(PieceKind::I).rotated(); // spans y = -1..=2
        board.fill_piece(&piece);
        let filled = board.rows().flatten().filter(|b| !b.is_empty()).count();
        assert_eq!(filled, 3);
    }

    #[test]
    fn test_clear_lines_without_full_rows() {
        let mut board = board_from_bottom(&["#.#.#.#.#.", "#########."]);
        let before = board.clone();
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_lines_bottom_row() {
        let mut board = board_from_bottom(&["#.........", "##########"]);
        assert_eq!(board.clear_lines(), 1);
        assert_eq!(board, board_from_bottom(&["#........."]));
        assert!(board.rows[0].iter().all(|b| b.is_empty()));
    }

    #[test]
    fn test_clear_lines_adjacent_rows_rechecked() {
        let mut board = board_from_bottom(&[
            "...#......",
            "##########",
            "##########",
            "#.#.......",
            "##########",
        ]);
        assert_eq!(board.clear_lines(), 3);
        assert_eq!(board, board_from_bottom(&["...#......", "#.#......."]));
    }

    #[test]
    fn test_clear_lines_four_rows() {
        let mut board = board_from_bottom(&[
            "##########",
            "##########",
            "##########",
            "##########",
        ]);
        assert_eq!(board.clear_lines(), 4);
        assert_eq!(board, Board::EMPTY);
    }
}
