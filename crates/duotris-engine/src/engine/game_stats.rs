/// Points for the first line of a clear; the k-th line of the same clear is
/// worth `k` times this.
const LINE_SCORE: usize = 100;

/// Points awarded for clearing `lines` rows in one lock.
///
/// Each row is worth more than the previous one within the same clear:
/// `100 × 1 + 100 × 2 + … + 100 × lines`.
///
/// ```
/// use duotris_engine::line_clear_score;
///
/// assert_eq!(line_clear_score(1), 100);
/// assert_eq!(line_clear_score(4), 1000);
/// ```
#[must_use]
pub const fn line_clear_score(lines: usize) -> usize {
    LINE_SCORE * lines * (lines + 1) / 2
}

/// Per-player statistics: score, locked pieces and cleared lines.
///
/// # Example
///
/// ```
/// use duotris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(2);
///
/// assert_eq!(stats.score(), 300);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Histogram of locks by number of lines cleared (index 0..=4).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records a locked piece and returns the points it earned.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        let gained = line_clear_score(cleared_lines);
        self.score += gained;
        gained
    }
}
