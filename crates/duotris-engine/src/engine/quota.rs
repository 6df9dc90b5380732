/// Line clears still required to finish a level, bucketed by clear size.
///
/// Bucket `n` (1..=4) counts the remaining clears of exactly `n` lines. A
/// player wins the level once every bucket is zero.
///
/// # Example
///
/// ```
/// use duotris_engine::Quota;
///
/// let mut quota = Quota::for_level(4);
/// assert_eq!(quota.buckets(), [13, 3, 1, 1]);
///
/// quota.credit(4);
/// assert_eq!(quota.buckets(), [13, 3, 1, 0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    remaining: [u32; Quota::MAX_CLEAR],
}

impl Quota {
    /// Largest clear size tracked by the quota.
    pub const MAX_CLEAR: usize = 4;

    /// Returns the quota a player has to meet on `level`.
    ///
    /// Singles start at 10 and doubles at 0, each growing by one per level;
    /// triples are `level / 3` and tetrises `level / 4`.
    #[must_use]
    pub const fn for_level(level: u32) -> Self {
        let above_first = level.saturating_sub(1);
        Self {
            remaining: [10 + above_first, above_first, level / 3, level / 4],
        }
    }

    #[must_use]
    pub const fn from_buckets(remaining: [u32; Self::MAX_CLEAR]) -> Self {
        Self { remaining }
    }

    /// Remaining counts for clears of 1, 2, 3 and 4 lines.
    #[must_use]
    pub const fn buckets(&self) -> [u32; Self::MAX_CLEAR] {
        self.remaining
    }

    /// Remaining count for clears of `size` lines (`1..=4`).
    #[must_use]
    pub fn remaining(&self, size: usize) -> u32 {
        size.checked_sub(1)
            .and_then(|i| self.remaining.get(i))
            .copied()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.remaining.iter().all(|&n| n == 0)
    }

    /// Credits a clear of `lines` lines and returns how many lines counted.
    ///
    /// Allocation is greedy, largest bucket first: starting from
    /// `min(lines, 4)`, a bucket that still has quota and fits in the lines
    /// left is decremented (and tried again), otherwise the next smaller bucket
    /// is tried. Lines that fit no bucket are not credited.
    pub fn credit(&mut self, lines: usize) -> usize {
        let mut left = lines;
        let mut size = lines.min(Self::MAX_CLEAR);
        while left > 0 && size > 0 {
            if size <= left && self.remaining[size - 1] > 0 {
                self.remaining[size - 1] -= 1;
                left -= size;
            } else {
                size -= 1;
            }
        }
        lines - left
    }
}
