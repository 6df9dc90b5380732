use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// The piece stream both players draw from.
///
/// Spawn index `n` always yields the same kind no matter which player reaches
/// it first, so both boards face an identical sequence. Kinds are drawn
/// uniformly on first access and cached for the lifetime of the sequence.
///
/// # Example
///
/// ```
/// use duotris_engine::PieceSequence;
///
/// let mut sequence = PieceSequence::new();
///
/// let first = sequence.get(5);
/// assert_eq!(sequence.get(5), first);
/// ```
#[derive(Debug, Clone)]
pub struct PieceSequence {
    rng: Pcg32,
    kinds: Vec<PieceKind>,
}

impl Default for PieceSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceSequence {
    /// Creates an empty sequence with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible stream.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            kinds: Vec::new(),
        }
    }

    /// Sequence whose first kinds are `kinds`; later indices are random.
    #[cfg(test)]
    pub(crate) fn from_kinds(kinds: &[PieceKind]) -> Self {
        let mut sequence = Self::with_seed(PieceSeed([0; 16]));
        sequence.kinds.extend_from_slice(kinds);
        sequence
    }

    /// Returns the piece kind at `index`, generating it on first access.
    ///
    /// Indices are filled in order, so asking for `index` also fixes every
    /// kind before it.
    pub fn get(&mut self, index: usize) -> PieceKind {
        while self.kinds.len() <= index {
            let kind = self.rng.random();
            self.kinds.push(kind);
        }
        self.kinds[index]
    }

    /// Number of kinds generated so far.
    #[must_use]
    pub fn generated_len(&self) -> usize {
        self.kinds.len()
    }

    /// Forgets every generated kind and continues with a fresh stream.
    ///
    /// The new seed is drawn from the current generator, so a seeded sequence
    /// stays reproducible across reshuffles.
    pub fn reshuffle(&mut self) {
        let seed: PieceSeed = self.rng.random();
        *self = Self::with_seed(seed);
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed, written as 32 hex digits. Two sequences created from the
/// same seed yield the same kinds.
///
/// # Example
///
/// ```
/// use duotris_engine::{PieceSeed, PieceSequence};
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut a = PieceSequence::with_seed(seed);
/// let mut b = PieceSequence::with_seed(seed);
///
/// assert_eq!(a.get(10), b.get(10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed {input:?}: expected 32 hex digits")]
pub struct ParsePieceSeedError {
    #[error(not(source))]
    input: String,
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePieceSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}
