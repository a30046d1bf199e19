use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// How upcoming pieces are drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceDistribution {
    /// Every piece is drawn independently and uniformly from the 7 kinds.
    #[default]
    Uniform,
    /// Pieces come from shuffled bags holding one of each kind.
    SevenBag,
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator. Using the same seed produces the same sequence of pieces, which
/// makes search results reproducible in tests and trial runs.
///
/// # Example
///
/// ```
/// use tetrastar_engine::{PieceDistribution, PieceGenerator, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
///
/// let mut a = PieceGenerator::with_seed(seed, PieceDistribution::Uniform);
/// let mut b = PieceGenerator::with_seed(seed, PieceDistribution::Uniform);
/// assert_eq!(a.take_kinds(10), b.take_kinds(10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex: expected 32 hex characters, got {input:?}")]
pub struct ParseSeedError {
    #[error(not(source))]
    input: String,
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = u128::from_be_bytes(self.0);
        write!(f, "{num:032x}")
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

/// Seedable stream of piece kinds.
///
/// The planner uses one generator per game. Each search gets its own
/// generator through [`Self::split`], so sibling branches never share
/// random state with the game that spawned them.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
    distribution: PieceDistribution,
    bag: VecDeque<PieceKind>,
}

impl PieceGenerator {
    /// Creates a generator with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed, distribution: PieceDistribution) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            distribution,
            bag: VecDeque::with_capacity(PieceKind::LEN),
        }
    }

    /// Draws the next piece kind.
    pub fn next_kind(&mut self) -> PieceKind {
        match self.distribution {
            PieceDistribution::Uniform => self.rng.random(),
            PieceDistribution::SevenBag => {
                if self.bag.is_empty() {
                    let mut new_bag = PieceKind::ALL;
                    new_bag.shuffle(&mut self.rng);
                    self.bag.extend(new_bag);
                }
                self.bag
                    .pop_front()
                    .expect("Piece bag should never be empty after refill")
            }
        }
    }

    /// Draws `count` piece kinds.
    pub fn take_kinds(&mut self, count: usize) -> Vec<PieceKind> {
        (0..count).map(|_| self.next_kind()).collect()
    }

    /// Draws a seed from this generator's stream.
    pub fn next_seed(&mut self) -> PieceSeed {
        self.rng.random()
    }

    /// Derives an independent generator from this one's stream.
    ///
    /// Splitting is deterministic: two generators with the same seed split into
    /// children that produce the same sequences.
    #[must_use]
    pub fn split(&mut self) -> Self {
        Self::with_seed(self.next_seed(), self.distribution)
    }
}
