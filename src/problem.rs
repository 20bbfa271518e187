//! Candidate pool representation and input validation.

use thiserror::Error;

/// Hard cap on the candidate pool size.
pub const MAX_CANDIDATES: usize = 1 << 16;

/// Number of independent scoring roles.
pub const NUM_ROLES: usize = 3;

/// Largest admissible single score.
///
/// Bounded so that any sum of three scores fits `i32` without overflow;
/// the bound-based pruning in the exact engine relies on exact sums.
pub const MAX_SCORE: i32 = i32::MAX / NUM_ROLES as i32;

/// Rejected input, detected at [`Instance::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    /// More than [`MAX_CANDIDATES`] candidates.
    #[error("candidate pool holds {0} entries, maximum is {max}", max = MAX_CANDIDATES)]
    PoolTooLarge(usize),

    /// Score table length is not three entries per candidate.
    #[error("score table holds {got} entries, expected {expected} (3 per candidate)")]
    ScoreTableMismatch { got: usize, expected: usize },

    /// A score is negative or large enough that a 3-sum could overflow.
    #[error(
        "score {value} for candidate {candidate}, role {role} is outside 0..={max}",
        max = MAX_SCORE
    )]
    ScoreOutOfRange {
        candidate: usize,
        role: usize,
        value: i32,
    },
}

/// Read-only view over the caller's candidate pool.
///
/// Each candidate carries a compatibility bitset (any shared bit between
/// two candidates' bitsets marks them mutually incompatible) and one score
/// per role, interleaved `[role0, role1, role2]` per candidate.
///
/// A candidate with an all-zero bitset is disjoint from itself and may be
/// assigned to more than one role; supply nonzero bitsets when the three
/// selected candidates must be distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instance<'a> {
    masks: &'a [u32],
    scores: &'a [i32],
}

impl<'a> Instance<'a> {
    /// Validates and wraps the caller's arrays.
    ///
    /// `masks` holds one bitset per candidate, `scores` holds `3 * n`
    /// entries interleaved per candidate. Every score must lie in
    /// `0..=MAX_SCORE`.
    pub fn new(masks: &'a [u32], scores: &'a [i32]) -> Result<Self, InstanceError> {
        if masks.len() > MAX_CANDIDATES {
            return Err(InstanceError::PoolTooLarge(masks.len()));
        }
        let expected = masks.len() * NUM_ROLES;
        if scores.len() != expected {
            return Err(InstanceError::ScoreTableMismatch {
                got: scores.len(),
                expected,
            });
        }
        for (pos, &value) in scores.iter().enumerate() {
            if !(0..=MAX_SCORE).contains(&value) {
                return Err(InstanceError::ScoreOutOfRange {
                    candidate: pos / NUM_ROLES,
                    role: pos % NUM_ROLES,
                    value,
                });
            }
        }
        Ok(Self { masks, scores })
    }

    /// Number of candidates in the pool.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// True when the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Compatibility bitset of candidate `i`.
    #[inline]
    pub fn mask(&self, i: usize) -> u32 {
        self.masks[i]
    }

    /// All bitsets, in candidate order.
    #[inline]
    pub fn masks(&self) -> &'a [u32] {
        self.masks
    }

    /// Score of candidate `i` for `role`.
    #[inline]
    pub fn score(&self, role: usize, i: usize) -> i32 {
        self.scores[i * NUM_ROLES + role]
    }
}

/// Best value and winning triple found so far.
///
/// Threaded through both engines within a single call; `best` never
/// decreases, and `triple` is `Some` only once an improvement over the
/// caller's lower bound exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incumbent {
    /// Best total found so far; starts at the caller's lower bound.
    pub best: i32,

    /// Winning candidate index per role, once an improvement exists.
    pub triple: Option<[u32; NUM_ROLES]>,
}

impl Incumbent {
    /// Starts from the caller's lower bound with no triple.
    pub fn new(lower_bound: i32) -> Self {
        Self {
            best: lower_bound,
            triple: None,
        }
    }

    /// Records `(value, triple)` when it strictly improves on `best`.
    #[inline]
    pub fn offer(&mut self, value: i32, triple: [u32; NUM_ROLES]) -> bool {
        if value > self.best {
            self.best = value;
            self.triple = Some(triple);
            true
        } else {
            false
        }
    }
}
