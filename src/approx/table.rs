//! Per-code best tables and the code-partition enumeration.

use crate::batch::LANES;
use crate::problem::{Instance, NUM_ROLES};

/// Number of hash buckets (K); codes are K-bit integers.
pub(crate) const BUCKETS: usize = 10;

/// Number of distinct codes.
pub(crate) const CODES: usize = 1 << BUCKETS;

/// Largest role-0/role-1 group popcount retained by [`code_triples`].
///
/// Partitions that hand more buckets to the first two roles than a single
/// candidate's bitset can occupy never match an aggregated code, so they
/// are dropped up front.
pub(crate) const GROUP_LIMIT: u32 = 5;

/// Best score and originating candidate recorded for one (code, role).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    pub score: i32,
    pub cand: u32,
}

impl Slot {
    pub(crate) const EMPTY: Slot = Slot { score: 0, cand: 0 };
}

/// Per-code, per-role aggregation table for one trial.
///
/// Allocated once and reset between trials.
pub(crate) struct BucketTable {
    slots: Vec<[Slot; NUM_ROLES]>,
}

impl BucketTable {
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![[Slot::EMPTY; NUM_ROLES]; CODES],
        }
    }

    pub(crate) fn reset(&mut self) {
        self.slots.fill([Slot::EMPTY; NUM_ROLES]);
    }

    #[inline]
    pub(crate) fn slot(&self, code: u16, role: usize) -> Slot {
        self.slots[code as usize][role]
    }

    /// Records every candidate's scores at its hashed code.
    ///
    /// `codes[i]` is candidate `i`'s code under the current trial's bucket
    /// assignment. Ties take the later candidate.
    pub(crate) fn aggregate(&mut self, instance: &Instance<'_>, codes: &[u16]) {
        for (i, &code) in codes.iter().enumerate() {
            let slots = &mut self.slots[code as usize];
            for (role, slot) in slots.iter_mut().enumerate() {
                let score = instance.score(role, i);
                if score >= slot.score {
                    *slot = Slot {
                        score,
                        cand: i as u32,
                    };
                }
            }
        }
    }

    /// Subset-sum propagation for role 2.
    ///
    /// Pushes each code's role-2 best into its one-bit supersets in
    /// ascending code order, which closes the whole lattice: afterwards a
    /// query at code `c` sees the best role-2 candidate whose code is any
    /// subset of `c`. Roles 0 and 1 are instead queried at exact group
    /// codes, which the popcount filter in [`code_triples`] keeps complete.
    pub(crate) fn propagate(&mut self) {
        for code in 0..CODES {
            let from = self.slots[code][2];
            for bit in 0..BUCKETS {
                if code & (1 << bit) == 0 {
                    let sup = code | (1 << bit);
                    if from.score > self.slots[sup][2].score {
                        self.slots[sup][2] = from;
                    }
                }
            }
        }
    }
}

/// Enumerates every assignment of the K bucket positions into 3 role
/// groups, keeping those whose role-0 and role-1 groups each hold at most
/// [`GROUP_LIMIT`] buckets, padded (by repeating the last entry) to a
/// multiple of the batch width.
pub(crate) fn code_triples() -> Vec<[u16; NUM_ROLES]> {
    let mut triples = Vec::new();
    let total = 3usize.pow(BUCKETS as u32);
    for assignment in 0..total {
        let mut groups = [0u16; NUM_ROLES];
        let mut rest = assignment;
        for bit in 0..BUCKETS {
            groups[rest % 3] |= 1 << bit;
            rest /= 3;
        }
        if groups[0].count_ones() <= GROUP_LIMIT && groups[1].count_ones() <= GROUP_LIMIT {
            triples.push(groups);
        }
    }
    // The all-to-role-2 assignment always survives the filter.
    let last = *triples.last().expect("partition list is never empty");
    while triples.len() % LANES != 0 {
        triples.push(last);
    }
    triples
}
