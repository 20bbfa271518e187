//! Randomized trial loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::table::{code_triples, BucketTable, BUCKETS};
use crate::batch::LANES;
use crate::config::SolverConfig;
use crate::problem::{Incumbent, Instance, NUM_ROLES};

/// Width of a compatibility bitset, and so of a bucket assignment.
const ATTRIBUTE_BITS: usize = 32;

/// One randomized hash-bucket run over the original (caller-indexed) pool.
pub(crate) struct ApproxEngine<'a> {
    instance: &'a Instance<'a>,
    trials: usize,
    rng: StdRng,
}

impl<'a> ApproxEngine<'a> {
    pub(crate) fn new(instance: &'a Instance<'a>, config: &SolverConfig) -> Self {
        Self {
            instance,
            trials: config.trials,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Runs all trials, updating `incumbent` on every strict improvement.
    ///
    /// Indices written to the incumbent are the caller's: no reconciliation
    /// is needed afterwards.
    pub(crate) fn run(&mut self, incumbent: &mut Incumbent) {
        let instance = self.instance;
        let n = instance.len();
        if n < 3 {
            return;
        }

        // No trial can improve when even the unconstrained per-role maxima
        // fall short.
        let mut role_max = [0i32; NUM_ROLES];
        for i in 0..n {
            for (role, max) in role_max.iter_mut().enumerate() {
                *max = (*max).max(instance.score(role, i));
            }
        }
        if role_max.iter().sum::<i32>() <= incumbent.best {
            return;
        }

        let triples = code_triples();
        let mut table = BucketTable::new();
        let mut codes = vec![0u16; n];

        for _ in 0..self.trials {
            table.reset();

            // Fresh lossy compression: every attribute bit lands in one of
            // the K buckets.
            let bucket_bit: [u16; ATTRIBUTE_BITS] =
                std::array::from_fn(|_| 1 << self.rng.random_range(0..BUCKETS));
            for (i, code) in codes.iter_mut().enumerate() {
                *code = compress(instance.mask(i), &bucket_bit);
            }

            table.aggregate(instance, &codes);
            table.propagate();

            // Disjoint code groups approximate disjoint bitsets: probe
            // every retained partition, batch by batch.
            for chunk in triples.chunks_exact(LANES) {
                for &[g0, g1, g2] in chunk {
                    let a = table.slot(g0, 0);
                    let b = table.slot(g1, 1);
                    let c = table.slot(g2, 2);
                    incumbent.offer(a.score + b.score + c.score, [a.cand, b.cand, c.cand]);
                }
            }
        }
    }
}

/// ORs together the bucket bits of every set attribute bit.
#[inline]
fn compress(mut mask: u32, bucket_bit: &[u16; ATTRIBUTE_BITS]) -> u16 {
    let mut code = 0;
    while mask != 0 {
        code |= bucket_bit[mask.trailing_zeros() as usize];
        mask &= mask - 1;
    }
    code
}
