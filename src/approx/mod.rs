//! Randomized hash-bucket search.
//!
//! The fallback engine for pools where branch-and-bound pruning is not
//! enough: each trial draws a random many-to-few map from attribute bits to
//! K = 10 buckets, compresses every bitset into a 10-bit code, aggregates
//! per-code per-role bests, propagates role-2 bests over the subset
//! lattice, and probes a precomputed list of disjoint code partitions.
//! Monte-Carlo only — it reports improvements, never certificates.

mod runner;
mod table;

pub(crate) use runner::ApproxEngine;
