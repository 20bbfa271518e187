//! Maximum-score disjoint triple selection.
//!
//! Given a pool of up to 65536 candidates, each carrying a compatibility
//! bitset and one score per each of three roles, [`solve`] picks one
//! candidate per role so that the three bitsets are pairwise disjoint and
//! the score sum is maximal, never regressing below a caller-supplied
//! lower bound.
//!
//! # Architecture
//!
//! - **[`order`]**: per-role descending orderings; role-2's order becomes
//!   the primary memory layout and the inverse permutation restores the
//!   caller's indices.
//! - **[`batch`]**: 8-lane disjointness kernel — AVX2 where the CPU has
//!   it, a bit-identical scalar reference everywhere else.
//! - **Exact engine**: branch-and-bound over the sorted orders with
//!   batched compatibility tests; completing within its work budget
//!   certifies the global optimum.
//! - **Approximate engine**: when the budget runs out, randomized
//!   hash-bucket trials with subset-sum propagation take over — bounded
//!   runtime, no optimality certificate.
//!
//! Everything is single-threaded and in-memory; the only parallelism is
//! data-level batching, which must match the scalar kernels exactly.
//!
//! # Examples
//!
//! ```
//! use triad_solver::{solve, Instance, SolverConfig};
//!
//! let masks = [0b0001u32, 0b0010, 0b0100, 0b1000];
//! let scores = [
//!     10, 1, 1, // candidate 0: role 0, 1, 2
//!     1, 10, 1,
//!     1, 1, 10,
//!     1, 1, 1,
//! ];
//! let instance = Instance::new(&masks, &scores)?;
//! let report = solve(&instance, 0, &SolverConfig::default());
//! assert_eq!(report.best, 30);
//! assert_eq!(report.triple, Some([0, 1, 2]));
//! # Ok::<(), triad_solver::InstanceError>(())
//! ```

mod approx;
mod exact;

pub mod batch;
pub mod config;
pub mod order;
pub mod problem;
pub mod solver;

pub use config::SolverConfig;
pub use problem::{Instance, InstanceError, MAX_CANDIDATES, MAX_SCORE, NUM_ROLES};
pub use solver::{solve, Engine, SolveReport};
