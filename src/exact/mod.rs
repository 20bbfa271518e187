//! Exact branch-and-bound search.
//!
//! Walks the role-0 and role-1 orders descending with provably-maximal
//! upper bounds, tests compatibility 8 candidates per step, and exploits
//! the role-2 layout so the first compatible third candidate found for a
//! pair is score-maximal. Completion within the work budget certifies the
//! global optimum; exhaustion hands the incumbent to the approximate
//! engine.

mod runner;

pub(crate) use runner::{ExactEngine, ExactOutcome};
