//! Entry point: sort, search exactly, fall back, reconcile.

use crate::approx::ApproxEngine;
use crate::config::SolverConfig;
use crate::exact::{ExactEngine, ExactOutcome};
use crate::order::RoleOrders;
use crate::problem::{Incumbent, Instance, NUM_ROLES};

/// Which engine produced the final answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Branch-and-bound finished within its work budget: the result is the
    /// true global optimum and any reported triple is pairwise disjoint.
    Exact,
    /// The randomized fallback ran: the result is a Monte-Carlo
    /// approximation, an improvement over the lower bound at best, with no
    /// optimality or disjointness certificate.
    Approximate,
}

/// Outcome of one [`solve`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    /// Best total found; always `>=` the caller's lower bound.
    pub best: i32,

    /// Winning candidate index per role, in the caller's numbering.
    ///
    /// `Some` exactly when an improvement over the lower bound was found.
    pub triple: Option<[u32; NUM_ROLES]>,

    /// Engine that produced `best`.
    pub engine: Engine,
}

/// Finds a maximum-score pairwise-disjoint triple, one candidate per role,
/// never regressing below `lower_bound`.
///
/// Runs the exact branch-and-bound engine first; if its work budget runs
/// out, the randomized hash-bucket engine continues from the best triple
/// found so far. Pools with fewer than three candidates return the lower
/// bound unchanged.
///
/// # Panics
///
/// Panics when `config` fails [`SolverConfig::validate`].
pub fn solve(instance: &Instance<'_>, lower_bound: i32, config: &SolverConfig) -> SolveReport {
    config.validate().expect("invalid SolverConfig");

    let mut incumbent = Incumbent::new(lower_bound);
    if instance.len() < 3 {
        return SolveReport {
            best: incumbent.best,
            triple: None,
            engine: Engine::Exact,
        };
    }

    let orders = RoleOrders::build(instance);
    let outcome = ExactEngine::new(&orders, config.work_budget).run(&mut incumbent);

    // From here on every index is in the caller's numbering.
    if let Some(triple) = &mut incumbent.triple {
        orders.reconcile(triple);
    }

    let engine = match outcome {
        ExactOutcome::Complete => Engine::Exact,
        ExactOutcome::OutOfBudget => {
            ApproxEngine::new(instance, config).run(&mut incumbent);
            Engine::Approximate
        }
    };

    SolveReport {
        best: incumbent.best,
        triple: incumbent.triple,
        engine,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn brute_force(masks: &[u32], scores: &[i32], lower_bound: i32) -> i32 {
        let inst = Instance::new(masks, scores).unwrap();
        let n = masks.len();
        let mut best = lower_bound;
        for a in 0..n {
            for b in 0..n {
                for c in 0..n {
                    if masks[a] & masks[b] == 0
                        && masks[a] & masks[c] == 0
                        && masks[b] & masks[c] == 0
                    {
                        best = best.max(inst.score(0, a) + inst.score(1, b) + inst.score(2, c));
                    }
                }
            }
        }
        best
    }

    fn random_pool(rng: &mut StdRng, n: usize, bits: u32) -> (Vec<u32>, Vec<i32>) {
        let masks = (0..n)
            .map(|_| {
                let mut m = 0u32;
                for _ in 0..2 {
                    m |= 1 << rng.random_range(0..bits);
                }
                m
            })
            .collect();
        let scores = (0..3 * n).map(|_| rng.random_range(1..1000)).collect();
        (masks, scores)
    }

    #[test]
    fn test_worked_example_disjoint() {
        let masks = [1u32, 2, 4, 8];
        #[rustfmt::skip]
        let scores = [
            10, 1, 1,
            1, 10, 1,
            1, 1, 10,
            1, 1, 1,
        ];
        let inst = Instance::new(&masks, &scores).unwrap();
        let report = solve(&inst, 0, &SolverConfig::default());
        assert_eq!(report.best, 30);
        assert_eq!(report.triple, Some([0, 1, 2]));
        assert_eq!(report.engine, Engine::Exact);
    }

    #[test]
    fn test_worked_example_overlapping() {
        let masks = [1u32, 1, 1];
        let scores = [9, 9, 9, 9, 9, 9, 9, 9, 9];
        let inst = Instance::new(&masks, &scores).unwrap();
        let report = solve(&inst, 7, &SolverConfig::default());
        assert_eq!(report.best, 7);
        assert_eq!(report.triple, None);
        assert_eq!(report.engine, Engine::Exact);
    }

    #[test]
    fn test_pool_smaller_than_a_triple() {
        for n in 0..3usize {
            let masks = vec![1u32; n];
            let scores = vec![100; 3 * n];
            let inst = Instance::new(&masks, &scores).unwrap();
            let report = solve(&inst, -5, &SolverConfig::default());
            assert_eq!(report.best, -5, "n = {n}");
            assert_eq!(report.triple, None);
            assert_eq!(report.engine, Engine::Exact);
        }
    }

    #[test]
    fn test_exact_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(11);
        for round in 0..15 {
            let n = rng.random_range(3..50);
            let (masks, scores) = random_pool(&mut rng, n, 10);
            let lower_bound = rng.random_range(0..1500);

            let inst = Instance::new(&masks, &scores).unwrap();
            let report = solve(&inst, lower_bound, &SolverConfig::default());
            assert_eq!(report.engine, Engine::Exact);
            assert_eq!(
                report.best,
                brute_force(&masks, &scores, lower_bound),
                "round {round}, n {n}"
            );
        }
    }

    #[test]
    fn test_forced_fallback_never_beats_exact() {
        let mut rng = StdRng::seed_from_u64(21);
        let (masks, scores) = random_pool(&mut rng, 2000, 16);
        let inst = Instance::new(&masks, &scores).unwrap();

        let exact = solve(&inst, 0, &SolverConfig::default());
        assert_eq!(exact.engine, Engine::Exact);

        let config = SolverConfig::default()
            .with_work_budget(0)
            .with_trials(30)
            .with_seed(5);
        let fallback = solve(&inst, 0, &config);
        assert_eq!(fallback.engine, Engine::Approximate);
        assert!(
            fallback.best <= exact.best,
            "approximate {} exceeds certified optimum {}",
            fallback.best,
            exact.best
        );
        assert!(fallback.best >= 0);
    }

    #[test]
    fn test_forced_fallback_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(31);
        let (masks, scores) = random_pool(&mut rng, 256, 12);
        let inst = Instance::new(&masks, &scores).unwrap();
        let config = SolverConfig::default()
            .with_work_budget(0)
            .with_trials(40)
            .with_seed(8);

        let first = solve(&inst, 0, &config);
        let second = solve(&inst, 0, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_fallback_carries_partial_exact_result() {
        // A budget of one batch lets the exact engine record at most one
        // improvement before the hand-off; the final value must still be
        // at least that improvement.
        let mut rng = StdRng::seed_from_u64(41);
        let (masks, scores) = random_pool(&mut rng, 64, 12);
        let inst = Instance::new(&masks, &scores).unwrap();
        let config = SolverConfig::default()
            .with_work_budget(1)
            .with_trials(1)
            .with_seed(2);

        let report = solve(&inst, 0, &config);
        assert_eq!(report.engine, Engine::Approximate);
        assert!(report.best >= 0);
        if let Some(triple) = report.triple {
            assert!(triple.iter().all(|&i| (i as usize) < 64));
        }
    }

    #[test]
    #[should_panic(expected = "invalid SolverConfig")]
    fn test_invalid_config_panics() {
        let inst = Instance::new(&[], &[]).unwrap();
        solve(&inst, 0, &SolverConfig::default().with_trials(0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_exact_contract(
            pool in prop::collection::vec((1u32..1 << 10, 0i32..1000, 0i32..1000, 0i32..1000), 0..28),
            lower_bound in 0i32..2500,
        ) {
            let masks: Vec<u32> = pool.iter().map(|e| e.0).collect();
            let scores: Vec<i32> = pool.iter().flat_map(|e| [e.1, e.2, e.3]).collect();
            let inst = Instance::new(&masks, &scores).unwrap();
            let report = solve(&inst, lower_bound, &SolverConfig::default());

            // Never regresses, and the default budget always certifies at
            // this size.
            prop_assert!(report.best >= lower_bound);
            prop_assert_eq!(report.engine, Engine::Exact);
            prop_assert_eq!(report.best, brute_force(&masks, &scores, lower_bound));

            match report.triple {
                None => prop_assert_eq!(report.best, lower_bound),
                Some([a, b, c]) => {
                    prop_assert!(report.best > lower_bound);
                    let (a, b, c) = (a as usize, b as usize, c as usize);
                    prop_assert!(a < masks.len() && b < masks.len() && c < masks.len());
                    prop_assert_eq!(
                        report.best,
                        inst.score(0, a) + inst.score(1, b) + inst.score(2, c)
                    );
                    // Exact triples are pairwise disjoint.
                    prop_assert_eq!(masks[a] & masks[b], 0);
                    prop_assert_eq!(masks[a] & masks[c], 0);
                    prop_assert_eq!(masks[b] & masks[c], 0);
                }
            }
        }
    }
}
