//! Per-role descending orderings and the reindexing that keeps them
//! consistent once role-2's order becomes the primary memory layout.

use std::cmp::Reverse;

use crate::problem::{Instance, NUM_ROLES};

/// Sorted views of one candidate pool.
///
/// All fields except [`into_original`](Self::into_original) use *internal*
/// indices: positions in the role-2-descending layout. Laying the pool out
/// in role-2 order keeps the batched role-2 scans of the exact engine on
/// contiguous, monotone-score memory.
///
/// Tie-breaking among equal scores is unspecified.
#[derive(Debug, Clone)]
pub struct RoleOrders {
    /// Compatibility bitsets in role-2 layout.
    pub masks: Vec<u32>,

    /// Score columns in role-2 layout; `scores[2]` is descending.
    pub scores: [Vec<i32>; NUM_ROLES],

    /// Internal indices, descending by role-0 score.
    pub order0: Vec<u32>,

    /// Internal indices, descending by role-1 score.
    pub order1: Vec<u32>,

    /// `masks[order1[j]]`, gathered once so the middle loop of the exact
    /// engine can test 8 candidates per step from contiguous memory.
    pub masks_order1: Vec<u32>,

    /// Maps an internal index back to the caller's candidate index.
    pub into_original: Vec<u32>,
}

impl RoleOrders {
    /// Sorts and reindexes `instance`.
    pub fn build(instance: &Instance<'_>) -> Self {
        let n = instance.len();

        // Descending permutations in the caller's indexing.
        let mut orders: [Vec<u32>; NUM_ROLES] = std::array::from_fn(|role| {
            let mut order: Vec<u32> = (0..n as u32).collect();
            order.sort_unstable_by_key(|&i| Reverse(instance.score(role, i as usize)));
            order
        });

        // inverse[original] = position in role-2 order
        let mut inverse = vec![0u32; n];
        for (pos, &orig) in orders[2].iter().enumerate() {
            inverse[orig as usize] = pos as u32;
        }

        // Reindex masks and all score columns into role-2 layout.
        let masks: Vec<u32> = orders[2]
            .iter()
            .map(|&orig| instance.mask(orig as usize))
            .collect();
        let scores: [Vec<i32>; NUM_ROLES] = std::array::from_fn(|role| {
            orders[2]
                .iter()
                .map(|&orig| instance.score(role, orig as usize))
                .collect()
        });

        // Re-express role-0/role-1 orders as internal positions.
        for role in 0..2 {
            for slot in orders[role].iter_mut() {
                *slot = inverse[*slot as usize];
            }
        }

        let [order0, order1, into_original] = orders;
        let masks_order1: Vec<u32> = order1.iter().map(|&j| masks[j as usize]).collect();

        Self {
            masks,
            scores,
            order0,
            order1,
            masks_order1,
            into_original,
        }
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// True when the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Rewrites a triple of internal indices into the caller's indexing.
    pub fn reconcile(&self, triple: &mut [u32; NUM_ROLES]) {
        for slot in triple.iter_mut() {
            *slot = self.into_original[*slot as usize];
        }
    }
}
