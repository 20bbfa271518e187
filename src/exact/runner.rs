//! Branch-and-bound execution loop.

use crate::batch::{Kernel, LANES};
use crate::order::RoleOrders;
use crate::problem::Incumbent;

/// How an exact run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExactOutcome {
    /// Search space exhausted; the incumbent is the global optimum.
    Complete,
    /// Work budget exceeded; the incumbent holds the best triple seen so
    /// far and the approximate engine takes over.
    OutOfBudget,
}

/// Signals that the work budget ran out mid-scan.
struct BudgetExhausted;

/// One branch-and-bound run over a sorted pool.
///
/// All indices written to the incumbent are *internal* (role-2 layout);
/// the caller reconciles them afterwards.
pub(crate) struct ExactEngine<'a> {
    orders: &'a RoleOrders,
    kernel: Kernel,
    budget: u64,
    spent: u64,
}

impl<'a> ExactEngine<'a> {
    pub(crate) fn new(orders: &'a RoleOrders, budget: u64) -> Self {
        Self {
            orders,
            kernel: Kernel::detect(),
            budget,
            spent: 0,
        }
    }

    /// Runs the search, updating `incumbent` on every strict improvement.
    pub(crate) fn run(&mut self, incumbent: &mut Incumbent) -> ExactOutcome {
        let orders = self.orders;
        let n = orders.len();
        if n < 3 {
            return ExactOutcome::Complete;
        }

        let s0 = &orders.scores[0];
        let s1 = &orders.scores[1];
        // Largest remaining score per role; role-2's layout is descending,
        // so its maximum sits at position 0.
        let top1 = s1[orders.order1[0] as usize];
        let top2 = orders.scores[2][0];
        let batched = n - n % LANES;

        'outer: for &i in &orders.order0 {
            let i = i as usize;
            if s0[i] + top1 + top2 <= incumbent.best {
                // Every later i has a smaller role-0 score; nothing left
                // can beat the incumbent.
                break;
            }
            let mask_i = orders.masks[i];

            for (chunk, window) in orders.masks_order1.chunks_exact(LANES).enumerate() {
                let mut hits = self.kernel.disjoint_mask8(mask_i, window);
                while hits != 0 {
                    let lane = hits.trailing_zeros() as usize;
                    hits &= hits - 1;
                    let j = orders.order1[chunk * LANES + lane] as usize;
                    if s0[i] + s1[j] + top2 <= incumbent.best {
                        continue 'outer;
                    }
                    match self.scan_third(i, j, incumbent) {
                        Ok(()) => {}
                        Err(BudgetExhausted) => return ExactOutcome::OutOfBudget,
                    }
                }
            }

            for jj in batched..n {
                if mask_i & orders.masks_order1[jj] != 0 {
                    continue;
                }
                let j = orders.order1[jj] as usize;
                if s0[i] + s1[j] + top2 <= incumbent.best {
                    continue 'outer;
                }
                match self.scan_third(i, j, incumbent) {
                    Ok(()) => {}
                    Err(BudgetExhausted) => return ExactOutcome::OutOfBudget,
                }
            }
        }

        ExactOutcome::Complete
    }

    /// Scans the role-2 layout for the best third candidate of `(i, j)`.
    ///
    /// Because the layout is descending by role-2 score, the first
    /// compatible candidate is score-maximal for the pair, so the scan
    /// stops at the first hit or at the batch-level bound.
    fn scan_third(
        &mut self,
        i: usize,
        j: usize,
        incumbent: &mut Incumbent,
    ) -> Result<(), BudgetExhausted> {
        let orders = self.orders;
        let n = orders.len();
        let s2 = &orders.scores[2];
        let combined = orders.masks[i] | orders.masks[j];
        let pair = orders.scores[0][i] + orders.scores[1][j];

        let mut kpos = 0;
        while kpos + LANES <= n {
            self.spent += 1;
            if self.spent > self.budget {
                return Err(BudgetExhausted);
            }
            if pair + s2[kpos] <= incumbent.best {
                return Ok(());
            }
            let hits = self
                .kernel
                .disjoint_mask8(combined, &orders.masks[kpos..kpos + LANES]);
            if hits != 0 {
                let k = kpos + hits.trailing_zeros() as usize;
                incumbent.offer(pair + s2[k], [i as u32, j as u32, k as u32]);
                return Ok(());
            }
            kpos += LANES;
        }

        while kpos < n {
            if pair + s2[kpos] <= incumbent.best {
                return Ok(());
            }
            if combined & orders.masks[kpos] == 0 {
                incumbent.offer(pair + s2[kpos], [i as u32, j as u32, kpos as u32]);
                return Ok(());
            }
            kpos += 1;
        }
        Ok(())
    }
}
