//! Settlement planning.
//!
//! Turns a [`NetBalance`] into the pairwise transfers that would bring every
//! balance to zero. Greedy debt-netting: not guaranteed to be the minimum
//! number of transfers, but bounded by `debtors + creditors - 1` and fully
//! deterministic for a deterministic input order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Money, NetBalance};

/// A suggested repayment from one participant to another.
///
/// Invariants: `from != to` and `amount` is strictly above
/// [`Money::EPSILON`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Uuid,
    pub to: Uuid,
    pub amount: Money,
}

impl Transfer {
    /// Plans the transfers that zero out `balances`.
    ///
    /// 1. Participants owing more than one cent become debtors; those with
    ///    more than one cent of credit become creditors.
    /// 2. Both sides are stable-sorted descending by magnitude, so ties keep
    ///    roster order.
    /// 3. Each debtor is matched against creditors in order, transferring
    ///    `min(owes, receives)` until either side drops to the one-cent
    ///    tolerance.
    ///
    /// Sub-cent leftovers are rounding noise and produce no transfer; a
    /// balance set already within tolerance yields an empty plan.
    #[must_use]
    pub fn plan(balances: &NetBalance) -> Vec<Transfer> {
        let mut debtors: Vec<(Uuid, Money)> = Vec::new();
        let mut creditors: Vec<(Uuid, Money)> = Vec::new();
        for (participant, amount) in balances.iter() {
            if amount > Money::EPSILON {
                debtors.push((participant, amount));
            } else if amount < -Money::EPSILON {
                creditors.push((participant, amount.abs()));
            }
        }

        // Stable sorts keep roster order between equal amounts.
        debtors.sort_by(|a, b| b.1.cmp(&a.1));
        creditors.sort_by(|a, b| b.1.cmp(&a.1));

        let mut transfers = Vec::new();
        let mut next_creditor = 0;
        for (debtor, mut owes) in debtors {
            while owes > Money::EPSILON && next_creditor < creditors.len() {
                let (creditor, receives) = &mut creditors[next_creditor];
                let amount = owes.min(*receives);
                if amount > Money::EPSILON {
                    transfers.push(Transfer {
                        from: debtor,
                        to: *creditor,
                        amount,
                    });
                }
                owes -= amount;
                *receives -= amount;
                if *receives <= Money::EPSILON {
                    next_creditor += 1;
                }
            }
        }

        transfers
    }
}
