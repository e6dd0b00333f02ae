//! Net balances.
//!
//! The ledger does **not** store a pairwise debt graph. It tracks, per
//! participant, the cumulative amount that participant owes as a share of
//! costs someone else fronted. In the reported balances
//! ([`NetBalance::accumulate`]) a payer is never credited when others owe
//! them; their balance only shrinks when they later appear as the payer of a
//! settlement. This asymmetric model is exact for two-party groups and an
//! approximation of debt simplification for larger ones.
//!
//! The settlement planner needs the other side of each debt to exist, so it
//! runs on [`NetBalance::planning_view`]: the same fold, with each expense
//! and agreement payer credited for the shares they fronted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Money, ResultEngine, Roster, Transaction};

/// Per-participant signed owed amount, in roster order.
///
/// Positive = owes, negative = credit. For a closed ledger (every settlement
/// matching a genuine debt) the balances sum to zero within one cent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetBalance {
    entries: Vec<(Uuid, Money)>,
}

impl NetBalance {
    /// Folds a collection of records into per-participant balances.
    ///
    /// Replays, in input order:
    /// - every expense and every **active** agreement through its split
    ///   rule, adding each non-payer share to that participant's balance;
    /// - every settlement as a subtraction from the **settling payer's**
    ///   balance (overshooting into negative is a valid credit).
    ///
    /// Records whose payer is not on the roster are dropped with a warn
    /// diagnostic and the fold continues: expenses routinely predate a
    /// participant's removal. Shares for off-roster participants are
    /// likewise skipped.
    ///
    /// # Errors
    ///
    /// Only caller errors propagate (a record with a non-positive amount
    /// reaching the evaluator). Data-quality gaps never fail the fold.
    pub fn accumulate(
        transactions: &[&Transaction],
        roster: &Roster,
    ) -> ResultEngine<NetBalance> {
        Self::fold(transactions, roster, false)
    }

    /// Folds the same records into the signed view the settlement planner
    /// consumes.
    ///
    /// Identical to [`accumulate`](Self::accumulate) except that each
    /// expense and active-agreement payer is credited with the sum of the
    /// non-payer shares they fronted, so fronted costs show up as
    /// receivable credits. Without the credit an expense-only history has
    /// debtors but no creditors and nothing to plan. The reported balances
    /// stay asymmetric; only transfer planning uses this view.
    pub fn planning_view(
        transactions: &[&Transaction],
        roster: &Roster,
    ) -> ResultEngine<NetBalance> {
        Self::fold(transactions, roster, true)
    }

    fn fold(
        transactions: &[&Transaction],
        roster: &Roster,
        credit_payers: bool,
    ) -> ResultEngine<NetBalance> {
        let mut balance = NetBalance {
            entries: roster.iter().map(|p| (p.id, Money::ZERO)).collect(),
        };

        for tx in transactions {
            if !roster.contains(tx.payer_id()) {
                tracing::warn!(
                    record = %tx.id(),
                    kind = tx.kind(),
                    payer = %tx.payer_id(),
                    "dropping record: payer is not on the roster"
                );
                continue;
            }

            match tx {
                Transaction::Expense { amount, payer_id, split, .. }
                | Transaction::Agreement {
                    amount,
                    payer_id,
                    split,
                    active: true,
                    ..
                } => {
                    for (participant, share) in split.evaluate(*amount, roster, *payer_id)? {
                        balance.add(participant, share);
                        if credit_payers {
                            balance.add(*payer_id, -share);
                        }
                    }
                }
                Transaction::Agreement { active: false, .. } => {}
                Transaction::Settlement { amount, payer_id, .. } => {
                    balance.add(*payer_id, -*amount);
                }
            }
        }

        Ok(balance)
    }

    /// The balance recorded for a participant, zero when unknown.
    #[must_use]
    pub fn amount_for(&self, id: Uuid) -> Money {
        self.entries
            .iter()
            .find(|(participant, _)| *participant == id)
            .map(|(_, amount)| *amount)
            .unwrap_or(Money::ZERO)
    }

    /// Iterates `(participant id, balance)` pairs in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (Uuid, Money)> + '_ {
        self.entries.iter().copied()
    }

    /// Sum of all balances. Zero within one cent for a closed ledger.
    #[must_use]
    pub fn total(&self) -> Money {
        self.entries
            .iter()
            .fold(Money::ZERO, |acc, (_, amount)| acc + *amount)
    }

    fn add(&mut self, id: Uuid, delta: Money) {
        if let Some((_, amount)) = self
            .entries
            .iter_mut()
            .find(|(participant, _)| *participant == id)
        {
            *amount += delta;
        }
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: Vec<(Uuid, Money)>) -> NetBalance {
        NetBalance { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Participant, SplitRule};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn roster(names: &[&str]) -> Roster {
        let participants = names
            .iter()
            .enumerate()
            .map(|(i, name)| Participant::new(*name, (i + 1) as u8))
            .collect();
        Roster::new(participants).unwrap()
    }

    fn id_at(roster: &Roster, position: u8) -> Uuid {
        roster.by_position(position).unwrap().id
    }

    #[test]
    fn expense_raises_only_non_payer_balances() {
        let roster = roster(&["Ana", "Beto"]);
        let ana = id_at(&roster, 1);
        let beto = id_at(&roster, 2);

        let tx =
            Transaction::expense(Money::new(100_00), ana, SplitRule::Equal, date(2026, 3, 2))
                .unwrap();
        let balance = NetBalance::accumulate(&[&tx], &roster).unwrap();

        assert_eq!(balance.amount_for(ana), Money::ZERO);
        assert_eq!(balance.amount_for(beto), Money::new(50_00));
    }

    #[test]
    fn settlement_reduces_the_settling_payers_balance() {
        let roster = roster(&["Ana", "Beto"]);
        let ana = id_at(&roster, 1);
        let beto = id_at(&roster, 2);

        let expense =
            Transaction::expense(Money::new(100_00), ana, SplitRule::Equal, date(2026, 3, 2))
                .unwrap();
        let repayment = Transaction::settlement(Money::new(50_00), beto, date(2026, 3, 9)).unwrap();

        let balance = NetBalance::accumulate(&[&expense, &repayment], &roster).unwrap();
        assert_eq!(balance.amount_for(beto), Money::ZERO);
        assert_eq!(balance.total(), Money::ZERO);
    }

    #[test]
    fn planning_view_credits_the_payer_with_fronted_shares() {
        let roster = roster(&["Ana", "Beto"]);
        let ana = id_at(&roster, 1);
        let beto = id_at(&roster, 2);

        let expense =
            Transaction::expense(Money::new(100_00), ana, SplitRule::Equal, date(2026, 3, 2))
                .unwrap();

        // Reported balances stay asymmetric: Ana is never credited.
        let reported = NetBalance::accumulate(&[&expense], &roster).unwrap();
        assert_eq!(reported.amount_for(ana), Money::ZERO);
        assert_eq!(reported.amount_for(beto), Money::new(50_00));

        // The planning view carries the other side of the debt.
        let view = NetBalance::planning_view(&[&expense], &roster).unwrap();
        assert_eq!(view.amount_for(ana), Money::new(-50_00));
        assert_eq!(view.amount_for(beto), Money::new(50_00));

        // A repayment clears the debtor in both folds.
        let repayment = Transaction::settlement(Money::new(50_00), beto, date(2026, 3, 9)).unwrap();
        let view = NetBalance::planning_view(&[&expense, &repayment], &roster).unwrap();
        assert_eq!(view.amount_for(beto), Money::ZERO);
    }

    #[test]
    fn settlement_may_overshoot_into_credit() {
        let roster = roster(&["Ana", "Beto"]);
        let beto = id_at(&roster, 2);

        let repayment = Transaction::settlement(Money::new(20_00), beto, date(2026, 3, 9)).unwrap();
        let balance = NetBalance::accumulate(&[&repayment], &roster).unwrap();

        assert_eq!(balance.amount_for(beto), Money::new(-20_00));
    }

    #[test]
    fn records_with_off_roster_payers_are_dropped() {
        let roster = roster(&["Ana", "Beto"]);
        let beto = id_at(&roster, 2);
        let gone = Uuid::new_v4();

        let stale =
            Transaction::expense(Money::new(100_00), gone, SplitRule::Equal, date(2026, 3, 2))
                .unwrap();
        let ana = id_at(&roster, 1);
        let live =
            Transaction::expense(Money::new(10_00), ana, SplitRule::Equal, date(2026, 3, 3))
                .unwrap();

        let balance = NetBalance::accumulate(&[&stale, &live], &roster).unwrap();
        assert_eq!(balance.amount_for(beto), Money::new(5_00));
    }

    #[test]
    fn inactive_agreements_contribute_nothing() {
        let roster = roster(&["Ana", "Beto"]);
        let ana = id_at(&roster, 1);
        let beto = id_at(&roster, 2);

        let paused =
            Transaction::agreement(Money::new(80_00), ana, SplitRule::Equal, false).unwrap();
        let balance = NetBalance::accumulate(&[&paused], &roster).unwrap();

        assert_eq!(balance.amount_for(beto), Money::ZERO);
    }
}
