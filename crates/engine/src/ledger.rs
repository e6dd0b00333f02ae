//! The ledger facade.
//!
//! Composes scope filtering, balance accumulation and settlement planning
//! into one call. A [`Ledger`] borrows an immutable snapshot of the group's
//! records; it holds no other state, so the same ledger can be evaluated for
//! several windows ("this month", "all time") concurrently or back-to-back
//! with identical inputs producing bit-identical reports.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{NetBalance, ResultEngine, Roster, Transaction, Transfer, Window, scope};

/// Who owes whom, and the transfers that would settle it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerReport {
    pub balances: NetBalance,
    pub transfers: Vec<Transfer>,
}

/// Read-only view over one group's roster and records.
#[derive(Clone, Copy, Debug)]
pub struct Ledger<'a> {
    roster: &'a Roster,
    transactions: &'a [Transaction],
}

impl<'a> Ledger<'a> {
    pub fn new(roster: &'a Roster, transactions: &'a [Transaction]) -> Self {
        Self {
            roster,
            transactions,
        }
    }

    /// Evaluates the ledger for `window`, resolving relative windows
    /// against `today`.
    ///
    /// Pure: same inputs, same report. Filters dated records to the window,
    /// folds the survivors into per-participant balances and plans the
    /// transfers that zero them. The reported balances are the asymmetric
    /// owed amounts; planning runs on the credited
    /// [planning view](NetBalance::planning_view) so the participants who
    /// fronted costs appear as the receiving side.
    pub fn report_as_of(&self, window: Window, today: NaiveDate) -> ResultEngine<LedgerReport> {
        let scoped = scope::filter(self.transactions, window, today)?;
        let balances = NetBalance::accumulate(&scoped, self.roster)?;
        let transfers = Transfer::plan(&NetBalance::planning_view(&scoped, self.roster)?);
        Ok(LedgerReport {
            balances,
            transfers,
        })
    }

    /// Convenience wrapper resolving relative windows against the current
    /// UTC date. Prefer [`report_as_of`](Self::report_as_of) wherever
    /// reproducibility matters.
    pub fn report(&self, window: Window) -> ResultEngine<LedgerReport> {
        self.report_as_of(window, Utc::now().date_naive())
    }
}
