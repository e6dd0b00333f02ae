//! Split rules.
//!
//! A [`SplitRule`] is the policy deciding how a record's amount is divided
//! among the **non-payer** participants. The payer's own share is never
//! emitted: balances track what each participant owes on costs someone else
//! fronted, so a payer owing themselves is meaningless.
//!
//! Historical records may be incomplete (a percentage map that only ever
//! named `person1`, a fixed map missing a participant added later). The
//! evaluator tolerates those gaps with documented defaults instead of
//! failing, because it must still produce a usable result against
//! partially-migrated data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, Roster};

/// Policy dividing a record's amount among non-payer participants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SplitRule {
    /// Amount divided evenly across all participants.
    Equal,
    /// Per-participant percentages. A missing entry defaults to an even
    /// share (`100 / |participants|` percent).
    Percentage { shares: HashMap<Uuid, f64> },
    /// Absolute per-participant amounts. A missing entry defaults to zero.
    /// The map is **not** required to sum to the record total; mismatches
    /// are a data-quality anomaly, not an error.
    Fixed { shares: HashMap<Uuid, Money> },
    /// One side carries 100% of the cost.
    Full { payer_takes_all: bool },
}

impl SplitRule {
    /// Stable string form of the rule kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Percentage { .. } => "percentage",
            Self::Fixed { .. } => "fixed",
            Self::Full { .. } => "full",
        }
    }

    /// Computes each non-payer participant's share of `amount`.
    ///
    /// Shares are returned in roster order, one entry per non-payer
    /// participant (zero shares included), rounded to the cent.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidAmount`] when `amount <= 0`. Everything else
    /// degrades gracefully (see the variant docs).
    pub fn evaluate(
        &self,
        amount: Money,
        roster: &Roster,
        payer_id: Uuid,
    ) -> ResultEngine<Vec<(Uuid, Money)>> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(format!(
                "split amount must be > 0, got {amount}"
            )));
        }

        let headcount = roster.len();
        let non_payers: Vec<Uuid> = roster
            .iter()
            .filter(|p| p.id != payer_id)
            .map(|p| p.id)
            .collect();

        let shares = match self {
            Self::Equal => {
                let share = amount.split_even(headcount);
                non_payers.into_iter().map(|id| (id, share)).collect()
            }
            Self::Percentage { shares } => {
                let default_percent = 100.0 / headcount as f64;
                non_payers
                    .into_iter()
                    .map(|id| {
                        let percent = shares.get(&id).copied().unwrap_or_else(|| {
                            tracing::debug!(
                                participant = %id,
                                default_percent,
                                "percentage entry missing, defaulting to even share"
                            );
                            default_percent
                        });
                        (id, amount.percent(percent))
                    })
                    .collect()
            }
            Self::Fixed { shares } => non_payers
                .into_iter()
                .map(|id| (id, shares.get(&id).copied().unwrap_or(Money::ZERO)))
                .collect(),
            Self::Full { payer_takes_all } => {
                if *payer_takes_all {
                    non_payers.into_iter().map(|id| (id, Money::ZERO)).collect()
                } else if non_payers.len() > 1 {
                    // The rule is inherently two-party; with several
                    // non-payers the cost falls back to an even split among
                    // them.
                    tracing::warn!(
                        non_payers = non_payers.len(),
                        "full split with more than one non-payer, dividing evenly"
                    );
                    let share = amount.split_even(non_payers.len());
                    non_payers.into_iter().map(|id| (id, share)).collect()
                } else {
                    non_payers.into_iter().map(|id| (id, amount)).collect()
                }
            }
        };

        Ok(shares)
    }
}
