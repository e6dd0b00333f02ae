//! Financial records.
//!
//! A [`Transaction`] is one of three record kinds:
//!
//! - [`Expense`]: a dated, one-off cost fronted by one participant and
//!   split across the group by a [`SplitRule`].
//! - [`Agreement`]: a recurring obligation (rent, subscriptions). When
//!   `active` it contributes **once per evaluated scope**, whatever the
//!   window size: it models a standing monthly commitment, not a dated
//!   event.
//! - [`Settlement`]: a repayment. It reduces the settling payer's own owed
//!   balance and carries no split rule.
//!
//! Expenses and settlements may carry a `billing_month` override so that
//! deferred-billing instruments (credit cards) land in the month they are
//! charged, not the month they were spent.
//!
//! [`Expense`]: Transaction::Expense
//! [`Agreement`]: Transaction::Agreement
//! [`Settlement`]: Transaction::Settlement

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, SplitRule};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transaction {
    Expense {
        id: Uuid,
        amount: Money,
        payer_id: Uuid,
        split: SplitRule,
        occurs_on: NaiveDate,
        /// Any date within the month the record should be billed to;
        /// overrides `occurs_on` for scope filtering when present.
        billing_month: Option<NaiveDate>,
    },
    Agreement {
        id: Uuid,
        amount: Money,
        payer_id: Uuid,
        split: SplitRule,
        active: bool,
    },
    Settlement {
        id: Uuid,
        amount: Money,
        payer_id: Uuid,
        occurs_on: NaiveDate,
        billing_month: Option<NaiveDate>,
    },
}

impl Transaction {
    pub fn expense(
        amount: Money,
        payer_id: Uuid,
        split: SplitRule,
        occurs_on: NaiveDate,
    ) -> ResultEngine<Self> {
        Self::require_positive(amount)?;
        Ok(Self::Expense {
            id: Uuid::new_v4(),
            amount,
            payer_id,
            split,
            occurs_on,
            billing_month: None,
        })
    }

    pub fn agreement(
        amount: Money,
        payer_id: Uuid,
        split: SplitRule,
        active: bool,
    ) -> ResultEngine<Self> {
        Self::require_positive(amount)?;
        Ok(Self::Agreement {
            id: Uuid::new_v4(),
            amount,
            payer_id,
            split,
            active,
        })
    }

    pub fn settlement(amount: Money, payer_id: Uuid, occurs_on: NaiveDate) -> ResultEngine<Self> {
        Self::require_positive(amount)?;
        Ok(Self::Settlement {
            id: Uuid::new_v4(),
            amount,
            payer_id,
            occurs_on,
            billing_month: None,
        })
    }

    /// Sets the deferred-billing month on an expense or settlement. No-op
    /// for agreements, which are not date-scoped at all.
    #[must_use]
    pub fn with_billing_month(mut self, month: NaiveDate) -> Self {
        match &mut self {
            Self::Expense { billing_month, .. } | Self::Settlement { billing_month, .. } => {
                *billing_month = Some(month);
            }
            Self::Agreement { .. } => {}
        }
        self
    }

    fn require_positive(amount: Money) -> ResultEngine<()> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(format!(
                "record amount must be > 0, got {amount}"
            )));
        }
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::Expense { id, .. } | Self::Agreement { id, .. } | Self::Settlement { id, .. } => {
                *id
            }
        }
    }

    pub fn amount(&self) -> Money {
        match self {
            Self::Expense { amount, .. }
            | Self::Agreement { amount, .. }
            | Self::Settlement { amount, .. } => *amount,
        }
    }

    pub fn payer_id(&self) -> Uuid {
        match self {
            Self::Expense { payer_id, .. }
            | Self::Agreement { payer_id, .. }
            | Self::Settlement { payer_id, .. } => *payer_id,
        }
    }

    /// Stable string form of the record kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Expense { .. } => "expense",
            Self::Agreement { .. } => "agreement",
            Self::Settlement { .. } => "settlement",
        }
    }

    /// The date a dated record is scoped by: the billing-month override when
    /// present, the record's own date otherwise. `None` for agreements.
    pub fn effective_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Expense {
                occurs_on,
                billing_month,
                ..
            }
            | Self::Settlement {
                occurs_on,
                billing_month,
                ..
            } => Some(billing_month.unwrap_or(*occurs_on)),
            Self::Agreement { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn constructors_reject_non_positive_amounts() {
        let payer = Uuid::new_v4();
        assert!(
            Transaction::expense(Money::ZERO, payer, SplitRule::Equal, date(2026, 3, 1)).is_err()
        );
        assert!(Transaction::agreement(Money::new(-100), payer, SplitRule::Equal, true).is_err());
        assert!(Transaction::settlement(Money::ZERO, payer, date(2026, 3, 1)).is_err());
    }

    #[test]
    fn billing_month_overrides_effective_date() {
        let payer = Uuid::new_v4();
        let expense =
            Transaction::expense(Money::new(10_00), payer, SplitRule::Equal, date(2026, 3, 28))
                .unwrap()
                .with_billing_month(date(2026, 4, 1));

        assert_eq!(expense.effective_date(), Some(date(2026, 4, 1)));
    }

    #[test]
    fn agreements_have_no_effective_date() {
        let payer = Uuid::new_v4();
        let agreement =
            Transaction::agreement(Money::new(80_00), payer, SplitRule::Equal, true).unwrap();
        assert_eq!(agreement.effective_date(), None);
        assert_eq!(agreement.kind(), "agreement");
    }
}
