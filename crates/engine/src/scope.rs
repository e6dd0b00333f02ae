//! Scope windows.
//!
//! Before accumulation, dated records are narrowed to a [`Window`]. Expenses
//! and settlements are filtered by their [effective
//! date](crate::Transaction::effective_date); active agreements bypass the
//! filter entirely and contribute once per evaluated scope, whatever the
//! window spans. Inactive agreements never pass.
//!
//! Relative windows (`CurrentMonth`, `LastMonths`) resolve against an
//! explicit `today` so the pipeline stays deterministic; only the outermost
//! facade convenience reads the clock.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, Transaction};

/// The date range over which dated records are included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    /// The calendar month `today` falls in.
    CurrentMonth,
    /// The `n` calendar months ending with the current one (`LastMonths(1)`
    /// is equivalent to `CurrentMonth`).
    LastMonths(u32),
    /// An explicit inclusive date range.
    Range { start: NaiveDate, end: NaiveDate },
    /// No date filtering.
    All,
}

impl Window {
    /// Resolves the window to an inclusive `[start, end]` range relative to
    /// `today`, or `None` for [`Window::All`].
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidWindow`] for an inverted range or
    /// `LastMonths(0)`.
    pub fn resolve(self, today: NaiveDate) -> ResultEngine<Option<(NaiveDate, NaiveDate)>> {
        match self {
            Self::All => Ok(None),
            Self::Range { start, end } => {
                if start > end {
                    return Err(EngineError::InvalidWindow(format!(
                        "range start {start} is after end {end}"
                    )));
                }
                Ok(Some((start, end)))
            }
            Self::CurrentMonth => Ok(Some(month_span(today, 1)?)),
            Self::LastMonths(0) => Err(EngineError::InvalidWindow(
                "last-months window needs at least one month".to_string(),
            )),
            Self::LastMonths(n) => Ok(Some(month_span(today, n)?)),
        }
    }
}

/// First day of the month `months - 1` months before `today`, through the
/// last day of `today`'s month.
fn month_span(today: NaiveDate, months: u32) -> ResultEngine<(NaiveDate, NaiveDate)> {
    let out_of_range =
        || EngineError::InvalidWindow("window exceeds the supported date range".to_string());

    let current_start =
        NaiveDate::from_ymd_opt(today.year(), today.month(), 1).ok_or_else(out_of_range)?;
    let start = current_start
        .checked_sub_months(Months::new(months - 1))
        .ok_or_else(out_of_range)?;
    let end = current_start
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or_else(out_of_range)?;
    Ok((start, end))
}

/// Narrows `transactions` to the records relevant for `window`.
///
/// Borrowed records are returned in input order. Active agreements always
/// pass; inactive ones never do.
pub fn filter<'a>(
    transactions: &'a [Transaction],
    window: Window,
    today: NaiveDate,
) -> ResultEngine<Vec<&'a Transaction>> {
    let range = window.resolve(today)?;
    let in_range = |date: NaiveDate| match range {
        None => true,
        Some((start, end)) => date >= start && date <= end,
    };

    Ok(transactions
        .iter()
        .filter(|tx| match tx {
            Transaction::Agreement { active, .. } => *active,
            _ => tx.effective_date().map(in_range).unwrap_or(false),
        })
        .collect())
}
