//! Ledger & settlement engine for small shared-expense groups.
//!
//! Given a roster of participants and a snapshot of financial records
//! (one-off expenses with heterogeneous split rules, recurring agreements,
//! repayments), the engine computes per-participant net balances and a
//! deterministic plan of pairwise transfers that would bring the group to
//! zero debt. It is a pure library: no I/O, no clock inside the pipeline,
//! no mutation of its inputs.

pub use balance::NetBalance;
pub use error::EngineError;
pub use ledger::{Ledger, LedgerReport};
pub use money::Money;
pub use participants::{Participant, Roster, ShareKey};
pub use scope::Window;
pub use settlement::Transfer;
pub use split::SplitRule;
pub use transactions::Transaction;

mod balance;
mod error;
mod ledger;
mod money;
mod participants;
pub mod scope;
mod settlement;
mod split;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
