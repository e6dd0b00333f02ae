//! The module contains the error the engine can throw.
//!
//! Only caller mistakes become errors. Data-quality anomalies in historical
//! records (missing split-map entries, payers that have since left the
//! group) are tolerated with best-effort defaults and surfaced through
//! `tracing` diagnostics instead.
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("participant set must not be empty")]
    NoParticipants,
    #[error("\"{0}\" does not match any participant")]
    UnknownParticipant(String),
    #[error("Invalid window: {0}")]
    InvalidWindow(String),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::NoParticipants, Self::NoParticipants) => true,
            (Self::UnknownParticipant(a), Self::UnknownParticipant(b)) => a == b,
            (Self::InvalidWindow(a), Self::InvalidWindow(b)) => a == b,
            _ => false,
        }
    }
}
