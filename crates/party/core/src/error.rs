//! Errors raised while constructing a roster.
//!
//! Recommendation itself never fails: its outcomes are reported as data in
//! [`crate::PartyResult`]. Only strict roster construction rejects input.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("character at position {index} has an empty id")]
    EmptyId { index: usize },

    #[error("duplicate character id '{id}'")]
    DuplicateId { id: String },

    #[error("character ids '{first}' and '{second}' differ only in case")]
    IdCaseCollision { first: String, second: String },

    #[error("duplicate display name '{name}' (ids '{first}' and '{second}')")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },
}
