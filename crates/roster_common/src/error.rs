//! # Error Taxonomy
//!
//! The public error contracts for the subsystem, consumed by admin
//! tooling and UI-facing callers.
//!
//! ## Propagation Policy
//!
//! | Variant | Retried here? | Meaning |
//! |---------|---------------|---------|
//! | `Validation` | never | Malformed input; fix the call |
//! | `NotFound` / `AlreadyLifted` | never | Ban state conflict |
//! | `BanConflict` | never | An enforced ban already exists |
//! | `Blacklisted` | never | Enrollment rejected; carries expiry |
//! | `Storage` | never | Underlying store failure, surfaced as-is |
//!
//! No retry or backoff happens at this layer; repetition requires a
//! new explicit call. All variants are value types (`Clone`,
//! `PartialEq`) so tests can assert on them directly.

use thiserror::Error;
use uuid::Uuid;

// ════════════════════════════════════════════════════════════════════════════
// ROSTER ERROR
// ════════════════════════════════════════════════════════════════════════════

/// Failure modes of the attendance/blacklist subsystem.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterError {
    /// Malformed identifier, date, or other input. Never retried.
    #[error("invalid input: {0}")]
    Validation(String),

    /// No record with the given id exists.
    #[error("record {id} not found")]
    NotFound {
        /// Id the caller asked for.
        id: Uuid,
    },

    /// The blacklist record was already lifted; lifting is terminal.
    #[error("blacklist record {ban_id} is already lifted")]
    AlreadyLifted {
        /// Id of the already-lifted record.
        ban_id: Uuid,
    },

    /// A currently enforced ban exists; a second one may not be
    /// created until it is lifted or expires.
    #[error("an enforced ban already exists until timestamp {existing_until}")]
    BanConflict {
        /// Expiry (Unix seconds) of the ban that blocked creation.
        existing_until: u64,
    },

    /// Enrollment rejected because the participant is banned.
    /// Carries the expiry so callers can render "available again
    /// on X".
    #[error("participant is blacklisted until timestamp {banned_until}")]
    Blacklisted {
        /// Expiry (Unix seconds) of the latest enforced ban.
        banned_until: u64,
    },

    /// Underlying persistence failure, wrapped for user-visible
    /// reporting.
    #[error("storage failure: {0}")]
    Storage(String),
}

// ════════════════════════════════════════════════════════════════════════════
// STORE ERROR
// ════════════════════════════════════════════════════════════════════════════

/// Failures of the persistent-store collaborator.
///
/// Mapped into [`RosterError::Storage`] at the engine boundary so
/// engine callers see a single storage failure surface.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached or refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The targeted record does not exist.
    #[error("record not found")]
    NotFound,
}

impl From<StoreError> for RosterError {
    fn from(err: StoreError) -> Self {
        RosterError::Storage(err.to_string())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════
