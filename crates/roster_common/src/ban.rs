//! # Blacklist Records
//!
//! A time-bound participation ban. The persisted representation is
//! dual-state: an `active` flag that only an explicit lift clears,
//! and an independent `banned_until` expiry that is never written
//! back when time passes. A record can therefore be simultaneously
//! "active" and temporally expired — that state is reachable purely
//! by time passing, with no transition event.
//!
//! ## State Machine
//!
//! ```text
//! Created   (active=true,  banned_until in the future)   enforced
//!    │  time passes (no event)
//!    ▼
//! Expired   (active=true,  banned_until in the past)     not enforced
//!    │  explicit lift (the only exit from active=true)
//!    ▼
//! Lifted    (active=false)                               terminal
//! ```
//!
//! Reading code must never rely on `active` alone: enforcement is
//! always recomputed from both fields via [`BlacklistRecord::is_enforced`].
//!
//! ## Time Arithmetic
//!
//! All timestamps are Unix seconds supplied by the caller; expiry
//! math uses `saturating_add`/`saturating_mul` so an overflowing
//! duration pins to `u64::MAX` (a ban that effectively never
//! expires) instead of wrapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::ids::{ParticipantId, ProgramId};

// ════════════════════════════════════════════════════════════════════════════
// CONSTANTS
// ════════════════════════════════════════════════════════════════════════════

/// Seconds in one ban month (fixed 30-day month).
pub const MONTH_SECS: u64 = 30 * 86_400;

/// Default ban duration in months.
pub const DEFAULT_BAN_MONTHS: u32 = 6;

/// Returns the expiry timestamp for a ban starting at `banned_at`
/// and lasting `months` ban months. Saturates on overflow.
#[must_use]
#[inline]
pub fn ban_expiry(banned_at: u64, months: u32) -> u64 {
    banned_at.saturating_add(MONTH_SECS.saturating_mul(u64::from(months)))
}

// ════════════════════════════════════════════════════════════════════════════
// BAN STATE
// ════════════════════════════════════════════════════════════════════════════

/// Derived, read-side view of a [`BlacklistRecord`].
///
/// Computed from `active` and `banned_until` together; never
/// persisted. The admin UI's "active" and "expired" tabs are exactly
/// `Enforced` and `Expired`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BanState {
    /// `active` and `banned_until` still in the future.
    Enforced,
    /// `active` but `banned_until` has passed. Not enforced; only an
    /// explicit lift moves the record out of `active`.
    Expired,
    /// Explicitly lifted. Terminal — a new ban requires a new record.
    Lifted,
}

impl fmt::Display for BanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BanState::Enforced => write!(f, "enforced"),
            BanState::Expired => write!(f, "expired"),
            BanState::Lifted => write!(f, "lifted"),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// BLACKLIST RECORD
// ════════════════════════════════════════════════════════════════════════════

/// A time-bound participation ban. Never hard-deleted: lifted and
/// expired records remain as the audit trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistRecord {
    /// Stable record id.
    pub id: Uuid,
    /// The banned participant.
    pub participant: ParticipantId,
    /// Program the triggering incident belonged to, when known.
    /// Audit only — enforcement is participant-global.
    pub program: Option<ProgramId>,
    /// Free-text reason recorded by the administrator.
    pub reason: String,
    /// Unix timestamp (seconds) when the ban was applied.
    pub banned_at: u64,
    /// Unix timestamp (seconds) when the ban expires.
    pub banned_until: u64,
    /// Administrator who applied the ban.
    pub banned_by: String,
    /// Persisted flag, cleared only by an explicit lift. NOT
    /// self-clearing at expiry.
    pub active: bool,
}

impl BlacklistRecord {
    /// Creates a new active ban with a fresh id.
    #[must_use]
    pub fn new(
        participant: ParticipantId,
        program: Option<ProgramId>,
        reason: impl Into<String>,
        banned_at: u64,
        banned_until: u64,
        banned_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            participant,
            program,
            reason: reason.into(),
            banned_at,
            banned_until,
            banned_by: banned_by.into(),
            active: true,
        }
    }

    /// Returns whether the ban is enforced at `as_of`.
    ///
    /// Recomputed from both fields on every call: `active` AND
    /// `banned_until > as_of`. A record whose expiry has passed is
    /// not enforced even though `active` was never cleared.
    #[must_use]
    #[inline]
    pub fn is_enforced(&self, as_of: u64) -> bool {
        self.active && self.banned_until > as_of
    }

    /// Derived state at `as_of`. See [`BanState`].
    #[must_use]
    pub fn state(&self, as_of: u64) -> BanState {
        if !self.active {
            BanState::Lifted
        } else if self.banned_until > as_of {
            BanState::Enforced
        } else {
            BanState::Expired
        }
    }

    /// Seconds remaining until expiry, or `0` if already past.
    #[must_use]
    #[inline]
    pub fn remaining_secs(&self, as_of: u64) -> u64 {
        self.banned_until.saturating_sub(as_of)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════
