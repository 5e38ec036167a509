//! # Participant & Program Identifiers
//!
//! Validated newtype wrappers for the two identifier spaces the
//! subsystem operates on. Identifiers are opaque strings assigned by
//! the hosted backend; this module only enforces that they are
//! well-formed, never what they resolve to.
//!
//! ## Validation Rules
//!
//! - Must not be empty.
//! - Must not be whitespace-only.
//! - Must not contain interior whitespace or `/` (both would corrupt
//!   composite storage keys).
//!
//! Construction is the single validation point: once a value exists,
//! every downstream component may rely on it being well-formed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Maximum accepted identifier length in bytes.
const MAX_ID_LEN: usize = 128;

fn validate_id(kind: &str, raw: &str) -> Result<(), RosterError> {
    if raw.is_empty() || raw.trim().is_empty() {
        return Err(RosterError::Validation(format!("{kind} id must not be empty")));
    }
    if raw.len() > MAX_ID_LEN {
        return Err(RosterError::Validation(format!(
            "{kind} id exceeds {MAX_ID_LEN} bytes"
        )));
    }
    if raw.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(RosterError::Validation(format!(
            "{kind} id must not contain whitespace or '/'"
        )));
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// PARTICIPANT ID
// ════════════════════════════════════════════════════════════════════════════

/// Opaque identifier of a program participant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Validates and wraps a raw identifier.
    ///
    /// ## Errors
    ///
    /// `RosterError::Validation` if the identifier is empty,
    /// whitespace-only, over-long, or contains whitespace or `/`.
    pub fn new(raw: impl Into<String>) -> Result<Self, RosterError> {
        let raw = raw.into();
        validate_id("participant", &raw)?;
        Ok(Self(raw))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PROGRAM ID
// ════════════════════════════════════════════════════════════════════════════

/// Opaque identifier of an educational program.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProgramId(String);

impl ProgramId {
    /// Validates and wraps a raw identifier. Same rules as
    /// [`ParticipantId::new`].
    pub fn new(raw: impl Into<String>) -> Result<Self, RosterError> {
        let raw = raw.into();
        validate_id("program", &raw)?;
        Ok(Self(raw))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════
