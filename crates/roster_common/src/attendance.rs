//! # Attendance Records
//!
//! One attendance entry per (participant, program, date). The ledger
//! enforces upsert semantics over [`AttendanceKey`]: writing the same
//! key again overwrites the entry instead of appending.
//!
//! Records are created and overwritten only by administrator actions
//! for the program; participants never write them.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::date::SessionDate;
use crate::ids::{ParticipantId, ProgramId};

// ════════════════════════════════════════════════════════════════════════════
// ATTENDANCE STATUS
// ════════════════════════════════════════════════════════════════════════════

/// Per-session attendance outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Attended the session.
    Present,
    /// Did not attend. Counted by the absence aggregate.
    Absent,
    /// Attended late. Not counted as an absence.
    Late,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Absent => write!(f, "absent"),
            AttendanceStatus::Late => write!(f, "late"),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ATTENDANCE RECORD
// ════════════════════════════════════════════════════════════════════════════

/// Composite upsert key: at most one record may exist per key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttendanceKey {
    /// The participant the entry is for.
    pub participant: ParticipantId,
    /// The program the session belongs to.
    pub program: ProgramId,
    /// The program-local calendar day of the session.
    pub date: SessionDate,
}

/// A single attendance entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Stable record id. Preserved across upsert overwrites of the
    /// same key.
    pub id: Uuid,
    /// The participant the entry is for.
    pub participant: ParticipantId,
    /// The program the session belongs to.
    pub program: ProgramId,
    /// The program-local calendar day of the session.
    pub date: SessionDate,
    /// Attendance outcome for the day.
    pub status: AttendanceStatus,
    /// Optional free-form note; may hold an opaque signature-image
    /// reference.
    pub note: Option<String>,
}

impl AttendanceRecord {
    /// Builds a record with a fresh id.
    #[must_use]
    pub fn new(
        participant: ParticipantId,
        program: ProgramId,
        date: SessionDate,
        status: AttendanceStatus,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            participant,
            program,
            date,
            status,
            note,
        }
    }

    /// The composite key this record is unique under.
    #[must_use]
    pub fn key(&self) -> AttendanceKey {
        AttendanceKey {
            participant: self.participant.clone(),
            program: self.program.clone(),
            date: self.date,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord::new(
            ParticipantId::new("p1").expect("valid"),
            ProgramId::new("g1").expect("valid"),
            SessionDate::new(2025, 5, 1).expect("valid"),
            status,
            None,
        )
    }

    #[test]
    fn test_new_assigns_fresh_ids() {
        let a = record(AttendanceStatus::Present);
        let b = record(AttendanceStatus::Present);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_key_ignores_status_and_note() {
        let mut a = record(AttendanceStatus::Present);
        let b = record(AttendanceStatus::Absent);
        a.note = Some("sig-ref".into());
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(AttendanceStatus::Present.to_string(), "present");
        assert_eq!(AttendanceStatus::Absent.to_string(), "absent");
        assert_eq!(AttendanceStatus::Late.to_string(), "late");
    }
}
