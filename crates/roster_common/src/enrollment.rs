//! # Enrollments
//!
//! A participant's request to join a program, with an approval state
//! mutated only by administrator actions. Enrollments are never
//! hard-deleted by the subsystem; deletion is an explicit
//! administrator operation outside this layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::ids::{ParticipantId, ProgramId};

/// Approval state of an enrollment request.
///
/// Transitions are administrator-driven and unrestricted between the
/// three states (an admin may revert an approval or re-open a
/// cancellation).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    /// Submitted, awaiting an administrator decision.
    Pending,
    /// Accepted into the program.
    Approved,
    /// Rejected or withdrawn.
    Cancelled,
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollmentStatus::Pending => write!(f, "pending"),
            EnrollmentStatus::Approved => write!(f, "approved"),
            EnrollmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A participant's request to join a program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Stable enrollment id.
    pub id: Uuid,
    /// The requesting participant.
    pub participant: ParticipantId,
    /// The program applied to.
    pub program: ProgramId,
    /// Current approval state.
    pub status: EnrollmentStatus,
}

impl Enrollment {
    /// Builds a new `Pending` enrollment with a fresh id.
    #[must_use]
    pub fn pending(participant: ParticipantId, program: ProgramId) -> Self {
        Self {
            id: Uuid::new_v4(),
            participant,
            program,
            status: EnrollmentStatus::Pending,
        }
    }
}
