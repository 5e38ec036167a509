//! # Roster Events
//!
//! Data-only event shapes distributed over the in-process
//! notification bus. Events carry no behavior; subscribers decide
//! what to do with them.
//!
//! [`RemoteChange`] is the wire shape of a remotely-originated
//! mutation delivered by the change feed. The adapter translates
//! each remote change into the matching [`RosterEvent`] and feeds it
//! through the same publish path as local mutations, so subscribers
//! cannot tell the two apart.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attendance::AttendanceStatus;
use crate::date::SessionDate;
use crate::enrollment::EnrollmentStatus;
use crate::ids::{ParticipantId, ProgramId};

// ════════════════════════════════════════════════════════════════════════════
// ROSTER EVENT
// ════════════════════════════════════════════════════════════════════════════

/// A state change announced on the notification bus.
///
/// Delivery is transient, at-most-once, in-memory: no persistence,
/// no replay. Consumers re-fetch derived views instead of patching
/// them from event payloads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterEvent {
    /// An attendance entry was written (created or overwritten).
    AttendanceChanged {
        /// The participant whose entry changed.
        participant: ParticipantId,
        /// The program of the session.
        program: ProgramId,
        /// The session day.
        date: SessionDate,
        /// The resulting status.
        status: AttendanceStatus,
    },

    /// A participation ban was created.
    BanApplied {
        /// Id of the new blacklist record.
        ban_id: Uuid,
        /// The banned participant.
        participant: ParticipantId,
        /// Unix timestamp (seconds) when the ban expires.
        banned_until: u64,
    },

    /// A participation ban was explicitly lifted.
    BanLifted {
        /// Id of the lifted blacklist record.
        ban_id: Uuid,
        /// The affected participant.
        participant: ParticipantId,
    },

    /// An enrollment's approval state changed (including initial
    /// creation as `Pending`).
    ApplicationStatusChanged {
        /// Id of the enrollment.
        enrollment_id: Uuid,
        /// The requesting participant.
        participant: ParticipantId,
        /// The program applied to.
        program: ProgramId,
        /// The new approval state.
        status: EnrollmentStatus,
    },
}

// ════════════════════════════════════════════════════════════════════════════
// REMOTE CHANGE
// ════════════════════════════════════════════════════════════════════════════

/// A mutation observed on the remote change stream.
///
/// Payloads mirror [`RosterEvent`] one-to-one; the `origin` field
/// identifies the producing client and is dropped during
/// translation — subscribers never see it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteChange {
    /// Identifier of the remote client that produced the mutation.
    pub origin: String,
    /// The mutation itself.
    pub payload: RemoteChangePayload,
}

/// The mutation carried by a [`RemoteChange`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteChangePayload {
    /// Remote attendance write.
    Attendance {
        /// The participant whose entry changed.
        participant: ParticipantId,
        /// The program of the session.
        program: ProgramId,
        /// The session day.
        date: SessionDate,
        /// The resulting status.
        status: AttendanceStatus,
    },
    /// Remote ban creation.
    BanApplied {
        /// Id of the new blacklist record.
        ban_id: Uuid,
        /// The banned participant.
        participant: ParticipantId,
        /// Unix timestamp (seconds) when the ban expires.
        banned_until: u64,
    },
    /// Remote ban lift.
    BanLifted {
        /// Id of the lifted blacklist record.
        ban_id: Uuid,
        /// The affected participant.
        participant: ParticipantId,
    },
    /// Remote enrollment status change.
    Application {
        /// Id of the enrollment.
        enrollment_id: Uuid,
        /// The requesting participant.
        participant: ParticipantId,
        /// The program applied to.
        program: ProgramId,
        /// The new approval state.
        status: EnrollmentStatus,
    },
}
