//! # Attendance Ledger
//!
//! Write and query surface for per-session attendance entries.
//! Enforces the one-record-per-(participant, program, date) upsert
//! invariant through the store and announces every acknowledged
//! write on the notification bus.
//!
//! ## Ordering
//!
//! The event is published only after the store acknowledges the
//! write. A failed write publishes nothing, so subscribers never
//! observe a change that did not persist.

use std::sync::Arc;

use tracing::info;

use roster_common::{
    AttendanceRecord, AttendanceStatus, ParticipantId, ProgramId, RosterError, RosterStore,
    RosterEvent, SessionDate,
};

use crate::bus::NotificationBus;

/// Attendance write/query component.
pub struct AttendanceLedger {
    store: Arc<dyn RosterStore>,
    bus: Arc<NotificationBus>,
}

impl AttendanceLedger {
    /// Creates a ledger over the given store and bus.
    pub fn new(store: Arc<dyn RosterStore>, bus: Arc<NotificationBus>) -> Self {
        Self { store, bus }
    }

    /// Records (or overwrites) the attendance entry for one
    /// participant on one session day.
    ///
    /// Upsert semantics: marking the same (participant, program,
    /// date) again replaces the previous status and note, keeping
    /// the original record id. Returns the stored record.
    ///
    /// ## Errors
    ///
    /// `RosterError::Storage` if the store rejects the write; no
    /// event is published in that case.
    pub async fn mark_attendance(
        &self,
        participant: ParticipantId,
        program: ProgramId,
        date: SessionDate,
        status: AttendanceStatus,
        note: Option<String>,
    ) -> Result<AttendanceRecord, RosterError> {
        let record = AttendanceRecord::new(participant, program, date, status, note);
        let stored = self.store.upsert_attendance(record).await?;

        info!(
            participant = stored.participant.as_str(),
            program = stored.program.as_str(),
            date = %stored.date,
            status = %stored.status,
            "attendance recorded"
        );
        self.bus.publish(&RosterEvent::AttendanceChanged {
            participant: stored.participant.clone(),
            program: stored.program.clone(),
            date: stored.date,
            status: stored.status,
        });

        Ok(stored)
    }

    /// Attendance entries of a program, optionally narrowed to one
    /// session day. Ordered by (date, participant).
    pub async fn program_attendance(
        &self,
        program: &ProgramId,
        date: Option<SessionDate>,
    ) -> Result<Vec<AttendanceRecord>, RosterError> {
        Ok(self.store.attendance_for_program(program, date).await?)
    }

    /// One participant's attendance history within a program, in
    /// date order.
    pub async fn participant_attendance(
        &self,
        participant: &ParticipantId,
        program: &ProgramId,
    ) -> Result<Vec<AttendanceRecord>, RosterError> {
        Ok(self
            .store
            .attendance_for_participant(participant, program)
            .await?)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════
