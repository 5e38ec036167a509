//! # Enrollment Gate
//!
//! Admission check in front of program enrollment. The gate asks the
//! blacklist policy engine whether any ban is enforced against the
//! participant right now; a banned participant's request is refused
//! before anything is written.
//!
//! The ban check is participant-global: an enforced ban blocks
//! enrollment into every program, not just the one the triggering
//! incident belonged to.

use std::sync::Arc;

use tracing::info;

use roster_common::{
    Enrollment, EnrollmentStatus, ParticipantId, ProgramId, RosterError, RosterEvent, RosterStore,
    StoreError,
};
use uuid::Uuid;

use crate::blacklist::BlacklistPolicyEngine;
use crate::bus::NotificationBus;

/// Admission-checked enrollment component.
pub struct EnrollmentGate {
    store: Arc<dyn RosterStore>,
    bus: Arc<NotificationBus>,
    policy: Arc<BlacklistPolicyEngine>,
}

impl EnrollmentGate {
    /// Creates a gate over the given store, bus, and policy engine.
    pub fn new(
        store: Arc<dyn RosterStore>,
        bus: Arc<NotificationBus>,
        policy: Arc<BlacklistPolicyEngine>,
    ) -> Self {
        Self { store, bus, policy }
    }

    /// Whether the participant may enroll at `now` (no enforced
    /// ban).
    pub async fn can_enroll(
        &self,
        participant: &ParticipantId,
        now: u64,
    ) -> Result<bool, RosterError> {
        Ok(!self.policy.is_banned(participant, now).await?)
    }

    /// Submits an enrollment request for the participant.
    ///
    /// The ban check runs against live persisted state before the
    /// write, so a ban applied moments earlier on another device is
    /// honored.
    ///
    /// ## Errors
    ///
    /// - `RosterError::Blacklisted` if a ban is enforced at `now`;
    ///   `banned_until` carries the latest enforced expiry so the
    ///   caller can tell the participant when they may reapply.
    /// - `RosterError::Storage` if the insert fails; no event is
    ///   published.
    pub async fn request_enrollment(
        &self,
        participant: ParticipantId,
        program: ProgramId,
        now: u64,
    ) -> Result<Enrollment, RosterError> {
        if let Some(banned_until) = self.policy.enforced_until(&participant, now).await? {
            return Err(RosterError::Blacklisted { banned_until });
        }

        let enrollment = Enrollment::pending(participant, program);
        self.store.insert_enrollment(enrollment.clone()).await?;

        info!(
            enrollment_id = %enrollment.id,
            participant = enrollment.participant.as_str(),
            program = enrollment.program.as_str(),
            "enrollment requested"
        );
        self.publish_status(&enrollment);

        Ok(enrollment)
    }

    /// Sets an enrollment's approval state (administrator action).
    ///
    /// Transitions between the three states are unrestricted: an
    /// approval may be reverted, a cancellation re-opened.
    ///
    /// ## Errors
    ///
    /// `RosterError::NotFound` if no enrollment with the id exists.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: EnrollmentStatus,
    ) -> Result<Enrollment, RosterError> {
        let enrollment = self
            .store
            .set_enrollment_status(id, status)
            .await
            .map_err(|err| match err {
                StoreError::NotFound => RosterError::NotFound { id },
                other => other.into(),
            })?;

        info!(
            enrollment_id = %enrollment.id,
            status = %enrollment.status,
            "enrollment status changed"
        );
        self.publish_status(&enrollment);

        Ok(enrollment)
    }

    /// All enrollments of a program, for the admin review list.
    pub async fn program_enrollments(
        &self,
        program: &ProgramId,
    ) -> Result<Vec<Enrollment>, RosterError> {
        Ok(self.store.enrollments_for_program(program).await?)
    }

    fn publish_status(&self, enrollment: &Enrollment) {
        self.bus.publish(&RosterEvent::ApplicationStatusChanged {
            enrollment_id: enrollment.id,
            participant: enrollment.participant.clone(),
            program: enrollment.program.clone(),
            status: enrollment.status,
        });
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════
