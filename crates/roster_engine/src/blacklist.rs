//! # Blacklist Policy Engine
//!
//! Ban lifecycle: suggestion, application, lift, and the enforcement
//! check consumed by the enrollment gate.
//!
//! ## Policy
//!
//! - Suggestion is advisory. Reaching the absence threshold never
//!   creates a ban; an administrator must apply one explicitly.
//! - One enforced ban per participant at a time. Applying a second
//!   while one is enforced fails with `BanConflict`; lifted or
//!   expired records never block a new ban.
//! - A lift clears the persisted `active` flag and is terminal for
//!   that record. Re-banning creates a new record, keeping the full
//!   audit trail.
//! - Email delivery runs after the ban write is acknowledged and is
//!   non-fatal: a sink failure is logged, the ban stands.

use std::sync::Arc;

use tracing::{info, warn};

use roster_common::{
    ban_expiry, BlacklistRecord, ParticipantId, ProgramId, RosterError, RosterEvent, RosterStore,
};
use uuid::Uuid;

use crate::absence::AbsenceCounter;
use crate::bus::NotificationBus;
use crate::config::EngineConfig;
use crate::notify::NotificationSink;

/// Ban lifecycle component.
pub struct BlacklistPolicyEngine {
    store: Arc<dyn RosterStore>,
    bus: Arc<NotificationBus>,
    sink: Arc<dyn NotificationSink>,
    counter: AbsenceCounter,
    config: EngineConfig,
}

impl BlacklistPolicyEngine {
    /// Creates a policy engine over the given collaborators.
    pub fn new(
        store: Arc<dyn RosterStore>,
        bus: Arc<NotificationBus>,
        sink: Arc<dyn NotificationSink>,
        config: EngineConfig,
    ) -> Self {
        let counter = AbsenceCounter::new(store.clone(), config.absence_threshold);
        Self {
            store,
            bus,
            sink,
            counter,
            config,
        }
    }

    /// The absence counter backing suggestions.
    #[must_use]
    pub fn absence_counter(&self) -> &AbsenceCounter {
        &self.counter
    }

    // ── suggestion ────────────────────────────────────────────────────────

    /// Whether the participant's absence count in the program has
    /// reached the configured threshold. Advisory only.
    pub async fn suggest_blacklist(
        &self,
        participant: &ParticipantId,
        program: &ProgramId,
    ) -> Result<bool, RosterError> {
        self.counter.threshold_reached(participant, program).await
    }

    // ── application ───────────────────────────────────────────────────────

    /// Applies a participation ban.
    ///
    /// `months` defaults to the configured duration when `None`.
    /// `program` is recorded for the audit trail only; enforcement
    /// is participant-global.
    ///
    /// ## Errors
    ///
    /// - `RosterError::Validation` if `reason` is empty or blank.
    /// - `RosterError::BanConflict` if a ban is already enforced at
    ///   `now`; `existing_until` carries the latest conflicting
    ///   expiry.
    /// - `RosterError::Storage` if the write fails; nothing is
    ///   published or emailed in that case.
    pub async fn apply_ban(
        &self,
        participant: ParticipantId,
        program: Option<ProgramId>,
        reason: &str,
        applied_by: &str,
        months: Option<u32>,
        now: u64,
    ) -> Result<BlacklistRecord, RosterError> {
        if reason.trim().is_empty() {
            return Err(RosterError::Validation("ban reason must not be empty".into()));
        }

        let enforced = self.store.enforced_bans(&participant, now).await?;
        if let Some(until) = enforced.iter().map(|b| b.banned_until).max() {
            return Err(RosterError::BanConflict {
                existing_until: until,
            });
        }

        let months = months.unwrap_or(self.config.default_ban_months);
        let record = BlacklistRecord::new(
            participant,
            program,
            reason,
            now,
            ban_expiry(now, months),
            applied_by,
        );
        self.store.insert_ban(record.clone()).await?;

        info!(
            ban_id = %record.id,
            participant = record.participant.as_str(),
            banned_until = record.banned_until,
            months,
            "participation ban applied"
        );
        self.bus.publish(&RosterEvent::BanApplied {
            ban_id: record.id,
            participant: record.participant.clone(),
            banned_until: record.banned_until,
        });
        if let Err(err) = self.sink.ban_applied(&record) {
            // Non-fatal: the ban stands even if the email does not go out.
            warn!(ban_id = %record.id, error = %err, "ban notification delivery failed");
        }

        Ok(record)
    }

    // ── lift ──────────────────────────────────────────────────────────────

    /// Lifts a ban by record id, clearing its `active` flag.
    ///
    /// Lifting works on expired-but-active records too; it is how
    /// their audit state is closed out.
    ///
    /// ## Errors
    ///
    /// - `RosterError::NotFound` if no record with the id exists.
    /// - `RosterError::AlreadyLifted` if the record's flag is
    ///   already cleared.
    pub async fn lift_ban(
        &self,
        ban_id: Uuid,
        lifted_by: &str,
    ) -> Result<BlacklistRecord, RosterError> {
        let mut record = self
            .store
            .ban(ban_id)
            .await?
            .ok_or(RosterError::NotFound { id: ban_id })?;
        if !record.active {
            return Err(RosterError::AlreadyLifted { ban_id });
        }

        record.active = false;
        self.store.update_ban(record.clone()).await?;

        info!(
            ban_id = %record.id,
            participant = record.participant.as_str(),
            lifted_by,
            "participation ban lifted"
        );
        self.bus.publish(&RosterEvent::BanLifted {
            ban_id: record.id,
            participant: record.participant.clone(),
        });
        if let Err(err) = self.sink.ban_lifted(&record) {
            warn!(ban_id = %record.id, error = %err, "lift notification delivery failed");
        }

        Ok(record)
    }

    // ── enforcement ───────────────────────────────────────────────────────

    /// Whether any ban is enforced against the participant at
    /// `as_of`. Recomputed from persisted state on every call.
    pub async fn is_banned(
        &self,
        participant: &ParticipantId,
        as_of: u64,
    ) -> Result<bool, RosterError> {
        Ok(!self.store.enforced_bans(participant, as_of).await?.is_empty())
    }

    /// The latest expiry among bans enforced at `as_of`, if any.
    pub async fn enforced_until(
        &self,
        participant: &ParticipantId,
        as_of: u64,
    ) -> Result<Option<u64>, RosterError> {
        let enforced = self.store.enforced_bans(participant, as_of).await?;
        Ok(enforced.iter().map(|b| b.banned_until).max())
    }

    /// Full ban history of a participant, lifted and expired
    /// included.
    pub async fn ban_history(
        &self,
        participant: &ParticipantId,
    ) -> Result<Vec<BlacklistRecord>, RosterError> {
        Ok(self.store.bans_for_participant(participant).await?)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════
