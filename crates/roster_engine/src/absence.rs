//! # Absence Counter
//!
//! Derived absence aggregate per (participant, program). Nothing is
//! cached: every call recounts from the store, so an attendance
//! correction (absent corrected to present) is reflected on the very
//! next read with no invalidation protocol.
//!
//! Only `Absent` entries count; `Late` does not.

use std::sync::Arc;

use roster_common::{AttendanceStatus, ParticipantId, ProgramId, RosterError, RosterStore};

/// Recount-on-read absence aggregate.
pub struct AbsenceCounter {
    store: Arc<dyn RosterStore>,
    threshold: u32,
}

impl AbsenceCounter {
    /// Creates a counter with the given suggestion threshold.
    pub fn new(store: Arc<dyn RosterStore>, threshold: u32) -> Self {
        Self { store, threshold }
    }

    /// Number of `Absent` entries for the participant in the
    /// program, counted fresh from the store.
    pub async fn absence_count(
        &self,
        participant: &ParticipantId,
        program: &ProgramId,
    ) -> Result<u32, RosterError> {
        let records = self
            .store
            .attendance_for_participant(participant, program)
            .await?;
        let count = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Absent)
            .count();
        Ok(count as u32)
    }

    /// Whether the absence count has reached the threshold.
    pub async fn threshold_reached(
        &self,
        participant: &ParticipantId,
        program: &ProgramId,
    ) -> Result<bool, RosterError> {
        Ok(self.absence_count(participant, program).await? >= self.threshold)
    }

    /// The configured suggestion threshold.
    #[must_use]
    #[inline]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use roster_common::{AttendanceRecord, MemoryStore, SessionDate};

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s).expect("valid id")
    }

    fn gid(s: &str) -> ProgramId {
        ProgramId::new(s).expect("valid id")
    }

    async fn mark(store: &MemoryStore, day: u8, status: AttendanceStatus) {
        store
            .upsert_attendance(AttendanceRecord::new(
                pid("p1"),
                gid("g1"),
                SessionDate::new(2025, 6, day).expect("valid date"),
                status,
                None,
            ))
            .await
            .expect("write succeeds");
    }

    // ──────────────────────────────────────────────────────────────────────
    // A. COUNTING
    // ──────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_counts_only_absences() {
        let store = Arc::new(MemoryStore::new());
        mark(&store, 1, AttendanceStatus::Absent).await;
        mark(&store, 2, AttendanceStatus::Present).await;
        mark(&store, 3, AttendanceStatus::Late).await;
        mark(&store, 4, AttendanceStatus::Absent).await;

        let counter = AbsenceCounter::new(store, 3);
        assert_eq!(
            counter
                .absence_count(&pid("p1"), &gid("g1"))
                .await
                .expect("count succeeds"),
            2
        );
    }

    #[tokio::test]
    async fn test_empty_history_counts_zero() {
        let counter = AbsenceCounter::new(Arc::new(MemoryStore::new()), 3);
        assert_eq!(
            counter
                .absence_count(&pid("p1"), &gid("g1"))
                .await
                .expect("count succeeds"),
            0
        );
    }

    // ──────────────────────────────────────────────────────────────────────
    // B. CORRECTION VISIBILITY
    // ──────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_correction_reflected_on_next_read() {
        let store = Arc::new(MemoryStore::new());
        mark(&store, 1, AttendanceStatus::Absent).await;
        mark(&store, 2, AttendanceStatus::Absent).await;

        let counter = AbsenceCounter::new(store.clone(), 3);
        assert_eq!(
            counter
                .absence_count(&pid("p1"), &gid("g1"))
                .await
                .expect("count succeeds"),
            2
        );

        // Overwrite day 2 to present; no cache to invalidate.
        mark(&store, 2, AttendanceStatus::Present).await;
        assert_eq!(
            counter
                .absence_count(&pid("p1"), &gid("g1"))
                .await
                .expect("count succeeds"),
            1
        );
    }

    // ──────────────────────────────────────────────────────────────────────
    // C. THRESHOLD
    // ──────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_threshold_boundary() {
        let store = Arc::new(MemoryStore::new());
        let counter = AbsenceCounter::new(store.clone(), 3);

        mark(&store, 1, AttendanceStatus::Absent).await;
        mark(&store, 2, AttendanceStatus::Absent).await;
        assert!(!counter
            .threshold_reached(&pid("p1"), &gid("g1"))
            .await
            .expect("check succeeds"));

        mark(&store, 3, AttendanceStatus::Absent).await;
        assert!(counter
            .threshold_reached(&pid("p1"), &gid("g1"))
            .await
            .expect("check succeeds"));
    }
}
