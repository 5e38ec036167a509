//! # In-Memory Store
//!
//! A fully in-memory [`RosterStore`] implementation used by tests
//! and local runs. No network calls, no persistence.
//!
//! ## Features
//!
//! - Deterministic: listings are sorted, never `HashMap`-ordered.
//! - Injectable write failure for partial-failure tests
//!   ([`MemoryStore::set_fail_writes`]): while enabled, every
//!   mutating method returns `StoreError::Unavailable` without
//!   touching state. Reads are unaffected.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::attendance::{AttendanceKey, AttendanceRecord};
use crate::ban::BlacklistRecord;
use crate::date::SessionDate;
use crate::enrollment::{Enrollment, EnrollmentStatus};
use crate::error::StoreError;
use crate::ids::{ParticipantId, ProgramId};
use crate::store::RosterStore;

/// In-memory [`RosterStore`] backend.
#[derive(Default)]
pub struct MemoryStore {
    attendance: RwLock<HashMap<AttendanceKey, AttendanceRecord>>,
    bans: RwLock<HashMap<Uuid, BlacklistRecord>>,
    enrollments: RwLock<HashMap<Uuid, Enrollment>>,
    fail_writes: AtomicBool,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("attendance_count", &self.attendance.read().len())
            .field("ban_count", &self.bans.read().len())
            .field("enrollment_count", &self.enrollments.read().len())
            .field("fail_writes", &self.fail_writes.load(Ordering::SeqCst))
            .finish()
    }
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles write failure. While `true`, every mutating method
    /// fails with `StoreError::Unavailable` and state is untouched.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write failure injected".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RosterStore for MemoryStore {
    async fn upsert_attendance(
        &self,
        record: AttendanceRecord,
    ) -> Result<AttendanceRecord, StoreError> {
        self.check_writable()?;
        let key = record.key();
        let mut attendance = self.attendance.write();
        let stored = match attendance.get_mut(&key) {
            Some(existing) => {
                // Overwrite in place; the original id survives.
                existing.status = record.status;
                existing.note = record.note;
                existing.clone()
            }
            None => {
                attendance.insert(key.clone(), record.clone());
                record
            }
        };
        debug!(
            participant = %key.participant,
            program = %key.program,
            date = %key.date,
            "attendance upserted"
        );
        Ok(stored)
    }

    async fn attendance_for_program(
        &self,
        program: &ProgramId,
        date: Option<SessionDate>,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let mut records: Vec<AttendanceRecord> = self
            .attendance
            .read()
            .values()
            .filter(|r| r.program == *program && date.map_or(true, |d| r.date == d))
            .cloned()
            .collect();
        records.sort_by(|a, b| (a.date, &a.participant).cmp(&(b.date, &b.participant)));
        Ok(records)
    }

    async fn attendance_for_participant(
        &self,
        participant: &ParticipantId,
        program: &ProgramId,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let mut records: Vec<AttendanceRecord> = self
            .attendance
            .read()
            .values()
            .filter(|r| r.participant == *participant && r.program == *program)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    async fn insert_ban(&self, record: BlacklistRecord) -> Result<(), StoreError> {
        self.check_writable()?;
        self.bans.write().insert(record.id, record);
        Ok(())
    }

    async fn ban(&self, id: Uuid) -> Result<Option<BlacklistRecord>, StoreError> {
        Ok(self.bans.read().get(&id).cloned())
    }

    async fn update_ban(&self, record: BlacklistRecord) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut bans = self.bans.write();
        if !bans.contains_key(&record.id) {
            return Err(StoreError::NotFound);
        }
        bans.insert(record.id, record);
        Ok(())
    }

    async fn bans_for_participant(
        &self,
        participant: &ParticipantId,
    ) -> Result<Vec<BlacklistRecord>, StoreError> {
        let mut records: Vec<BlacklistRecord> = self
            .bans
            .read()
            .values()
            .filter(|r| r.participant == *participant)
            .cloned()
            .collect();
        records.sort_by_key(|r| (r.banned_at, r.id));
        Ok(records)
    }

    async fn enforced_bans(
        &self,
        participant: &ParticipantId,
        as_of: u64,
    ) -> Result<Vec<BlacklistRecord>, StoreError> {
        let mut records: Vec<BlacklistRecord> = self
            .bans
            .read()
            .values()
            .filter(|r| r.participant == *participant && r.is_enforced(as_of))
            .cloned()
            .collect();
        records.sort_by_key(|r| (r.banned_at, r.id));
        Ok(records)
    }

    async fn insert_enrollment(&self, enrollment: Enrollment) -> Result<(), StoreError> {
        self.check_writable()?;
        self.enrollments.write().insert(enrollment.id, enrollment);
        Ok(())
    }

    async fn enrollment(&self, id: Uuid) -> Result<Option<Enrollment>, StoreError> {
        Ok(self.enrollments.read().get(&id).cloned())
    }

    async fn set_enrollment_status(
        &self,
        id: Uuid,
        status: EnrollmentStatus,
    ) -> Result<Enrollment, StoreError> {
        self.check_writable()?;
        let mut enrollments = self.enrollments.write();
        let enrollment = enrollments.get_mut(&id).ok_or(StoreError::NotFound)?;
        enrollment.status = status;
        Ok(enrollment.clone())
    }

    async fn enrollments_for_program(
        &self,
        program: &ProgramId,
    ) -> Result<Vec<Enrollment>, StoreError> {
        let mut records: Vec<Enrollment> = self
            .enrollments
            .read()
            .values()
            .filter(|e| e.program == *program)
            .cloned()
            .collect();
        records.sort_by(|a, b| (&a.participant, a.id).cmp(&(&b.participant, b.id)));
        Ok(records)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::AttendanceStatus;

    const T0: u64 = 1_700_000_000;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s).expect("valid id")
    }

    fn gid(s: &str) -> ProgramId {
        ProgramId::new(s).expect("valid id")
    }

    fn date(s: &str) -> SessionDate {
        s.parse().expect("valid date")
    }

    fn attendance(p: &str, g: &str, d: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord::new(pid(p), gid(g), date(d), status, None)
    }

    fn ban(p: &str, active: bool, banned_at: u64, banned_until: u64) -> BlacklistRecord {
        BlacklistRecord {
            id: Uuid::new_v4(),
            participant: pid(p),
            program: None,
            reason: "test".to_string(),
            banned_at,
            banned_until,
            banned_by: "admin-1".to_string(),
            active,
        }
    }

    // ──────────────────────────────────────────────────────────────────────
    // A. ATTENDANCE UPSERT
    // ──────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_upsert_inserts_then_overwrites() {
        let store = MemoryStore::new();

        let first = store
            .upsert_attendance(attendance("p1", "g1", "2025-05-01", AttendanceStatus::Present))
            .await
            .expect("insert");

        let second = store
            .upsert_attendance(attendance("p1", "g1", "2025-05-01", AttendanceStatus::Absent))
            .await
            .expect("overwrite");

        // One record, original id kept, status overwritten.
        assert_eq!(second.id, first.id);
        assert_eq!(second.status, AttendanceStatus::Absent);

        let all = store
            .attendance_for_program(&gid("g1"), None)
            .await
            .expect("query");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, AttendanceStatus::Absent);
    }

    #[tokio::test]
    async fn test_upsert_distinct_dates_are_distinct_records() {
        let store = MemoryStore::new();
        for d in ["2025-05-01", "2025-05-02", "2025-05-03"] {
            store
                .upsert_attendance(attendance("p1", "g1", d, AttendanceStatus::Absent))
                .await
                .expect("insert");
        }
        let all = store
            .attendance_for_participant(&pid("p1"), &gid("g1"))
            .await
            .expect("query");
        assert_eq!(all.len(), 3);
        // Sorted by date.
        assert!(all.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[tokio::test]
    async fn test_program_query_with_date_filter() {
        let store = MemoryStore::new();
        store
            .upsert_attendance(attendance("p1", "g1", "2025-05-01", AttendanceStatus::Present))
            .await
            .expect("insert");
        store
            .upsert_attendance(attendance("p2", "g1", "2025-05-01", AttendanceStatus::Late))
            .await
            .expect("insert");
        store
            .upsert_attendance(attendance("p1", "g1", "2025-05-02", AttendanceStatus::Absent))
            .await
            .expect("insert");
        store
            .upsert_attendance(attendance("p1", "g2", "2025-05-01", AttendanceStatus::Present))
            .await
            .expect("insert");

        let day_one = store
            .attendance_for_program(&gid("g1"), Some(date("2025-05-01")))
            .await
            .expect("query");
        assert_eq!(day_one.len(), 2);

        let all_g1 = store
            .attendance_for_program(&gid("g1"), None)
            .await
            .expect("query");
        assert_eq!(all_g1.len(), 3);
    }

    // ──────────────────────────────────────────────────────────────────────
    // B. BAN RANGE QUERIES
    // ──────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_enforced_bans_filters_on_both_fields() {
        let store = MemoryStore::new();
        store.insert_ban(ban("p1", true, T0, T0 + 100)).await.expect("insert");
        store.insert_ban(ban("p1", true, T0 - 500, T0 - 1)).await.expect("insert");
        store.insert_ban(ban("p1", false, T0, T0 + 100)).await.expect("insert");
        store.insert_ban(ban("p2", true, T0, T0 + 100)).await.expect("insert");

        let enforced = store.enforced_bans(&pid("p1"), T0).await.expect("query");
        assert_eq!(enforced.len(), 1);
        assert!(enforced[0].active);
        assert!(enforced[0].banned_until > T0);

        // Same records, later clock: nothing enforced.
        let later = store.enforced_bans(&pid("p1"), T0 + 100).await.expect("query");
        assert!(later.is_empty());
    }

    #[tokio::test]
    async fn test_bans_for_participant_keeps_audit_trail() {
        let store = MemoryStore::new();
        store.insert_ban(ban("p1", false, T0 - 100, T0 - 50)).await.expect("insert");
        store.insert_ban(ban("p1", true, T0, T0 + 100)).await.expect("insert");

        let all = store.bans_for_participant(&pid("p1")).await.expect("query");
        assert_eq!(all.len(), 2);
        // Sorted by banned_at.
        assert!(all[0].banned_at < all[1].banned_at);
    }

    #[tokio::test]
    async fn test_update_ban_unknown_id_fails() {
        let store = MemoryStore::new();
        let err = store
            .update_ban(ban("p1", false, T0, T0 + 100))
            .await
            .expect_err("must fail");
        assert_eq!(err, StoreError::NotFound);
    }

    // ──────────────────────────────────────────────────────────────────────
    // C. ENROLLMENTS
    // ──────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_enrollment_status_update() {
        let store = MemoryStore::new();
        let e = Enrollment::pending(pid("p1"), gid("g1"));
        store.insert_enrollment(e.clone()).await.expect("insert");

        let updated = store
            .set_enrollment_status(e.id, EnrollmentStatus::Approved)
            .await
            .expect("update");
        assert_eq!(updated.status, EnrollmentStatus::Approved);

        let fetched = store.enrollment(e.id).await.expect("fetch").expect("exists");
        assert_eq!(fetched.status, EnrollmentStatus::Approved);
    }

    #[tokio::test]
    async fn test_enrollment_status_update_unknown_id() {
        let store = MemoryStore::new();
        let err = store
            .set_enrollment_status(Uuid::new_v4(), EnrollmentStatus::Approved)
            .await
            .expect_err("must fail");
        assert_eq!(err, StoreError::NotFound);
    }

    // ──────────────────────────────────────────────────────────────────────
    // D. FAILURE INJECTION
    // ──────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_fail_writes_blocks_mutations_not_reads() {
        let store = MemoryStore::new();
        store
            .upsert_attendance(attendance("p1", "g1", "2025-05-01", AttendanceStatus::Absent))
            .await
            .expect("insert");

        store.set_fail_writes(true);

        let err = store
            .upsert_attendance(attendance("p1", "g1", "2025-05-02", AttendanceStatus::Absent))
            .await
            .expect_err("writes fail");
        assert!(matches!(err, StoreError::Unavailable(_)));

        // Reads still work and see only the pre-failure state.
        let all = store
            .attendance_for_participant(&pid("p1"), &gid("g1"))
            .await
            .expect("read");
        assert_eq!(all.len(), 1);

        store.set_fail_writes(false);
        store
            .upsert_attendance(attendance("p1", "g1", "2025-05-02", AttendanceStatus::Absent))
            .await
            .expect("writes recover");
    }
}
