//! # Store Boundary
//!
//! The [`RosterStore`] trait is the subsystem's contract with the
//! hosted persistent store. Only two capabilities are genuinely
//! required of a backend: idempotent upsert of attendance records by
//! composite key, and a range query over `banned_until` relative to
//! a caller-supplied timestamp. Everything else is plain keyed CRUD.
//!
//! ## Contract for Implementors
//!
//! - Thread-safe (`Send + Sync`); methods may be called concurrently.
//! - `upsert_attendance` must be idempotent per [`AttendanceKey`]:
//!   writing the same key twice yields one record, and the stored
//!   record keeps its original id across overwrites.
//! - Listing methods return deterministically ordered results so
//!   derived views are stable across calls.
//! - Concurrent writes to the same attendance key resolve
//!   last-write-wins; no version token is offered and lost updates
//!   are possible by design at this layer.
//! - No retry, backoff, or timeout beyond the transport's own.

use async_trait::async_trait;
use uuid::Uuid;

use crate::attendance::AttendanceRecord;
use crate::ban::BlacklistRecord;
use crate::date::SessionDate;
use crate::enrollment::{Enrollment, EnrollmentStatus};
use crate::error::StoreError;
use crate::ids::{ParticipantId, ProgramId};

/// Persistent-store contract for attendance, blacklist, and
/// enrollment records.
#[async_trait]
pub trait RosterStore: Send + Sync + 'static {
    // ── attendance ────────────────────────────────────────────────────────

    /// Upserts the unique record for the record's composite key and
    /// returns the stored result.
    ///
    /// If a record already exists for (participant, program, date),
    /// its `status` and `note` are overwritten and its id is kept;
    /// otherwise the given record is inserted as-is.
    async fn upsert_attendance(
        &self,
        record: AttendanceRecord,
    ) -> Result<AttendanceRecord, StoreError>;

    /// All attendance records of a program, optionally narrowed to a
    /// single day. Ordered by (date, participant).
    async fn attendance_for_program(
        &self,
        program: &ProgramId,
        date: Option<SessionDate>,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// All attendance records of one participant within one program.
    /// Ordered by date.
    async fn attendance_for_participant(
        &self,
        participant: &ParticipantId,
        program: &ProgramId,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    // ── blacklist ─────────────────────────────────────────────────────────

    /// Inserts a new blacklist record.
    async fn insert_ban(&self, record: BlacklistRecord) -> Result<(), StoreError>;

    /// Fetches a blacklist record by id.
    async fn ban(&self, id: Uuid) -> Result<Option<BlacklistRecord>, StoreError>;

    /// Replaces an existing blacklist record (used by lift).
    ///
    /// ## Errors
    ///
    /// `StoreError::NotFound` if no record with the given id exists.
    async fn update_ban(&self, record: BlacklistRecord) -> Result<(), StoreError>;

    /// All blacklist records of a participant, lifted and expired
    /// included (audit trail). Ordered by (banned_at, id).
    async fn bans_for_participant(
        &self,
        participant: &ParticipantId,
    ) -> Result<Vec<BlacklistRecord>, StoreError>;

    /// Range query: the participant's records with `active == true`
    /// AND `banned_until > as_of`. Ordered by (banned_at, id).
    async fn enforced_bans(
        &self,
        participant: &ParticipantId,
        as_of: u64,
    ) -> Result<Vec<BlacklistRecord>, StoreError>;

    // ── enrollments ───────────────────────────────────────────────────────

    /// Inserts a new enrollment.
    async fn insert_enrollment(&self, enrollment: Enrollment) -> Result<(), StoreError>;

    /// Fetches an enrollment by id.
    async fn enrollment(&self, id: Uuid) -> Result<Option<Enrollment>, StoreError>;

    /// Sets an enrollment's approval state and returns the updated
    /// record.
    ///
    /// ## Errors
    ///
    /// `StoreError::NotFound` if no enrollment with the given id
    /// exists.
    async fn set_enrollment_status(
        &self,
        id: Uuid,
        status: EnrollmentStatus,
    ) -> Result<Enrollment, StoreError>;

    /// All enrollments of a program. Ordered by (participant, id).
    async fn enrollments_for_program(
        &self,
        program: &ProgramId,
    ) -> Result<Vec<Enrollment>, StoreError>;
}
