//! # Roster Common Crate
//!
//! Shared domain types, error taxonomy, event shapes, and the
//! persistent-store boundary for the participant-roster subsystem.
//!
//! ## Modules
//! - `ids`: validated participant/program identifiers
//! - `date`: program-local calendar days
//! - `attendance`: attendance status and records
//! - `enrollment`: enrollment requests and approval states
//! - `ban`: blacklist records, derived ban state, expiry arithmetic
//! - `error`: `RosterError` / `StoreError` taxonomies
//! - `event`: bus event and remote-change shapes
//! - `store`: the `RosterStore` trait
//! - `memory_store`: in-memory backend for tests and local runs
//!
//! ## Store Architecture
//! ```text
//! ┌──────────────────┐
//! │   RosterStore    │  <- abstract trait
//! └────────┬─────────┘
//!          │
//!    ┌─────┴──────┐
//!    │            │
//! ┌──▼─────────┐  ▼
//! │MemoryStore │  (hosted backend adapters)
//! └────────────┘
//! ```

pub mod attendance;
pub mod ban;
pub mod date;
pub mod enrollment;
pub mod error;
pub mod event;
pub mod ids;
pub mod memory_store;
pub mod store;

pub use attendance::{AttendanceKey, AttendanceRecord, AttendanceStatus};
pub use ban::{ban_expiry, BanState, BlacklistRecord, DEFAULT_BAN_MONTHS, MONTH_SECS};
pub use date::SessionDate;
pub use enrollment::{Enrollment, EnrollmentStatus};
pub use error::{RosterError, StoreError};
pub use event::{RemoteChange, RemoteChangePayload, RosterEvent};
pub use ids::{ParticipantId, ProgramId};
pub use memory_store::MemoryStore;
pub use store::RosterStore;
