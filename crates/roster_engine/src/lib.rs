//! # Roster Engine Crate
//!
//! Attendance tracking and participation-ban enforcement over the
//! `roster_common` store boundary.
//!
//! ## Components
//! - `config`: engine tunables (absence threshold, default ban months)
//! - `bus`: in-process notification fan-out with subscription guards
//! - `ledger`: attendance upsert writes and queries
//! - `absence`: recount-on-read absence aggregate
//! - `blacklist`: ban lifecycle and enforcement checks
//! - `enrollment`: admission-checked enrollment requests
//! - `change_feed`: remote change stream bridged onto the bus
//! - `notify`: outbound email sink boundary
//!
//! ## Data Flow
//! ```text
//!  admin action            remote client
//!       │                       │
//!       ▼                       ▼
//!  ┌─────────┐   write    ┌────────────┐
//!  │ ledger/ ├──────────► │ RosterStore│
//!  │ policy/ │   ack      └─────┬──────┘
//!  │  gate   │◄────────────────┘│ change stream
//!  └────┬────┘                  ▼
//!       │ publish        ┌────────────┐
//!       └──────────────► │ChangeFeed  │
//!                ▼       │ Adapter    │
//!         ┌───────────┐  └─────┬──────┘
//!         │   bus     │◄───────┘ publish
//!         └───────────┘
//!               │ fan-out
//!               ▼
//!          subscribers (UI views)
//! ```
//!
//! Events flow onto the bus only after the store acknowledges the
//! underlying write; subscribers never observe unpersisted state.

pub mod absence;
pub mod blacklist;
pub mod bus;
pub mod change_feed;
pub mod config;
pub mod enrollment;
pub mod ledger;
pub mod notify;

pub use absence::AbsenceCounter;
pub use blacklist::BlacklistPolicyEngine;
pub use bus::{NotificationBus, Subscription};
pub use change_feed::ChangeFeedAdapter;
pub use config::EngineConfig;
pub use enrollment::EnrollmentGate;
pub use ledger::AttendanceLedger;
pub use notify::{FailingSink, NoopSink, NotificationSink, RecordingSink, SinkCall, SinkError};
