//! # Email Sink Boundary
//!
//! Outbound notification contract for ban lifecycle messages. The
//! policy engine calls the sink after a ban write has been durably
//! acknowledged; delivery failures are logged and never roll back
//! the ban itself.
//!
//! Production backends wrap an SMTP relay or a hosted mail API. The
//! test doubles here ([`RecordingSink`], [`FailingSink`]) keep policy
//! tests hermetic.

use parking_lot::Mutex;
use thiserror::Error;

use roster_common::BlacklistRecord;

/// Delivery failure reported by a sink backend.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SinkError {
    /// The message could not be handed to the transport.
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Outbound notification channel for ban lifecycle messages.
///
/// Implementations must be cheap to call from the policy engine's
/// write path; slow transports should queue internally.
pub trait NotificationSink: Send + Sync + 'static {
    /// Called after a ban has been applied and persisted.
    fn ban_applied(&self, record: &BlacklistRecord) -> Result<(), SinkError>;

    /// Called after a ban has been lifted and persisted.
    fn ban_lifted(&self, record: &BlacklistRecord) -> Result<(), SinkError>;
}

// ════════════════════════════════════════════════════════════════════════════
// TEST / LOCAL-RUN SINKS
// ════════════════════════════════════════════════════════════════════════════

/// Sink that drops every message. Useful for local runs with no mail
/// transport configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn ban_applied(&self, _record: &BlacklistRecord) -> Result<(), SinkError> {
        Ok(())
    }

    fn ban_lifted(&self, _record: &BlacklistRecord) -> Result<(), SinkError> {
        Ok(())
    }
}

/// One recorded delivery attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkCall {
    Applied(BlacklistRecord),
    Lifted(BlacklistRecord),
}

/// Sink that records every delivery for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<SinkCall>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded deliveries, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn ban_applied(&self, record: &BlacklistRecord) -> Result<(), SinkError> {
        self.calls.lock().push(SinkCall::Applied(record.clone()));
        Ok(())
    }

    fn ban_lifted(&self, record: &BlacklistRecord) -> Result<(), SinkError> {
        self.calls.lock().push(SinkCall::Lifted(record.clone()));
        Ok(())
    }
}

/// Sink whose every delivery fails, for exercising the non-fatal
/// failure path in the policy engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingSink;

impl NotificationSink for FailingSink {
    fn ban_applied(&self, _record: &BlacklistRecord) -> Result<(), SinkError> {
        Err(SinkError::Delivery("transport unreachable".into()))
    }

    fn ban_lifted(&self, _record: &BlacklistRecord) -> Result<(), SinkError> {
        Err(SinkError::Delivery("transport unreachable".into()))
    }
}
