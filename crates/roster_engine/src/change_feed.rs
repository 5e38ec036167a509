//! # Change Feed Adapter
//!
//! Bridges the hosted store's change stream onto the local
//! notification bus. Each remote mutation is translated into the
//! matching [`RosterEvent`] and published through the same path as
//! local mutations, so subscribers cannot distinguish a change made
//! on this device from one made elsewhere.
//!
//! Translation is total: every remote payload maps to exactly one
//! event, and the producing client's `origin` tag is dropped.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use roster_common::{RemoteChange, RemoteChangePayload, RosterEvent};

use crate::bus::NotificationBus;

/// Remote-change-to-bus bridge.
pub struct ChangeFeedAdapter {
    bus: Arc<NotificationBus>,
}

impl ChangeFeedAdapter {
    /// Creates an adapter publishing onto the given bus.
    pub fn new(bus: Arc<NotificationBus>) -> Self {
        Self { bus }
    }

    /// Maps a remote change onto the equivalent local event.
    ///
    /// Pure and total; the `origin` tag does not survive
    /// translation.
    #[must_use]
    pub fn translate(change: RemoteChange) -> RosterEvent {
        match change.payload {
            RemoteChangePayload::Attendance {
                participant,
                program,
                date,
                status,
            } => RosterEvent::AttendanceChanged {
                participant,
                program,
                date,
                status,
            },
            RemoteChangePayload::BanApplied {
                ban_id,
                participant,
                banned_until,
            } => RosterEvent::BanApplied {
                ban_id,
                participant,
                banned_until,
            },
            RemoteChangePayload::BanLifted { ban_id, participant } => {
                RosterEvent::BanLifted { ban_id, participant }
            }
            RemoteChangePayload::Application {
                enrollment_id,
                participant,
                program,
                status,
            } => RosterEvent::ApplicationStatusChanged {
                enrollment_id,
                participant,
                program,
                status,
            },
        }
    }

    /// Translates and publishes one remote change.
    pub fn ingest(&self, change: RemoteChange) {
        debug!(origin = %change.origin, "remote change received");
        self.bus.publish(&Self::translate(change));
    }

    /// Consumes the stream until the sender side closes.
    pub async fn run(self, mut feed: mpsc::Receiver<RemoteChange>) {
        while let Some(change) = feed.recv().await {
            self.ingest(change);
        }
        info!("change feed closed");
    }

    /// Spawns [`run`](Self::run) onto the current runtime.
    pub fn spawn(self, feed: mpsc::Receiver<RemoteChange>) -> JoinHandle<()> {
        tokio::spawn(self.run(feed))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use roster_common::{AttendanceStatus, ParticipantId, ProgramId, SessionDate};
    use uuid::Uuid;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s).expect("valid id")
    }

    fn gid(s: &str) -> ProgramId {
        ProgramId::new(s).expect("valid id")
    }

    fn attendance_change(origin: &str) -> RemoteChange {
        RemoteChange {
            origin: origin.to_string(),
            payload: RemoteChangePayload::Attendance {
                participant: pid("p1"),
                program: gid("g1"),
                date: SessionDate::new(2025, 6, 1).expect("valid date"),
                status: AttendanceStatus::Absent,
            },
        }
    }

    // ──────────────────────────────────────────────────────────────────────
    // A. TRANSLATION
    // ──────────────────────────────────────────────────────────────────────

    #[test]
    fn test_translation_drops_origin() {
        let a = ChangeFeedAdapter::translate(attendance_change("device-a"));
        let b = ChangeFeedAdapter::translate(attendance_change("device-b"));
        // Same payload from different origins yields identical events.
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_payload_variant_maps() {
        let ban_id = Uuid::new_v4();
        let cases = vec![
            attendance_change("d").payload,
            RemoteChangePayload::BanApplied {
                ban_id,
                participant: pid("p1"),
                banned_until: 100,
            },
            RemoteChangePayload::BanLifted {
                ban_id,
                participant: pid("p1"),
            },
            RemoteChangePayload::Application {
                enrollment_id: Uuid::new_v4(),
                participant: pid("p1"),
                program: gid("g1"),
                status: roster_common::EnrollmentStatus::Approved,
            },
        ];

        let events: Vec<RosterEvent> = cases
            .into_iter()
            .map(|payload| {
                ChangeFeedAdapter::translate(RemoteChange {
                    origin: "d".into(),
                    payload,
                })
            })
            .collect();

        assert!(matches!(events[0], RosterEvent::AttendanceChanged { .. }));
        assert!(matches!(events[1], RosterEvent::BanApplied { .. }));
        assert!(matches!(events[2], RosterEvent::BanLifted { .. }));
        assert!(matches!(
            events[3],
            RosterEvent::ApplicationStatusChanged { .. }
        ));
    }

    // ──────────────────────────────────────────────────────────────────────
    // B. STREAM CONSUMPTION
    // ──────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_run_publishes_in_stream_order_until_close() {
        let bus = Arc::new(NotificationBus::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = bus.subscribe(move |e| sink.lock().push(e.clone()));

        let (tx, rx) = mpsc::channel(8);
        let handle = ChangeFeedAdapter::new(bus).spawn(rx);

        tx.send(attendance_change("device-a"))
            .await
            .expect("channel open");
        tx.send(RemoteChange {
            origin: "device-b".into(),
            payload: RemoteChangePayload::BanLifted {
                ban_id: Uuid::nil(),
                participant: pid("p1"),
            },
        })
        .await
        .expect("channel open");
        drop(tx);

        handle.await.expect("adapter task completes");

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0], RosterEvent::AttendanceChanged { .. }));
        assert!(matches!(seen[1], RosterEvent::BanLifted { .. }));
    }
}
