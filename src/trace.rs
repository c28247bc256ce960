//! # Trace Sink
//!
//! Injected trace capability shared by every invocation. Sinks are append-only
//! and must accept events concurrently from the request path and from detached
//! tasks without interleaving corruption.
//!
//! [`TracingSink`] forwards events to the `tracing` ecosystem and is what the
//! server uses. [`RecordingSink`] keeps events in append order so the ordering
//! between the response path and background work can be inspected.

use parking_lot::Mutex;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What happened during an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceKind {
    InvocationReceived,
    ReadStarted,
    ReadCompleted,
    ReadFailed,
    AuxiliaryCompleted,
    AuxiliaryFailed,
    /// Background work is about to be handed to the detached task group.
    BackgroundLaunched,
    ResponseWritten,
    /// Emitted once the response has been written while background work may still run.
    AfterResponse,
    InvocationCompleted,
}

impl TraceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceKind::InvocationReceived => "invocation_received",
            TraceKind::ReadStarted => "read_started",
            TraceKind::ReadCompleted => "read_completed",
            TraceKind::ReadFailed => "read_failed",
            TraceKind::AuxiliaryCompleted => "auxiliary_completed",
            TraceKind::AuxiliaryFailed => "auxiliary_failed",
            TraceKind::BackgroundLaunched => "background_launched",
            TraceKind::ResponseWritten => "response_written",
            TraceKind::AfterResponse => "after_response",
            TraceKind::InvocationCompleted => "invocation_completed",
        }
    }

    fn is_failure(&self) -> bool {
        matches!(self, TraceKind::ReadFailed | TraceKind::AuxiliaryFailed)
    }
}

impl fmt::Display for TraceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct TraceEvent {
    pub invocation_id: Uuid,
    pub kind: TraceKind,
    pub detail: Option<String>,
    pub at: Instant,
}

impl TraceEvent {
    pub fn new(invocation_id: Uuid, kind: TraceKind, detail: Option<String>) -> Self {
        Self {
            invocation_id,
            kind,
            detail,
            at: Instant::now(),
        }
    }
}

pub trait TraceSink: Send + Sync + fmt::Debug {
    fn record(&self, event: TraceEvent);
}

/// Sink that forwards every event to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn record(&self, event: TraceEvent) {
        let detail = event.detail.as_deref().unwrap_or("");
        match event.kind {
            kind if kind.is_failure() => warn!(
                invocation_id = %event.invocation_id,
                event = %kind,
                detail = %detail,
                "Contact invocation trace"
            ),
            TraceKind::InvocationCompleted => info!(
                invocation_id = %event.invocation_id,
                event = %event.kind,
                detail = %detail,
                "Contact invocation trace"
            ),
            kind => debug!(
                invocation_id = %event.invocation_id,
                event = %kind,
                detail = %detail,
                "Contact invocation trace"
            ),
        }
    }
}

/// Sink that keeps events in the order they were appended.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TraceEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.lock().clone()
    }

    pub fn kinds(&self) -> Vec<TraceKind> {
        self.events.lock().iter().map(|e| e.kind).collect()
    }

    pub fn contains(&self, kind: TraceKind) -> bool {
        self.events.lock().iter().any(|e| e.kind == kind)
    }

    /// Append position of the first event of `kind`, if any.
    pub fn position(&self, kind: TraceKind) -> Option<usize> {
        self.events.lock().iter().position(|e| e.kind == kind)
    }

    pub fn first(&self, kind: TraceKind) -> Option<TraceEvent> {
        self.events.lock().iter().find(|e| e.kind == kind).cloned()
    }
}

impl TraceSink for RecordingSink {
    fn record(&self, event: TraceEvent) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_recording_sink_preserves_append_order() {
        let sink = RecordingSink::new();
        let id = Uuid::new_v4();

        sink.record(TraceEvent::new(id, TraceKind::ReadStarted, None));
        sink.record(TraceEvent::new(id, TraceKind::ReadCompleted, None));
        sink.record(TraceEvent::new(id, TraceKind::ResponseWritten, None));

        assert_eq!(
            sink.kinds(),
            vec![
                TraceKind::ReadStarted,
                TraceKind::ReadCompleted,
                TraceKind::ResponseWritten
            ]
        );
        assert_eq!(sink.position(TraceKind::ResponseWritten), Some(2));
        assert_eq!(sink.position(TraceKind::ReadFailed), None);
    }

    #[tokio::test]
    async fn test_recording_sink_accepts_concurrent_appends() {
        let sink = Arc::new(RecordingSink::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let sink = sink.clone();
            handles.push(tokio::spawn(async move {
                let id = Uuid::new_v4();
                for _ in 0..50 {
                    sink.record(TraceEvent::new(id, TraceKind::AuxiliaryCompleted, None));
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(sink.events().len(), 400);
    }

    #[test]
    fn test_tracing_sink_accepts_every_kind() {
        let sink = TracingSink;
        let id = Uuid::new_v4();
        for kind in [
            TraceKind::ReadFailed,
            TraceKind::InvocationCompleted,
            TraceKind::BackgroundLaunched,
        ] {
            sink.record(TraceEvent::new(id, kind, Some("detail".to_string())));
        }
    }
}
