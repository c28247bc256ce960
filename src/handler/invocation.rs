//! # Invocation
//!
//! Per-request context binding one inbound call to its trace events and its
//! single response write. [`Invocation::respond`] and [`Invocation::fail`]
//! consume the invocation, so each call ends exactly once.

use axum::response::Response;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ContactApiError, Result};
use crate::handler::policy::ConcurrencyPolicy;
use crate::handler::writer::ResponseWriter;
use crate::models::ContactResponse;
use crate::trace::{TraceEvent, TraceKind, TraceSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationPhase {
    Received,
    Reading,
    ReadingWithAuxiliary,
    Responded,
}

impl fmt::Display for InvocationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvocationPhase::Received => "received",
            InvocationPhase::Reading => "reading",
            InvocationPhase::ReadingWithAuxiliary => "reading_with_auxiliary",
            InvocationPhase::Responded => "responded",
        };
        f.write_str(name)
    }
}

/// Cloneable handle for recording events against one invocation, including
/// from detached tasks that outlive it.
#[derive(Debug, Clone)]
pub struct InvocationTracer {
    id: Uuid,
    sink: Arc<dyn TraceSink>,
}

impl InvocationTracer {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn record(&self, kind: TraceKind, detail: Option<String>) {
        self.sink.record(TraceEvent::new(self.id, kind, detail));
    }
}

#[derive(Debug)]
pub struct Invocation {
    tracer: InvocationTracer,
    policy: ConcurrencyPolicy,
    path: Vec<InvocationPhase>,
    started: Instant,
}

impl Invocation {
    pub fn begin(policy: ConcurrencyPolicy, sink: Arc<dyn TraceSink>) -> Self {
        let tracer = InvocationTracer {
            id: Uuid::new_v4(),
            sink,
        };
        tracer.record(TraceKind::InvocationReceived, Some(policy.to_string()));

        Self {
            tracer,
            policy,
            path: vec![InvocationPhase::Received],
            started: Instant::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.tracer.id
    }

    pub fn policy(&self) -> ConcurrencyPolicy {
        self.policy
    }

    pub fn phase(&self) -> InvocationPhase {
        self.path.last().copied().unwrap_or(InvocationPhase::Received)
    }

    /// Phases entered so far, oldest first.
    pub fn path(&self) -> &[InvocationPhase] {
        &self.path
    }

    pub fn tracer(&self) -> InvocationTracer {
        self.tracer.clone()
    }

    pub fn enter(&mut self, phase: InvocationPhase) {
        debug!(
            invocation_id = %self.tracer.id,
            from = %self.phase(),
            to = %phase,
            "Invocation phase change"
        );
        self.path.push(phase);
    }

    /// Write the response. The only way to produce a successful reply.
    pub fn respond(
        mut self,
        writer: &dyn ResponseWriter,
        response: ContactResponse,
    ) -> Result<Responded> {
        match writer.write(&response) {
            Ok(http) => {
                self.enter(InvocationPhase::Responded);
                self.tracer.record(
                    TraceKind::ResponseWritten,
                    Some(format!("contact_key={}", response.contact_key)),
                );
                Ok(Responded {
                    tracer: self.tracer,
                    path: self.path,
                    started: self.started,
                    response: http,
                })
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// End the invocation without a response, handing the error back for the transport.
    pub fn fail(self, error: ContactApiError) -> ContactApiError {
        self.tracer.record(
            TraceKind::InvocationCompleted,
            Some(format!(
                "failed in {} ms: {error}",
                self.started.elapsed().as_millis()
            )),
        );
        error
    }
}

/// An invocation whose response has been written.
#[derive(Debug)]
pub struct Responded {
    tracer: InvocationTracer,
    path: Vec<InvocationPhase>,
    started: Instant,
    response: Response,
}

impl Responded {
    pub fn trace(&self, kind: TraceKind, detail: impl Into<String>) {
        self.tracer.record(kind, Some(detail.into()));
    }

    pub fn finish(self) -> Response {
        self.tracer.record(
            TraceKind::InvocationCompleted,
            Some(format!(
                "Completed in {} ms via {}",
                self.started.elapsed().as_millis(),
                format_path(&self.path)
            )),
        );
        self.response
    }
}

fn format_path(path: &[InvocationPhase]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::writer::JsonResponseWriter;
    use crate::trace::RecordingSink;

    #[derive(Debug)]
    struct BrokenWriter;

    impl ResponseWriter for BrokenWriter {
        fn write(&self, _response: &ContactResponse) -> Result<Response> {
            Err(ContactApiError::serialization("encoder unavailable"))
        }
    }

    #[test]
    fn test_respond_records_write_then_completion() {
        let sink = Arc::new(RecordingSink::new());
        let invocation = Invocation::begin(ConcurrencyPolicy::Sequential, sink.clone());
        let id = invocation.id();

        let responded = invocation
            .respond(&JsonResponseWriter, ContactResponse::generate())
            .unwrap();
        let _response = responded.finish();

        assert_eq!(
            sink.kinds(),
            vec![
                TraceKind::InvocationReceived,
                TraceKind::ResponseWritten,
                TraceKind::InvocationCompleted
            ]
        );
        assert!(sink.events().iter().all(|e| e.invocation_id == id));
    }

    #[test]
    fn test_writer_failure_ends_invocation_without_response() {
        let sink = Arc::new(RecordingSink::new());
        let invocation = Invocation::begin(ConcurrencyPolicy::ConcurrentAwait, sink.clone());

        let err = invocation
            .respond(&BrokenWriter, ContactResponse::generate())
            .unwrap_err();

        assert!(matches!(err, ContactApiError::Serialization(_)));
        assert!(!sink.contains(TraceKind::ResponseWritten));
        assert!(sink.contains(TraceKind::InvocationCompleted));
    }

    #[test]
    fn test_phase_transitions() {
        let sink = Arc::new(RecordingSink::new());
        let mut invocation = Invocation::begin(ConcurrencyPolicy::ConcurrentAwait, sink);
        assert_eq!(invocation.phase(), InvocationPhase::Received);

        invocation.enter(InvocationPhase::ReadingWithAuxiliary);
        assert_eq!(invocation.phase(), InvocationPhase::ReadingWithAuxiliary);
        assert_eq!(invocation.policy(), ConcurrencyPolicy::ConcurrentAwait);
        assert_eq!(
            invocation.path(),
            &[InvocationPhase::Received, InvocationPhase::ReadingWithAuxiliary]
        );
    }

    #[test]
    fn test_completion_reports_phase_path() {
        let sink = Arc::new(RecordingSink::new());
        let mut invocation = Invocation::begin(ConcurrencyPolicy::Sequential, sink.clone());
        invocation.enter(InvocationPhase::Reading);

        let _response = invocation
            .respond(&JsonResponseWriter, ContactResponse::generate())
            .unwrap()
            .finish();

        let detail = sink
            .first(TraceKind::InvocationCompleted)
            .unwrap()
            .detail
            .unwrap();
        assert!(detail.ends_with("via received -> reading -> responded"));
    }
}
