//! # Create Contact Handler
//!
//! Orchestrates the request read and the auxiliary work for one inbound call
//! under the configured [`ConcurrencyPolicy`], then writes exactly one response.
//!
//! | Policy | Read | Auxiliary | Response written |
//! |---|---|---|---|
//! | `Sequential` | awaited | not run | after the read |
//! | `ConcurrentAwait` | awaited | awaited, concurrently | after both |
//! | `FireAndForget` | detached | detached | immediately |
//! | `TracedFireAndForget` | detached | detached | immediately, traced before and after |
//!
//! The response key is always a fresh UUID, unrelated to the request's key.

use axum::body::Body;
use axum::response::Response;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ContactApiConfig;
use crate::error::Result;
use crate::handler::auxiliary::{AuxiliaryWorker, SimulatedWorker};
use crate::handler::detached::DetachedTasks;
use crate::handler::invocation::{Invocation, InvocationPhase, InvocationTracer};
use crate::handler::policy::ConcurrencyPolicy;
use crate::handler::reader::{JsonRequestReader, RequestReader};
use crate::handler::writer::{JsonResponseWriter, ResponseWriter};
use crate::models::{ContactRequest, ContactResponse};
use crate::trace::{TraceKind, TraceSink, TracingSink};

#[derive(Debug, Clone)]
pub struct ContactHandler {
    policy: ConcurrencyPolicy,
    reader: Arc<dyn RequestReader>,
    worker: Arc<dyn AuxiliaryWorker>,
    writer: Arc<dyn ResponseWriter>,
    sink: Arc<dyn TraceSink>,
    detached: Arc<DetachedTasks>,
}

impl ContactHandler {
    pub fn builder(policy: ConcurrencyPolicy) -> ContactHandlerBuilder {
        ContactHandlerBuilder::new(policy)
    }

    /// Handler wired with the JSON reader, simulated worker and `tracing` sink.
    pub fn from_config(config: &ContactApiConfig) -> Self {
        Self::builder(config.policy)
            .reader(JsonRequestReader::new(
                Duration::from_millis(config.read_delay_ms),
                config.body_limit_bytes,
            ))
            .worker(SimulatedWorker::new(Duration::from_millis(
                config.auxiliary_delay_ms,
            )))
            .build()
    }

    pub fn policy(&self) -> ConcurrencyPolicy {
        self.policy
    }

    pub fn detached(&self) -> &Arc<DetachedTasks> {
        &self.detached
    }

    pub async fn handle(&self, body: Body) -> Result<Response> {
        let invocation = Invocation::begin(self.policy, self.sink.clone());
        if self.policy.detaches() {
            self.handle_detached(invocation, body)
        } else if self.policy.runs_auxiliary() {
            self.handle_concurrent(invocation, body).await
        } else {
            self.handle_sequential(invocation, body).await
        }
    }

    async fn handle_sequential(&self, mut invocation: Invocation, body: Body) -> Result<Response> {
        invocation.enter(InvocationPhase::Reading);
        let tracer = invocation.tracer();

        let request = match read_traced(self.reader.as_ref(), &tracer, body).await {
            Ok(request) => request,
            Err(e) => return Err(invocation.fail(e)),
        };
        log_request(&tracer, &request);

        let responded = invocation.respond(self.writer.as_ref(), ContactResponse::generate())?;
        Ok(responded.finish())
    }

    async fn handle_concurrent(&self, mut invocation: Invocation, body: Body) -> Result<Response> {
        invocation.enter(InvocationPhase::ReadingWithAuxiliary);
        let tracer = invocation.tracer();

        let (read, ()) = tokio::join!(
            read_traced(self.reader.as_ref(), &tracer, body),
            run_auxiliary_traced(self.worker.as_ref(), &tracer),
        );

        let request = match read {
            Ok(request) => request,
            Err(e) => return Err(invocation.fail(e)),
        };
        log_request(&tracer, &request);

        let responded = invocation.respond(self.writer.as_ref(), ContactResponse::generate())?;
        Ok(responded.finish())
    }

    fn handle_detached(&self, mut invocation: Invocation, body: Body) -> Result<Response> {
        invocation.enter(InvocationPhase::ReadingWithAuxiliary);
        let traced = self.policy.traces_interleaving();
        let tracer = invocation.tracer();
        if traced {
            tracer.record(
                TraceKind::BackgroundLaunched,
                Some("launching background read and auxiliary work".to_string()),
            );
        }

        let reader = self.reader.clone();
        let read_tracer = tracer.clone();
        let spawned = self.detached.spawn("contact_read", async move {
            if let Ok(request) = read_traced(reader.as_ref(), &read_tracer, body).await {
                log_request(&read_tracer, &request);
            }
        });
        if let Err(e) = spawned {
            warn!(invocation_id = %tracer.id(), error = %e, "Background read not started");
        }

        let worker = self.worker.clone();
        let aux_tracer = tracer.clone();
        let spawned = self.detached.spawn("contact_auxiliary", async move {
            run_auxiliary_traced(worker.as_ref(), &aux_tracer).await;
        });
        if let Err(e) = spawned {
            warn!(
                invocation_id = %tracer.id(),
                error = %e,
                "Background auxiliary work not started"
            );
        }

        let responded = invocation.respond(self.writer.as_ref(), ContactResponse::generate())?;
        if traced {
            responded.trace(
                TraceKind::AfterResponse,
                "response written; background work may still be running",
            );
        }
        Ok(responded.finish())
    }
}

async fn read_traced(
    reader: &dyn RequestReader,
    tracer: &InvocationTracer,
    body: Body,
) -> Result<ContactRequest> {
    tracer.record(TraceKind::ReadStarted, None);
    match reader.read(body).await {
        Ok(request) => {
            tracer.record(
                TraceKind::ReadCompleted,
                Some(format!(
                    "contact_key={} type={}",
                    request.contact_key, request.contact_type
                )),
            );
            Ok(request)
        }
        Err(e) => {
            tracer.record(TraceKind::ReadFailed, Some(e.to_string()));
            Err(e)
        }
    }
}

async fn run_auxiliary_traced(worker: &dyn AuxiliaryWorker, tracer: &InvocationTracer) {
    match worker.run().await {
        Ok(()) => tracer.record(TraceKind::AuxiliaryCompleted, None),
        Err(e) => tracer.record(TraceKind::AuxiliaryFailed, Some(e.to_string())),
    }
}

fn log_request(tracer: &InvocationTracer, request: &ContactRequest) {
    debug!(
        invocation_id = %tracer.id(),
        contact_key = %request.contact_key,
        contact_type = %request.contact_type,
        "Handling create contact request"
    );
}

#[derive(Debug)]
pub struct ContactHandlerBuilder {
    policy: ConcurrencyPolicy,
    reader: Arc<dyn RequestReader>,
    worker: Arc<dyn AuxiliaryWorker>,
    writer: Arc<dyn ResponseWriter>,
    sink: Arc<dyn TraceSink>,
    detached: Arc<DetachedTasks>,
}

impl ContactHandlerBuilder {
    pub fn new(policy: ConcurrencyPolicy) -> Self {
        Self {
            policy,
            reader: Arc::new(JsonRequestReader::default()),
            worker: Arc::new(SimulatedWorker::default()),
            writer: Arc::new(JsonResponseWriter),
            sink: Arc::new(TracingSink),
            detached: Arc::new(DetachedTasks::new()),
        }
    }

    pub fn reader(mut self, reader: impl RequestReader + 'static) -> Self {
        self.reader = Arc::new(reader);
        self
    }

    pub fn worker(mut self, worker: impl AuxiliaryWorker + 'static) -> Self {
        self.worker = Arc::new(worker);
        self
    }

    pub fn writer(mut self, writer: impl ResponseWriter + 'static) -> Self {
        self.writer = Arc::new(writer);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn detached(mut self, detached: Arc<DetachedTasks>) -> Self {
        self.detached = detached;
        self
    }

    pub fn build(self) -> ContactHandler {
        ContactHandler {
            policy: self.policy,
            reader: self.reader,
            worker: self.worker,
            writer: self.writer,
            sink: self.sink,
            detached: self.detached,
        }
    }
}
