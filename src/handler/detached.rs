//! # Detached Task Group
//!
//! Process-wide owner of fire-and-forget work. Invocations hand futures to the
//! group and never join them, so dropping or finishing the request does not
//! cancel the work. At shutdown the group stops accepting work, drains what is
//! in flight for a bounded period, then aborts the rest.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};
use tracing::{error, info, info_span, warn, Instrument};

use crate::error::{ContactApiError, Result};

/// Outcome of [`DetachedTasks::shutdown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Tasks that finished before the drain timeout expired.
    pub drained: usize,
    /// Tasks still running when the drain timeout expired. They were aborted.
    pub orphaned: usize,
}

#[derive(Debug, Default)]
pub struct DetachedTasks {
    tasks: Mutex<JoinSet<()>>,
    closed: AtomicBool,
}

impl DetachedTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand `future` to the group. Must be called from within a Tokio runtime.
    pub fn spawn<F>(&self, name: &'static str, future: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = self.tasks.lock();
        if self.closed.load(Ordering::Acquire) {
            warn!(task = name, "Rejecting detached task: shutdown in progress");
            return Err(ContactApiError::ShuttingDown(format!(
                "detached task '{name}' rejected"
            )));
        }

        reap_finished(&mut tasks);
        tasks.spawn(future.instrument(info_span!("detached_task", task = name)));
        Ok(())
    }

    /// Number of tasks that have not finished yet.
    pub fn in_flight(&self) -> usize {
        let mut tasks = self.tasks.lock();
        reap_finished(&mut tasks);
        tasks.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Stop accepting work and wait up to `drain_timeout` for in-flight tasks.
    pub async fn shutdown(&self, drain_timeout: Duration) -> ShutdownReport {
        let mut tasks = {
            let mut guard = self.tasks.lock();
            self.closed.store(true, Ordering::Release);
            std::mem::take(&mut *guard)
        };

        let pending = tasks.len();
        info!(
            pending = pending,
            drain_timeout_ms = drain_timeout.as_millis() as u64,
            "Draining detached tasks"
        );

        let mut drained = 0;
        let drain = async {
            while let Some(result) = tasks.join_next().await {
                log_join_result(result);
                drained += 1;
            }
        };
        let timed_out = tokio::time::timeout(drain_timeout, drain).await.is_err();

        let orphaned = tasks.len();
        if timed_out && orphaned > 0 {
            warn!(
                orphaned = orphaned,
                "Aborting detached tasks still running after drain timeout"
            );
        }
        tasks.shutdown().await;

        let report = ShutdownReport { drained, orphaned };
        info!(drained = report.drained, orphaned = report.orphaned, "Detached tasks shut down");
        report
    }
}

fn reap_finished(tasks: &mut JoinSet<()>) {
    while let Some(result) = tasks.try_join_next() {
        log_join_result(result);
    }
}

fn log_join_result(result: std::result::Result<(), JoinError>) {
    if let Err(e) = result {
        if e.is_panic() {
            error!(error = %e, "Detached task panicked");
        }
    }
}
