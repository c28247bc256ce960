//! # Concurrency Policies
//!
//! How one invocation overlaps the request read, the auxiliary work and the
//! response write. Chosen once when the handler is built.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ContactApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyPolicy {
    /// Await the read, then respond. No auxiliary work.
    #[serde(alias = "a", alias = "A")]
    Sequential,
    /// Read and auxiliary work run together; respond after both finish.
    #[default]
    #[serde(alias = "b", alias = "B")]
    ConcurrentAwait,
    /// Hand read and auxiliary work to the detached task group and respond immediately.
    #[serde(alias = "c", alias = "C")]
    FireAndForget,
    /// Same as `FireAndForget`, with trace events before launch and after the response.
    #[serde(alias = "d", alias = "D")]
    TracedFireAndForget,
}

impl ConcurrencyPolicy {
    pub const ALL: [ConcurrencyPolicy; 4] = [
        ConcurrencyPolicy::Sequential,
        ConcurrencyPolicy::ConcurrentAwait,
        ConcurrencyPolicy::FireAndForget,
        ConcurrencyPolicy::TracedFireAndForget,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConcurrencyPolicy::Sequential => "sequential",
            ConcurrencyPolicy::ConcurrentAwait => "concurrent_await",
            ConcurrencyPolicy::FireAndForget => "fire_and_forget",
            ConcurrencyPolicy::TracedFireAndForget => "traced_fire_and_forget",
        }
    }

    /// Whether the response waits for the request read.
    pub fn awaits_read(&self) -> bool {
        matches!(
            self,
            ConcurrencyPolicy::Sequential | ConcurrencyPolicy::ConcurrentAwait
        )
    }

    pub fn runs_auxiliary(&self) -> bool {
        !matches!(self, ConcurrencyPolicy::Sequential)
    }

    /// Whether work outlives the invocation that launched it.
    pub fn detaches(&self) -> bool {
        !self.awaits_read()
    }

    pub fn traces_interleaving(&self) -> bool {
        matches!(self, ConcurrencyPolicy::TracedFireAndForget)
    }
}

impl fmt::Display for ConcurrencyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConcurrencyPolicy {
    type Err = ContactApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "sequential" => Ok(ConcurrencyPolicy::Sequential),
            "b" | "concurrent_await" => Ok(ConcurrencyPolicy::ConcurrentAwait),
            "c" | "fire_and_forget" => Ok(ConcurrencyPolicy::FireAndForget),
            "d" | "traced_fire_and_forget" => Ok(ConcurrencyPolicy::TracedFireAndForget),
            other => Err(ContactApiError::Configuration(format!(
                "Unknown concurrency policy: {other}"
            ))),
        }
    }
}
