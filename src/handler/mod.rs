//! # Contact Handler
//!
//! The request path for `POST /contacts/` and the collaborators it coordinates:
//!
//! - [`reader`] - request body read and decode
//! - [`auxiliary`] - independent simulated work
//! - [`writer`] - response encoding
//! - [`policy`] - concurrency policies
//! - [`detached`] - owner of fire-and-forget work
//! - [`invocation`] - per-request trace context and single-write guarantee
//! - [`contact`] - the handler itself

pub mod auxiliary;
pub mod contact;
pub mod detached;
pub mod invocation;
pub mod policy;
pub mod reader;
pub mod writer;

pub use auxiliary::{AuxiliaryWorker, SimulatedWorker};
pub use contact::{ContactHandler, ContactHandlerBuilder};
pub use detached::{DetachedTasks, ShutdownReport};
pub use invocation::{Invocation, InvocationPhase, InvocationTracer, Responded};
pub use policy::ConcurrencyPolicy;
pub use reader::{JsonRequestReader, RequestReader};
pub use writer::{JsonResponseWriter, ResponseWriter};
