//! # Models
//!
//! Request and response payloads exchanged over the contact endpoint.

pub mod contact;

pub use contact::{ContactRequest, ContactResponse, ContactType};
