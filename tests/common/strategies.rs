//! Proptest strategies for contact payloads.

use contact_api::{ContactRequest, ContactType};
use proptest::prelude::*;

pub fn contact_type_strategy() -> impl Strategy<Value = ContactType> {
    prop::sample::select(ContactType::ALL.to_vec())
}

/// Caller-supplied keys are opaque: any printable string, including UUID-shaped ones.
pub fn contact_key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_-]{0,40}",
        "[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}",
        any::<String>(),
    ]
}

pub fn contact_request_strategy() -> impl Strategy<Value = ContactRequest> {
    (contact_key_strategy(), contact_type_strategy())
        .prop_map(|(key, contact_type)| ContactRequest::new(key, contact_type))
}

/// Type names that are not part of the wire enum.
pub fn unknown_type_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z_]{1,16}".prop_filter("must not be a known contact type", |name| {
        !ContactType::ALL.iter().any(|t| t.as_str() == name)
    })
}
