//! # Contact Models
//!
//! Wire shapes for the create-contact endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kind of contact being created.
///
/// Serialized as `ADMIN`, `END_USER` or `TESTER`. Unknown values are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactType {
    Admin,
    EndUser,
    Tester,
}

impl ContactType {
    pub const ALL: [ContactType; 3] = [ContactType::Admin, ContactType::EndUser, ContactType::Tester];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Admin => "ADMIN",
            ContactType::EndUser => "END_USER",
            ContactType::Tester => "TESTER",
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound create-contact payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    /// Caller-supplied opaque key. Never echoed back.
    pub contact_key: String,
    #[serde(rename = "type")]
    pub contact_type: ContactType,
}

impl ContactRequest {
    pub fn new(contact_key: impl Into<String>, contact_type: ContactType) -> Self {
        Self {
            contact_key: contact_key.into(),
            contact_type,
        }
    }
}

/// Response naming the created resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub contact_key: String,
}

impl ContactResponse {
    /// Build a response with a fresh random key, unrelated to any request key.
    pub fn generate() -> Self {
        Self {
            contact_key: Uuid::new_v4().to_string(),
        }
    }
}
