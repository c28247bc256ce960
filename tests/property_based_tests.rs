mod common;

use axum::body::Body;
use common::strategies::*;
use contact_api::{
    ConcurrencyPolicy, ContactApiError, ContactHandler, ContactRequest, ContactResponse,
    JsonRequestReader, RequestReader,
};
use http_body_util::BodyExt;
use proptest::prelude::*;
use uuid::Uuid;

proptest! {
    /// Property: any well-formed request decodes to the value that was encoded
    #[test]
    fn requests_decode_to_encoded_value(request in contact_request_strategy()) {
        let encoded = serde_json::to_vec(&request).unwrap();
        let decoded = tokio_test::block_on(JsonRequestReader::default().read(Body::from(encoded)))
            .unwrap();
        prop_assert_eq!(decoded, request);
    }

    /// Property: unknown type names fail instead of defaulting
    #[test]
    fn unknown_types_are_rejected(key in contact_key_strategy(), type_name in unknown_type_strategy()) {
        let payload = serde_json::json!({"contactKey": key, "type": type_name});
        let result =
            tokio_test::block_on(JsonRequestReader::default().read(Body::from(payload.to_string())));
        prop_assert!(matches!(result, Err(ContactApiError::Deserialization(_))));
    }

    /// Property: the response key is a UUID and never echoes the request key
    #[test]
    fn response_key_is_independent_of_request_key(request in contact_request_strategy()) {
        let body = serde_json::to_vec(&request).unwrap();
        let handler = ContactHandler::builder(ConcurrencyPolicy::Sequential).build();

        let bytes = tokio_test::block_on(async {
            let response = handler.handle(Body::from(body)).await.unwrap();
            response.into_body().collect().await.unwrap().to_bytes()
        });
        let response: ContactResponse = serde_json::from_slice(&bytes).unwrap();

        prop_assert!(Uuid::parse_str(&response.contact_key).is_ok());
        prop_assert_ne!(response.contact_key, request.contact_key);
    }
}

#[test]
fn end_user_round_trip() {
    let request = ContactRequest::new("abc", contact_api::ContactType::EndUser);
    let encoded = serde_json::to_string(&request).unwrap();
    assert_eq!(encoded, r#"{"contactKey":"abc","type":"END_USER"}"#);

    let decoded: ContactRequest = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, request);
}
