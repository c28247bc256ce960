//! Test application builder and request helpers.

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use contact_api::handler::ContactHandlerBuilder;
use contact_api::{
    create_app, AppState, AuxiliaryWorker, ConcurrencyPolicy, ContactApiConfig, ContactHandler,
    JsonRequestReader, RecordingSink, ResponseWriter, SimulatedWorker,
};

type BuilderHook = Box<dyn FnOnce(ContactHandlerBuilder) -> ContactHandlerBuilder>;

pub const VALID_BODY: &str = r#"{"contactKey":"k1","type":"END_USER"}"#;
pub const UNKNOWN_TYPE_BODY: &str = r#"{"contactKey":"k1","type":"SUPERVISOR"}"#;

/// A running router plus the pieces tests inspect.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub sink: Arc<RecordingSink>,
}

pub struct TestAppBuilder {
    policy: ConcurrencyPolicy,
    read_delay: Duration,
    auxiliary_delay: Duration,
    request_timeout: Option<Duration>,
    customize: Vec<BuilderHook>,
}

impl TestAppBuilder {
    pub fn new(policy: ConcurrencyPolicy) -> Self {
        Self {
            policy,
            read_delay: Duration::ZERO,
            auxiliary_delay: Duration::ZERO,
            request_timeout: None,
            customize: Vec::new(),
        }
    }

    pub fn read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = delay;
        self
    }

    pub fn auxiliary_delay(mut self, delay: Duration) -> Self {
        self.auxiliary_delay = delay;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn writer(mut self, writer: impl ResponseWriter + 'static) -> Self {
        self.customize
            .push(Box::new(move |builder| builder.writer(writer)));
        self
    }

    pub fn worker(mut self, worker: impl AuxiliaryWorker + 'static) -> Self {
        self.customize
            .push(Box::new(move |builder| builder.worker(worker)));
        self
    }

    pub fn build(self) -> TestApp {
        let sink = Arc::new(RecordingSink::new());
        let defaults = ContactApiConfig::default();
        let config = ContactApiConfig {
            policy: self.policy,
            read_delay_ms: self.read_delay.as_millis() as u64,
            auxiliary_delay_ms: self.auxiliary_delay.as_millis() as u64,
            request_timeout_ms: self
                .request_timeout
                .map_or(defaults.request_timeout_ms, |t| t.as_millis() as u64),
            ..defaults
        };

        let mut builder = ContactHandler::builder(self.policy)
            .reader(JsonRequestReader::new(self.read_delay, config.body_limit_bytes))
            .worker(SimulatedWorker::new(self.auxiliary_delay))
            .sink(sink.clone());
        for apply in self.customize {
            builder = apply(builder);
        }

        let state = AppState::new(builder.build(), config);
        TestApp {
            router: create_app(state.clone()),
            state,
            sink,
        }
    }
}

pub fn test_app(policy: ConcurrencyPolicy) -> TestApp {
    TestAppBuilder::new(policy).build()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl TestApp {
    pub async fn post_contact(&self, body: &str) -> TestResponse {
        self.send(Method::POST, "/contacts/", Body::from(body.to_string()))
            .await
    }

    pub async fn send(&self, method: Method, uri: &str, body: Body) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("response body")
            .to_bytes();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Wait for detached work, failing the test if anything is orphaned.
    pub async fn drain(&self) {
        let report = self
            .state
            .handler
            .detached()
            .shutdown(Duration::from_secs(5))
            .await;
        assert_eq!(report.orphaned, 0, "detached work was orphaned");
    }
}
