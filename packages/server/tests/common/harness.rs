//! In-process test harness: the real router over in-memory dependencies.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use tryon_core::kernel::TestDependencies;
use tryon_core::server::build_app;

pub const MULTIPART_BOUNDARY: &str = "tryon-test-boundary";

pub struct TestHarness {
    pub deps: TestDependencies,
    router: Router,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_deps(TestDependencies::new())
    }

    pub fn with_deps(deps: TestDependencies) -> Self {
        let router = build_app(Arc::new(deps.server_deps()));
        Self { deps, router }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body should be readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, body)
    }

    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::GET).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn upload(
        &self,
        authorization: Option<&str>,
        field_name: &str,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> (StatusCode, Value) {
        let mut body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{field_name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n",
            b = MULTIPART_BOUNDARY
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());

        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/upload/photo")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
            );
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Run the send/verify flow and return (user_id, access_token)
    pub async fn login(&self, phone_number: &str) -> (String, String) {
        let (status, _) = self
            .post_json(
                "/auth/send-otp",
                serde_json::json!({ "phone_number": phone_number }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let code = self.deps.store.codes_for_phone(phone_number)[0].code.clone();
        let (status, body) = self
            .post_json(
                "/auth/verify-otp",
                serde_json::json!({ "phone_number": phone_number, "otp_code": code }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");

        (
            body["user_id"].as_str().unwrap().to_string(),
            body["access_token"].as_str().unwrap().to_string(),
        )
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
