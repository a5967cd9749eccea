//! HTTP surface tests: routing, status codes and response bodies.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::TestHarness;
use serde_json::json;
use tryon_core::kernel::test_dependencies::MockPhotoStorage;
use tryon_core::kernel::TestDependencies;

#[tokio::test]
async fn test_send_otp_echoes_mock_code() {
    let harness = TestHarness::new();

    let (status, body) = harness
        .post_json("/auth/send-otp", json!({ "phone_number": "+1555" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let code = harness.deps.store.codes_for_phone("+1555")[0].code.clone();
    assert_eq!(
        body["message"],
        format!("OTP sent successfully to +1555. (Mock OTP: {})", code)
    );
    assert!(body["expires_at"].is_string());
}

#[tokio::test]
async fn test_verify_otp_returns_bearer_token() {
    let harness = TestHarness::new();
    harness
        .post_json("/auth/send-otp", json!({ "phone_number": "+1555" }))
        .await;
    let code = harness.deps.store.codes_for_phone("+1555")[0].code.clone();

    let (status, body) = harness
        .post_json(
            "/auth/verify-otp",
            json!({ "phone_number": "+1555", "otp_code": code }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["token_type"], "bearer");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));

    // Replaying the same code fails
    let (status, body) = harness
        .post_json(
            "/auth/verify-otp",
            json!({ "phone_number": "+1555", "otp_code": code }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "detail": "Invalid or expired OTP" }));
}

#[tokio::test]
async fn test_expired_otp_is_bad_request() {
    let harness = TestHarness::new();
    harness
        .post_json("/auth/send-otp", json!({ "phone_number": "+1555" }))
        .await;
    let code = harness.deps.store.codes_for_phone("+1555")[0].code.clone();
    harness
        .deps
        .store
        .backdate_codes("+1555", chrono::Duration::minutes(11));

    let (status, body) = harness
        .post_json(
            "/auth/verify-otp",
            json!({ "phone_number": "+1555", "otp_code": code }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "OTP has expired");
}

#[tokio::test]
async fn test_upload_photo_and_read_profile() {
    let harness = TestHarness::new();
    let (user_id, token) = harness.login("+1555").await;

    let (status, body) = harness
        .upload(
            Some(&format!("Bearer {}", token)),
            "file",
            "me.png",
            "image/png",
            &[0x89, b'P', b'N', b'G'],
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Photo uploaded successfully");
    let file_id = body["file_id"].as_str().unwrap();
    let file_url = body["file_url"].as_str().unwrap();
    assert_eq!(file_url, format!("/uploads/{}.png", file_id));
    assert_eq!(
        harness.deps.photo_storage.contents(&format!("{}.png", file_id)),
        Some(vec![0x89, b'P', b'N', b'G'])
    );

    let (status, profile) = harness.get("/users/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["user_id"], user_id);
    assert_eq!(profile["phone_number"], "+1555");
    assert_eq!(profile["is_active"], true);
    assert_eq!(profile["profile_photos"], json!([file_url]));
}

#[tokio::test]
async fn test_upload_requires_bearer_token() {
    let harness = TestHarness::new();
    let (_, token) = harness.login("+1555").await;

    let (status, body) = harness
        .upload(None, "file", "me.jpg", "image/jpeg", b"jpeg")
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Not authenticated");

    let (status, body) = harness
        .upload(Some(&token), "file", "me.jpg", "image/jpeg", b"jpeg")
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid authorization header");

    let (status, body) = harness
        .upload(Some("Bearer not-a-jwt"), "file", "me.jpg", "image/jpeg", b"jpeg")
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid token");

    assert!(harness.deps.photo_storage.stored_names().is_empty());
}

#[tokio::test]
async fn test_upload_for_deleted_user_is_not_found() {
    let harness = TestHarness::new();
    let (user_id, token) = harness.login("+1555").await;
    harness.deps.store.remove_user(&user_id);

    let (status, body) = harness
        .upload(
            Some(&format!("Bearer {}", token)),
            "file",
            "me.jpg",
            "image/jpeg",
            b"jpeg",
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
}

#[tokio::test]
async fn test_inactive_user_is_unauthorized() {
    let harness = TestHarness::new();
    let (user_id, token) = harness.login("+1555").await;
    harness.deps.store.set_user_active(&user_id, false);

    let (status, _) = harness.get("/users/me", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_rejects_wrong_type_and_oversize() {
    let harness = TestHarness::new();
    let (_, token) = harness.login("+1555").await;
    let auth = format!("Bearer {}", token);

    let (status, body) = harness
        .upload(Some(&auth), "file", "doc.pdf", "application/pdf", b"%PDF")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Invalid file type. Only JPEG, PNG, and WebP are allowed"
    );

    // Test config allows 1024 bytes
    let (status, body) = harness
        .upload(Some(&auth), "file", "big.jpg", "image/jpeg", &[0u8; 2048])
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "File too large. Maximum size is 1024 bytes");

    assert!(harness.deps.photo_storage.stored_names().is_empty());
}

#[tokio::test]
async fn test_upload_without_file_field_is_bad_request() {
    let harness = TestHarness::new();
    let (_, token) = harness.login("+1555").await;

    let (status, _) = harness
        .upload(
            Some(&format!("Bearer {}", token)),
            "photo",
            "me.jpg",
            "image/jpeg",
            b"jpeg",
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_failed_write_leaves_profile_untouched() {
    let harness =
        TestHarness::with_deps(TestDependencies::new().mock_photo_storage(MockPhotoStorage::failing()));
    let (_, token) = harness.login("+1555").await;

    let (status, body) = harness
        .upload(
            Some(&format!("Bearer {}", token)),
            "file",
            "me.jpg",
            "image/jpeg",
            b"jpeg",
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Internal server error");

    let (_, profile) = harness.get("/users/me", Some(&token)).await;
    assert_eq!(profile["profile_photos"], json!([]));
}

#[tokio::test]
async fn test_generate_avatar_stub() {
    let harness = TestHarness::new();
    let (user_id, _) = harness.login("+1555").await;

    let (status, body) = harness
        .post_json(
            "/ai/generate-avatar",
            json!({ "user_id": user_id, "photo_urls": ["/uploads/a.jpg"] }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Avatar generated successfully! (This is a mock response)"
    );
    let request_id = body["request_id"].as_str().unwrap();
    assert_eq!(body["avatar_url"], format!("/avatars/{}.jpg", request_id));
    assert!(body["processing_time"].as_f64().is_some());

    let (status, body) = harness
        .post_json(
            "/ai/generate-avatar",
            json!({ "user_id": "nobody", "photo_urls": [], "style": "formal" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
}

#[tokio::test]
async fn test_catalogues() {
    let harness = TestHarness::new();

    let (status, body) = harness.get("/ai/models", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["models"].as_array().unwrap().len(), 3);
    assert_eq!(body["models"][2]["status"], "coming_soon");

    let (status, body) = harness.get("/ai/styles", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = body["styles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["casual", "formal", "trendy", "vintage", "seasonal"]);
}

#[tokio::test]
async fn test_health_reports_store_state() {
    let harness = TestHarness::new();

    let (status, body) = harness.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    harness.deps.store.set_unavailable(true);
    let (status, body) = harness.get("/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"]["error"], "Query failed");
    assert!(!body.to_string().contains("credential store unavailable"));
}

#[tokio::test]
async fn test_incomplete_json_body_gets_detail() {
    let harness = TestHarness::new();

    let (status, body) = harness
        .post_json("/auth/verify-otp", json!({ "phone_number": "+1555" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["detail"].as_str().is_some_and(|d| d.contains("otp_code")),
        "{body}"
    );
}

#[tokio::test]
async fn test_malformed_json_body_gets_detail() {
    let harness = TestHarness::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/ai/generate-avatar")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = harness.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string(), "{body}");
}

#[tokio::test]
async fn test_non_multipart_upload_gets_detail() {
    let harness = TestHarness::new();
    let (_, token) = harness.login("+1555").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/upload/photo")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = harness.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string(), "{body}");
}
