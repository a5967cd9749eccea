//! Request extractors that reject with `ApiError`

use axum::extract::FromRequest;

use crate::common::ApiError;

/// `axum::Json` whose rejections render as `{"detail": ...}`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
