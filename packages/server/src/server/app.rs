//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::domains::upload::UPLOADS_URL_PREFIX;
use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    current_user_handler, generate_avatar_handler, health_handler, models_handler,
    send_otp_handler, styles_handler, upload_photo_handler, verify_otp_handler,
};

/// Room for multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub server_deps: Arc<ServerDeps>,
}

/// Build the Axum application router
pub fn build_app(server_deps: Arc<ServerDeps>) -> Router {
    let upload_body_limit = server_deps
        .config
        .max_upload_size
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let uploads = ServeDir::new(&server_deps.config.upload_dir);

    // Clone jwt_service for middleware closure
    let jwt_service_for_middleware = server_deps.jwt_service.clone();

    let app_state = AxumAppState { server_deps };

    // CORS configuration - mobile and web clients from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/auth/send-otp", post(send_otp_handler))
        .route("/auth/verify-otp", post(verify_otp_handler))
        .route(
            "/upload/photo",
            post(upload_photo_handler).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .route("/ai/generate-avatar", post(generate_avatar_handler))
        .route("/ai/models", get(models_handler))
        .route("/ai/styles", get(styles_handler))
        .route("/users/me", get(current_user_handler))
        .route("/health", get(health_handler))
        .nest_service(UPLOADS_URL_PREFIX, uploads)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
