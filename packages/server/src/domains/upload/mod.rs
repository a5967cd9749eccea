//! Upload domain - profile photos
//!
//! Validates photo uploads, hands the bytes to photo storage and records the
//! resulting reference on the user.

pub mod actions;

pub use actions::{
    upload_photo, validate_content_type, validate_size, PhotoUpload, StoredPhoto,
    ALLOWED_CONTENT_TYPES, UPLOADS_URL_PREFIX,
};
