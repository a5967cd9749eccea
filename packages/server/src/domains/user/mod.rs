//! User domain - accounts keyed by phone number

pub mod actions;
pub mod models;

pub use actions::require_active_user;
pub use models::User;
