// Business domains
pub mod auth;
pub mod avatar;
pub mod upload;
pub mod user;
