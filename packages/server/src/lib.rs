// Virtual Try-On - API Core
//
// Backend for the try-on mobile app: phone OTP login, JWT sessions,
// profile photo uploads and a mocked avatar generator.
//
// Flows live per-domain in domains/*/actions and talk to infrastructure
// only through the traits in kernel/traits.rs.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
