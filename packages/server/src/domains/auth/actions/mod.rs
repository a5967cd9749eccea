//! Auth domain actions - business logic functions
//!
//! Actions are async functions called directly from the HTTP routes.

mod send_otp;
mod verify_otp;

pub use send_otp::{send_otp, OtpIssued};
pub use verify_otp::{verify_otp, VerifiedLogin};
