//! Auth domain - handles authentication via OTP (phone number)
//!
//! Responsibilities:
//! - Issuing and storing one-time codes for a phone number
//! - Verifying codes and resolving (or creating) the user behind them
//! - Session/JWT token management

pub mod actions;
pub mod jwt;
pub mod models;

pub use actions::{send_otp, verify_otp, OtpIssued, VerifiedLogin};
pub use jwt::{Claims, JwtService, TokenError};
pub use models::OneTimeCode;
