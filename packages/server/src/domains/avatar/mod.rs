//! Avatar domain - mocked avatar generation
//!
//! No model is called. The generator checks the user, waits through the
//! injected processing delay and hands back a placeholder URL.

pub mod actions;
pub mod catalog;

pub use actions::{generate_avatar, AvatarRequest, GeneratedAvatar, DEFAULT_STYLE};
pub use catalog::{available_models, avatar_styles, AiModel, AvatarStyle};
