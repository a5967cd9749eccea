// HTTP routes
pub mod ai;
pub mod auth;
pub mod health;
pub mod upload;
pub mod users;

pub use ai::*;
pub use auth::*;
pub use health::*;
pub use upload::*;
pub use users::*;
