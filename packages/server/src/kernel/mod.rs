//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod photo_storage;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;

pub use deps::{PostgresCredentialStore, ServerDeps, SleepDelay};
pub use photo_storage::LocalPhotoStorage;
pub use scheduled_tasks::{run_otp_purge, start_scheduler};
pub use test_dependencies::TestDependencies;
pub use traits::*;
