pub mod secure_random;

pub use secure_random::*;
