pub mod one_time_code;

pub use one_time_code::*;
