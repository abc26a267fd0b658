//! Volume indicators

pub mod ratio;

pub use ratio::*;
