//! Trend indicators: SMA crossovers

pub mod moving_average;

pub use moving_average::*;
