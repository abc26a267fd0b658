//! Core application primitives (runtime orchestration)

pub mod runtime;

pub use runtime::*;
