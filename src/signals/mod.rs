//! Signal scoring, synthesis and the evaluation engine.

pub mod decision;
pub mod engine;
pub mod scoring;

pub use decision::*;
pub use engine::{EngineOutput, SignalEngine};
pub use scoring::*;
