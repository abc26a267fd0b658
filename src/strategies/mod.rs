//! Rule sets that turn indicators into directional results, and the loaded strategy set.

pub mod book;
pub mod conditions;
pub mod evaluator;

pub use book::StrategyBook;
pub use conditions::ConditionKind;
pub use evaluator::{evaluate_conditions, resolve_direction, StrategyEvaluator};
