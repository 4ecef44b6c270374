mod evaluator;
mod hand;
mod strength;

pub use evaluator::{evaluate_best, evaluate_five, evaluate_two, EvalError, Evaluator, RANK_TABLES};
pub use hand::Hand;
pub use strength::*;
