pub mod condition;

pub use condition::{evaluate, evaluate_all, ConditionError};
