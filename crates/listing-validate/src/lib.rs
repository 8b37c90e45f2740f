pub mod catalog;
pub mod context;
pub mod engine;

pub use catalog::catalog;
pub use context::TableContext;
pub use engine::{Evaluation, RuleOutcome, evaluate};
