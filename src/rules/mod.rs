//! The rules of logic programs and the clauses of CNF formulas.

mod body;
pub use body::Body;
pub use body::WeightedBody;

mod program;
pub use program::Program;

mod rule;
pub use rule::Rule;
pub use rule::RuleType;
