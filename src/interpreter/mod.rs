//! # Interpreter - Resumable Stack-Driven Node Execution
//!
//! ## Core Principles
//!
//! 1. **Stack-driven execution**: All state in `frames: Vec<Frame>`, no recursion
//! 2. **Suspension by yield**: a node that needs a subtree's output yields the
//!    subtree and is resumed after it completes
//! 3. **Run isolation**: output, carrier state, and RNG live in the `RunContext`;
//!    the tree itself is never mutated
//! 4. **Graceful fallbacks**: a missing vocabulary or an unmatched query prints a
//!    visible marker instead of failing the run

pub mod exec_loop;
pub mod nodes;
pub mod output;
pub mod run;
pub mod types;
pub mod vm;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use exec_loop::{run, run_until_done, step};
pub use nodes::NO_MATCH;
pub use output::Output;
pub use run::RunContext;
pub use types::{Flow, Frame, LineCol, Node, QueryNode, QueryPhase, SequenceNode, TextNode};
pub use vm::{Step, VM};
