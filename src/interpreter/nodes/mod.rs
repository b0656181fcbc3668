//! Node execution handlers
//!
//! Each node type has a handler that resumes the node from its current phase
//! and reports what the scheduler should do next.

mod query;
mod sequence;
mod text;

pub use query::{execute_query, NO_MATCH};
pub use sequence::execute_sequence;
pub use text::execute_text;
