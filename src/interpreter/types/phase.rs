//! Execution phase enums for node types with more than one resume point

/// Execution phase for Query nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPhase {
    /// Resolve the query and emit everything up to the complement
    Resolve,
    /// Complement finished; emit a separator then `text`
    Tail { text: String },
    /// Complement finished; nothing left to emit
    Finish,
}
