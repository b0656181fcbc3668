//! Execution and persistence core for a procedural text language
//!
//! Program trees run on a resumable, stack-driven interpreter and persist to a
//! compact binary format. Vocabulary queries resolve terms, coordinate through
//! carriers, and interleave a complement subtree at the term's split point.

pub mod cli;
pub mod config;
pub mod engine;
pub mod interpreter;
pub mod localization;
pub mod serial;
pub mod vocabulary;

// Re-export main types
pub use config::Config;
pub use engine::Engine;
pub use interpreter::{LineCol, Node, Output, RunContext};
pub use localization::Messages;
pub use serial::{Program, SerialError};
pub use vocabulary::{
    Carrier, CarrierComponentType, CarrierState, Filter, MemoryVocabulary, Query, Term, Vocabulary,
};
