//! Type definitions for the interpreter
//!
//! - AST nodes (Node and its variants)
//! - Frames and flow (Frame, Flow)
//! - Resume phases (QueryPhase)

pub mod ast;
pub mod control;
pub mod phase;

pub use ast::{LineCol, Node, QueryNode, SequenceNode, TextNode};
pub use control::{Flow, Frame};
pub use phase::QueryPhase;
