//! Scheduler state
//!
//! The VM holds the stack of active frames. Every frame borrows its node from
//! the program tree, so a VM lives no longer than the tree it runs.

use tracing::trace;

use super::types::{Frame, Node};

/* ===================== VM ===================== */

#[derive(Debug, Clone)]
pub struct VM<'a> {
    /// Stack of execution frames
    pub frames: Vec<Frame<'a>>,
}

impl<'a> VM<'a> {
    /// Create a VM whose root frame runs `program`
    pub fn new(program: &'a Node) -> Self {
        let mut vm = VM { frames: vec![] };
        vm.push_node(program);
        vm
    }

    /// Push a frame for `node`; it runs before the frame below it resumes
    pub fn push_node(&mut self, node: &'a Node) {
        trace!(depth = self.frames.len(), line = node.location().line, "push frame");
        self.frames.push(Frame::new(node));
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_done(&self) -> bool {
        self.frames.is_empty()
    }
}

/* ===================== Step Result ===================== */

/// Result of executing one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Continue to next step
    Continue,
    /// Execution complete
    Done,
}
