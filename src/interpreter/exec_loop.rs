//! Core execution loop
//!
//! `step()` resumes the top frame once. A node either yields a child, which is
//! pushed and runs to completion before the node resumes, or finishes and is
//! popped. Children therefore complete depth-first, in emission order, and the
//! native stack stays flat however deep the tree is.

use tracing::{debug_span, trace};

use super::nodes::{execute_query, execute_sequence, execute_text};
use super::run::RunContext;
use super::types::{Flow, Frame, Node};
use super::vm::{Step, VM};

/* ===================== Public API ===================== */

/// Run `program` to completion against `ctx`
pub fn run(program: &Node, ctx: &mut RunContext) {
    let span = debug_span!("run", run_id = %ctx.id());
    let _enter = span.enter();
    let mut vm = VM::new(program);
    run_until_done(&mut vm, ctx);
}

/// Run the VM until every frame has finished
pub fn run_until_done(vm: &mut VM<'_>, ctx: &mut RunContext) {
    loop {
        match step(vm, ctx) {
            Step::Continue => continue,
            Step::Done => break,
        }
    }
}

/// Execute one step of the VM
pub fn step<'a>(vm: &mut VM<'a>, ctx: &mut RunContext) -> Step {
    let Some(frame) = vm.frames.last_mut() else {
        return Step::Done;
    };

    let flow = match frame {
        Frame::Text { node } => execute_text(*node, ctx),
        Frame::Sequence { node, idx } => execute_sequence(*node, idx, ctx),
        Frame::Query { node, phase } => execute_query(*node, phase, ctx),
    };

    match flow {
        Flow::Yield(child) => vm.push_node(child),
        Flow::Done => {
            vm.frames.pop();
            trace!(depth = vm.frames.len(), "pop frame");
        }
    }

    Step::Continue
}
