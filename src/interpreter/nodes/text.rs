use crate::interpreter::run::RunContext;
use crate::interpreter::types::{Flow, TextNode};

pub fn execute_text<'a>(node: &'a TextNode, ctx: &mut RunContext) -> Flow<'a> {
    ctx.print(&node.text);
    Flow::Done
}
