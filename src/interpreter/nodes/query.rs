//! Query node execution
//!
//! A query resolves a term and interleaves its complement according to the
//! term's split point:
//!
//! | term      | complement | emitted                                   |
//! |-----------|------------|-------------------------------------------|
//! | whole     | none       | value                                     |
//! | whole     | some       | value, ` `, complement                    |
//! | split     | none       | left, ` `, right                          |
//! | split @ 0 | some       | complement, ` `, value                    |
//! | split @ n | some       | value, ` `, complement (n = value length) |
//! | split @ i | some       | left, ` `, complement, ` `, right         |

use tracing::{debug, warn};

use crate::interpreter::run::RunContext;
use crate::interpreter::types::{Flow, QueryNode, QueryPhase};
use crate::localization::MISSING_TABLE;
use crate::vocabulary::CarrierComponentType;

/// Printed when the vocabulary has no entry for a query
pub const NO_MATCH: &str = "[No Match]";

/// Separator placed at a term's seam and around a complement
const SEPARATOR: char = ' ';

/// Resume a query node
pub fn execute_query<'a>(node: &'a QueryNode, phase: &mut QueryPhase, ctx: &mut RunContext) -> Flow<'a> {
    match std::mem::replace(phase, QueryPhase::Finish) {
        QueryPhase::Resolve => resolve(node, phase, ctx),
        QueryPhase::Tail { text } => {
            ctx.print_char(SEPARATOR);
            ctx.print(&text);
            Flow::Done
        }
        QueryPhase::Finish => Flow::Done,
    }
}

fn resolve<'a>(node: &'a QueryNode, phase: &mut QueryPhase, ctx: &mut RunContext) -> Flow<'a> {
    let query = &node.query;

    if !ctx.has_vocabulary() {
        warn!(line = node.location.line, col = node.location.col, "query run without a vocabulary");
        let placeholder = ctx.messages().get(MISSING_TABLE).to_owned();
        ctx.print(&placeholder);
        return Flow::Done;
    }

    if query.is_erase() {
        erase(node, ctx);
        return Flow::Done;
    }

    let Some(term) = ctx.resolve(query) else {
        debug!(
            name = query.name().unwrap_or_default(),
            subtype = query.subtype().unwrap_or_default(),
            "query matched nothing"
        );
        ctx.print(NO_MATCH);
        return Flow::Done;
    };

    let Some(complement) = query.complement() else {
        let (left, right) = term.halves();
        ctx.print(left);
        if term.is_split() {
            ctx.print_char(SEPARATOR);
            ctx.print(right);
        }
        return Flow::Done;
    };

    match term.split_index() {
        None => {
            ctx.print(term.value());
            ctx.print_char(SEPARATOR);
        }
        // Complement to the left of the term
        Some(0) => {
            *phase = QueryPhase::Tail {
                text: term.into_value(),
            };
        }
        // Complement to the right of the term
        Some(i) if i == term.len() => {
            ctx.print(term.value());
            ctx.print_char(SEPARATOR);
        }
        // Complement inside the phrase
        Some(_) => {
            let (left, right) = term.halves();
            ctx.print(left);
            ctx.print_char(SEPARATOR);
            *phase = QueryPhase::Tail {
                text: right.to_owned(),
            };
        }
    }
    Flow::Yield(complement)
}

/// Forget every carrier component the query names
fn erase(node: &QueryNode, ctx: &mut RunContext) {
    let Some(carrier) = node.query.carrier() else {
        debug!(line = node.location.line, "erase query without a carrier");
        return;
    };
    for kind in CarrierComponentType::ALL {
        for name in carrier.components_of_type(kind) {
            let removed = ctx.carrier_state_mut().remove(kind, name);
            debug!(?kind, name = name.as_str(), removed, "erased carrier component");
        }
    }
}
