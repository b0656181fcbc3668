//! Test helpers for interpreter tests
//!
//! A scripted vocabulary that returns a fixed term and records how often it
//! was asked, plus shortcuts for running a node and collecting its output.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rand::RngCore;

use crate::interpreter::{run, Node, RunContext};
use crate::localization::Messages;
use crate::vocabulary::{CarrierComponentType, CarrierState, EntryKey, Query, Term, Vocabulary};

/// Always answers with the same term (or no match)
#[derive(Debug, Default)]
pub struct ScriptedVocabulary {
    term: Option<Term>,
    calls: AtomicUsize,
}

impl ScriptedVocabulary {
    pub fn answering(term: Option<Term>) -> Arc<Self> {
        Arc::new(Self {
            term,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Vocabulary for ScriptedVocabulary {
    fn query(
        &self,
        _rng: &mut dyn RngCore,
        query: &Query,
        carrier_state: &mut CarrierState,
    ) -> Option<Term> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let term = self.term.clone()?;
        if let Some(carrier) = query.carrier() {
            for (kind, name) in carrier.iter() {
                carrier_state.set_anchor(kind, name, EntryKey::new("scripted", 0));
            }
        }
        Some(term)
    }
}

/// Run context with no vocabulary
pub fn bare_context() -> RunContext {
    RunContext::new(Arc::new(Messages::default())).with_seed(1)
}

/// Run context backed by `vocabulary`
pub fn context_with(vocabulary: Arc<ScriptedVocabulary>) -> RunContext {
    bare_context().with_vocabulary(vocabulary)
}

/// Run `node` and return the emitted units
pub fn run_units(node: &Node, ctx: &mut RunContext) -> Vec<String> {
    run(node, ctx);
    ctx.output().units().to_vec()
}

/// Carrier state holding anchors for each (type, name)
pub fn state_with(entries: &[(CarrierComponentType, &str)]) -> CarrierState {
    let mut state = CarrierState::new();
    for (kind, name) in entries {
        state.set_anchor(*kind, name, EntryKey::new("noun", 0));
    }
    state
}
