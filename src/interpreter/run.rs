//! Run context: the mutable state owned by one execution

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use super::output::Output;
use crate::localization::Messages;
use crate::vocabulary::{CarrierState, Query, Term, Vocabulary};

/// State of one isolated run
///
/// Output, carrier state, and the RNG belong to this run alone. The vocabulary
/// and message catalog are shared read-only with other runs.
#[derive(Debug)]
pub struct RunContext {
    id: Uuid,
    output: Output,
    carrier_state: CarrierState,
    rng: ChaCha8Rng,
    vocabulary: Option<Arc<dyn Vocabulary>>,
    messages: Arc<Messages>,
}

impl RunContext {
    pub fn new(messages: Arc<Messages>) -> Self {
        Self {
            id: Uuid::new_v4(),
            output: Output::new(),
            carrier_state: CarrierState::new(),
            rng: ChaCha8Rng::from_entropy(),
            vocabulary: None,
            messages,
        }
    }

    pub fn with_vocabulary(mut self, vocabulary: Arc<dyn Vocabulary>) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn with_carrier_state(mut self, carrier_state: CarrierState) -> Self {
        self.carrier_state = carrier_state;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn print(&mut self, text: &str) {
        self.output.print(text);
    }

    pub fn print_char(&mut self, c: char) {
        self.output.print_char(c);
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn into_output(self) -> Output {
        self.output
    }

    pub fn has_vocabulary(&self) -> bool {
        self.vocabulary.is_some()
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn carrier_state(&self) -> &CarrierState {
        &self.carrier_state
    }

    pub fn carrier_state_mut(&mut self) -> &mut CarrierState {
        &mut self.carrier_state
    }

    /// Resolve `query` with this run's RNG and carrier state
    ///
    /// `None` when nothing matched or no vocabulary is configured.
    pub fn resolve(&mut self, query: &Query) -> Option<Term> {
        let vocabulary = self.vocabulary.as_ref()?;
        vocabulary.query(&mut self.rng, query, &mut self.carrier_state)
    }
}
