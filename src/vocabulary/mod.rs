//! Vocabulary queries, carriers, and the resolver seam
//!
//! The interpreter only depends on the [`Vocabulary`] trait. [`MemoryVocabulary`]
//! is an in-memory implementation loaded from TOML tables.

pub mod carrier;
pub mod filter;
pub mod query;
pub mod table;
pub mod term;

use std::fmt;

use rand::RngCore;

pub use carrier::{Carrier, CarrierComponentType, CarrierMemory, CarrierState, EntryKey};
pub use filter::{ClassFilter, ClassRule, Filter, RegexFilter, SyllableFilter};
pub use query::Query;
pub use table::{Entry, MemoryVocabulary, Table, VocabularyError};
pub use term::Term;

/// Resolves queries against a vocabulary
///
/// Implementations own the matching algorithm: filters, exclusivity, and carrier
/// semantics. On a successful match they may record memory in `carrier_state`.
/// Returning `None` means no entry matched.
pub trait Vocabulary: fmt::Debug + Send + Sync {
    fn query(
        &self,
        rng: &mut dyn RngCore,
        query: &Query,
        carrier_state: &mut CarrierState,
    ) -> Option<Term>;
}
