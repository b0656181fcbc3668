//! Vocabulary query data model

use serde::{Deserialize, Serialize};

use super::carrier::Carrier;
use super::filter::Filter;
use crate::interpreter::types::Node;

/// A vocabulary lookup
///
/// A query without a name is the erase form: it never reaches the resolver and
/// instead clears the carrier state named by its carrier.
///
/// Queries are immutable once built; the only runtime mutation a query causes
/// is to the run's carrier state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    subtype: Option<String>,
    #[serde(default)]
    exclusive: bool,
    #[serde(default)]
    filters: Vec<Filter>,
    #[serde(default)]
    carrier: Option<Carrier>,
    #[serde(default)]
    complement: Option<Box<Node>>,
}

impl Query {
    /// Look up a table by name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Erase the carrier state named by `carrier`
    pub fn erase(carrier: Carrier) -> Self {
        Self {
            carrier: Some(carrier),
            ..Self::default()
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn with_exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = exclusive;
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_carrier(mut self, carrier: Carrier) -> Self {
        self.carrier = Some(carrier);
        self
    }

    pub fn with_complement(mut self, complement: Node) -> Self {
        self.complement = Some(Box::new(complement));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_erase(&self) -> bool {
        self.name.is_none()
    }

    pub fn subtype(&self) -> Option<&str> {
        self.subtype.as_deref()
    }

    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Filters in the order they were added
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    pub fn carrier(&self) -> Option<&Carrier> {
        self.carrier.as_ref()
    }

    pub fn complement(&self) -> Option<&Node> {
        self.complement.as_deref()
    }

    /* ----- decoder access ----- */

    pub(crate) fn from_fields(
        name: Option<String>,
        subtype: Option<String>,
        exclusive: bool,
    ) -> Self {
        Self {
            name,
            subtype,
            exclusive,
            ..Self::default()
        }
    }

    pub(crate) fn push_filter(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub(crate) fn set_carrier(&mut self, carrier: Carrier) {
        self.carrier = Some(carrier);
    }

    pub(crate) fn set_complement(&mut self, complement: Option<Node>) {
        self.complement = complement.map(Box::new);
    }

    /// Detach the complement, leaving the query without one
    pub(crate) fn take_complement(&mut self) -> Option<Node> {
        self.complement.take().map(|complement| *complement)
    }
}
