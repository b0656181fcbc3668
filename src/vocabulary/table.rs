//! In-memory vocabulary loaded from TOML tables
//!
//! ```toml
//! [[tables]]
//! name = "verb"
//! subtypes = ["base", "past"]
//!
//! [[tables.entries]]
//! terms = ["look|up", "looked|up"]
//! classes = ["phrasal"]
//! ```
//!
//! A `|` inside a term marks the seam of a split term.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::carrier::{Carrier, CarrierComponentType, CarrierState, EntryKey};
use super::filter::Filter;
use super::query::Query;
use super::term::Term;
use super::Vocabulary;

/* ===================== Errors ===================== */

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Failed to read vocabulary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse vocabulary: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Table {0} declares no subtypes")]
    NoSubtypes(String),

    #[error("Duplicate table name: {0}")]
    DuplicateTable(String),

    #[error("Table {table}: entry {index} has {found} terms but the table has {expected} subtypes")]
    SubtypeMismatch {
        table: String,
        index: usize,
        found: usize,
        expected: usize,
    },
}

/* ===================== Tables ===================== */

fn default_subtypes() -> Vec<String> {
    vec!["default".to_string()]
}

/// One vocabulary entry: a term per subtype plus classes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub terms: Vec<String>,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl Entry {
    fn term(&self, subtype: usize) -> Term {
        Term::parse_marked(&self.terms[subtype])
    }

    fn class_set(&self) -> BTreeSet<&str> {
        self.classes.iter().map(String::as_str).collect()
    }
}

/// A named table of entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default = "default_subtypes")]
    pub subtypes: Vec<String>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Table {
    fn subtype_index(&self, subtype: Option<&str>) -> Option<usize> {
        match subtype {
            None if self.subtypes.is_empty() => None,
            None => Some(0),
            Some(s) => self.subtypes.iter().position(|name| name == s),
        }
    }

    fn validate(&self) -> Result<(), VocabularyError> {
        if self.subtypes.is_empty() {
            return Err(VocabularyError::NoSubtypes(self.name.clone()));
        }
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.terms.len() != self.subtypes.len() {
                return Err(VocabularyError::SubtypeMismatch {
                    table: self.name.clone(),
                    index,
                    found: entry.terms.len(),
                    expected: self.subtypes.len(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct VocabularyFile {
    #[serde(default)]
    tables: Vec<Table>,
}

/* ===================== Memory Vocabulary ===================== */

/// A vocabulary held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryVocabulary {
    tables: HashMap<String, Table>,
}

impl MemoryVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: Vec<Table>) -> Result<Self, VocabularyError> {
        let mut vocab = Self::new();
        for table in tables {
            vocab.add_table(table)?;
        }
        Ok(vocab)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, VocabularyError> {
        let file: VocabularyFile = toml::from_str(source)?;
        Self::from_tables(file.tables)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn add_table(&mut self, table: Table) -> Result<(), VocabularyError> {
        table.validate()?;
        if self.tables.contains_key(&table.name) {
            return Err(VocabularyError::DuplicateTable(table.name));
        }
        self.tables.insert(table.name.clone(), table);
        Ok(())
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    fn entry(&self, key: &EntryKey) -> Option<&Entry> {
        self.tables.get(&key.table)?.entries.get(key.index)
    }

    /// Check one candidate against the carrier constraints in `state`
    fn carrier_admits(
        &self,
        table: &Table,
        index: usize,
        subtype: usize,
        carrier: &Carrier,
        state: &CarrierState,
    ) -> bool {
        let entry = &table.entries[index];
        let key = EntryKey::new(table.name.as_str(), index);

        carrier.iter().all(|(kind, name)| {
            if kind == CarrierComponentType::Unique {
                return state.used(kind, name).map_or(true, |used| !used.contains(&key));
            }
            let Some(anchor_key) = state.anchor(kind, name) else {
                return true;
            };
            let Some(anchor) = self.entry(anchor_key) else {
                return true;
            };
            let ours = entry.class_set();
            let theirs = anchor.class_set();
            match kind {
                CarrierComponentType::Associative => ours == theirs,
                CarrierComponentType::Dissociative => ours.is_disjoint(&theirs),
                CarrierComponentType::Divergent => ours != theirs,
                CarrierComponentType::Relational => !ours.is_disjoint(&theirs),
                CarrierComponentType::Rhyme => {
                    let anchor_subtype = subtype.min(anchor.terms.len().saturating_sub(1));
                    rhymes(
                        entry.term(subtype).value(),
                        anchor.term(anchor_subtype).value(),
                    )
                }
                // Pinned before candidate selection
                CarrierComponentType::Match | CarrierComponentType::Unique => true,
            }
        })
    }

    fn pinned_match(&self, table: &Table, carrier: &Carrier, state: &CarrierState) -> Option<usize> {
        carrier
            .components_of_type(CarrierComponentType::Match)
            .iter()
            .filter_map(|name| state.anchor(CarrierComponentType::Match, name))
            .find(|key| key.table == table.name && key.index < table.entries.len())
            .map(|key| key.index)
    }

    fn record(carrier: &Carrier, state: &mut CarrierState, key: &EntryKey) {
        for (kind, name) in carrier.iter() {
            match kind {
                CarrierComponentType::Unique => state.mark_used(kind, name, key.clone()),
                _ => state.set_anchor(kind, name, key.clone()),
            }
        }
    }
}

/// Classes named positively by the query's class filters
fn allowed_classes(query: &Query) -> BTreeSet<&str> {
    query
        .filters()
        .iter()
        .filter_map(|f| match f {
            Filter::Class(cf) => Some(cf.included_classes()),
            _ => None,
        })
        .flatten()
        .collect()
}

impl Vocabulary for MemoryVocabulary {
    fn query(
        &self,
        rng: &mut dyn RngCore,
        query: &Query,
        carrier_state: &mut CarrierState,
    ) -> Option<Term> {
        let name = query.name()?;
        let Some(table) = self.tables.get(name) else {
            debug!(table = name, "query names an unknown table");
            return None;
        };
        let subtype = table.subtype_index(query.subtype())?;
        let empty = Carrier::new();
        let carrier = query.carrier().unwrap_or(&empty);

        let index = match self.pinned_match(table, carrier, carrier_state) {
            Some(index) => index,
            None => {
                let allowed = query.is_exclusive().then(|| allowed_classes(query));
                let candidates: Vec<usize> = (0..table.entries.len())
                    .filter(|&i| {
                        let entry = &table.entries[i];
                        let term = entry.term(subtype);
                        query
                            .filters()
                            .iter()
                            .all(|f| f.test(term.value(), &entry.classes))
                    })
                    .filter(|&i| {
                        allowed.as_ref().map_or(true, |allowed| {
                            table.entries[i]
                                .classes
                                .iter()
                                .all(|c| allowed.contains(c.as_str()))
                        })
                    })
                    .filter(|&i| self.carrier_admits(table, i, subtype, carrier, carrier_state))
                    .collect();
                *candidates.choose(rng)?
            }
        };

        let key = EntryKey::new(table.name.as_str(), index);
        Self::record(carrier, carrier_state, &key);
        Some(table.entries[index].term(subtype))
    }
}

/* ===================== Rhyme ===================== */

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// The final vowel group and everything after it, skipping a silent final `e`
fn rime(word: &str) -> String {
    let chars: Vec<char> = word.to_lowercase().chars().collect();
    let mut groups = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if is_vowel(chars[i]) {
            groups.push(i);
            while i < chars.len() && is_vowel(chars[i]) {
                i += 1;
            }
        } else {
            i += 1;
        }
    }
    let start = match groups.as_slice() {
        [] => 0,
        [.., prev, last] if *last == chars.len() - 1 && chars[*last] == 'e' => *prev,
        [.., last] => *last,
    };
    chars[start..].iter().collect()
}

fn rhymes(a: &str, b: &str) -> bool {
    rime(a) == rime(b)
}
