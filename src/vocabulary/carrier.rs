//! Carrier associations and run-scoped carrier state
//!
//! A carrier lets queries in one run coordinate their picks through a
//! programmer-chosen name classified by a [`CarrierComponentType`].

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::serial::codec::{BinReader, BinWriter};
use crate::serial::error::{SerialError, SerialResult};

/* ===================== Component Types ===================== */

/// Association category of a carrier component
///
/// Serialized as u16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u16)]
pub enum CarrierComponentType {
    /// Every query sharing the name returns the same entry
    Match = 0,
    /// Entries must have exactly the same classes as the first pick
    Associative = 1,
    /// Entries must share no class with the first pick
    Dissociative = 2,
    /// Entries must differ in at least one class from the first pick
    Divergent = 3,
    /// Entries must share at least one class with the first pick
    Relational = 4,
    /// No entry is returned twice under the same name
    Unique = 5,
    /// Terms must rhyme with the first pick
    Rhyme = 6,
}

impl CarrierComponentType {
    pub const ALL: [CarrierComponentType; 7] = [
        CarrierComponentType::Match,
        CarrierComponentType::Associative,
        CarrierComponentType::Dissociative,
        CarrierComponentType::Divergent,
        CarrierComponentType::Relational,
        CarrierComponentType::Unique,
        CarrierComponentType::Rhyme,
    ];

    pub fn tag(self) -> u16 {
        self as u16
    }

    pub fn from_tag(tag: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }
}

/* ===================== Carrier ===================== */

/// Named, typed associations attached to a query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    components: BTreeMap<CarrierComponentType, Vec<String>>,
}

impl Carrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Carrier::add`]
    pub fn with(mut self, kind: CarrierComponentType, name: impl Into<String>) -> Self {
        self.add(kind, name);
        self
    }

    /// Add a component. Duplicate names under the same type are ignored.
    pub fn add(&mut self, kind: CarrierComponentType, name: impl Into<String>) {
        let name = name.into();
        let names = self.components.entry(kind).or_default();
        if !names.contains(&name) {
            names.push(name);
        }
    }

    /// Names registered under `kind`, in insertion order
    pub fn components_of_type(&self, kind: CarrierComponentType) -> &[String] {
        self.components
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate over every (type, name) pair
    pub fn iter(&self) -> impl Iterator<Item = (CarrierComponentType, &str)> {
        self.components
            .iter()
            .flat_map(|(kind, names)| names.iter().map(move |n| (*kind, n.as_str())))
    }

    pub fn component_count(&self) -> usize {
        self.components.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.component_count() == 0
    }

    pub fn write_to<W: Write>(&self, output: &mut BinWriter<W>) -> SerialResult<()> {
        output.write_len(self.components.len())?;
        for (kind, names) in &self.components {
            output.write_u16(kind.tag())?;
            output.write_len(names.len())?;
            for name in names {
                output.write_str(name)?;
            }
        }
        Ok(())
    }

    pub fn read_from<R: Read>(input: &mut BinReader<R>) -> SerialResult<Self> {
        let mut carrier = Carrier::new();
        let type_count = input.read_len()?;
        for _ in 0..type_count {
            let tag = input.read_u16()?;
            let kind = CarrierComponentType::from_tag(tag)
                .ok_or(SerialError::UnknownCarrierComponent(tag))?;
            let name_count = input.read_len()?;
            for _ in 0..name_count {
                carrier.add(kind, input.read_str()?);
            }
        }
        Ok(carrier)
    }
}

/* ===================== Carrier State ===================== */

/// Identity of a vocabulary entry, as remembered by carrier state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub table: String,
    pub index: usize,
}

impl EntryKey {
    pub fn new(table: impl Into<String>, index: usize) -> Self {
        Self {
            table: table.into(),
            index,
        }
    }
}

/// Resolver memory for one carrier component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarrierMemory {
    /// The entry picked by the first query under this name
    Anchor(EntryKey),
    /// Entries already handed out under this name
    Used(HashSet<EntryKey>),
}

/// Run-scoped store correlating carrier components to resolver memory
///
/// Only the vocabulary writes entries (on a successful match). The interpreter
/// removes entries when an erase query runs.
#[derive(Debug, Clone, Default)]
pub struct CarrierState {
    slots: HashMap<(CarrierComponentType, String), CarrierMemory>,
}

impl CarrierState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: CarrierComponentType, name: &str) -> Option<&CarrierMemory> {
        self.slots.get(&(kind, name.to_owned()))
    }

    pub fn contains(&self, kind: CarrierComponentType, name: &str) -> bool {
        self.get(kind, name).is_some()
    }

    /// The anchored entry for `(kind, name)`, if any
    pub fn anchor(&self, kind: CarrierComponentType, name: &str) -> Option<&EntryKey> {
        match self.get(kind, name) {
            Some(CarrierMemory::Anchor(key)) => Some(key),
            _ => None,
        }
    }

    /// Anchor `(kind, name)` to `key` unless it is already anchored
    pub fn set_anchor(&mut self, kind: CarrierComponentType, name: &str, key: EntryKey) {
        self.slots
            .entry((kind, name.to_owned()))
            .or_insert(CarrierMemory::Anchor(key));
    }

    /// Entries already used under `(kind, name)`
    pub fn used(&self, kind: CarrierComponentType, name: &str) -> Option<&HashSet<EntryKey>> {
        match self.get(kind, name) {
            Some(CarrierMemory::Used(set)) => Some(set),
            _ => None,
        }
    }

    pub fn mark_used(&mut self, kind: CarrierComponentType, name: &str, key: EntryKey) {
        let slot = self
            .slots
            .entry((kind, name.to_owned()))
            .or_insert_with(|| CarrierMemory::Used(HashSet::new()));
        match slot {
            CarrierMemory::Used(set) => {
                set.insert(key);
            }
            CarrierMemory::Anchor(_) => *slot = CarrierMemory::Used(HashSet::from([key])),
        }
    }

    /// Forget `(kind, name)`. Returns whether an entry was present.
    pub fn remove(&mut self, kind: CarrierComponentType, name: &str) -> bool {
        self.slots.remove(&(kind, name.to_owned())).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_tags_roundtrip() {
        for kind in CarrierComponentType::ALL {
            assert_eq!(CarrierComponentType::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(CarrierComponentType::from_tag(99), None);
    }

    #[test]
    fn test_carrier_dedups_names_per_type() {
        let carrier = Carrier::new()
            .with(CarrierComponentType::Unique, "a")
            .with(CarrierComponentType::Unique, "a")
            .with(CarrierComponentType::Match, "a");
        assert_eq!(carrier.component_count(), 2);
        assert_eq!(carrier.components_of_type(CarrierComponentType::Unique), ["a"]);
        assert!(carrier.components_of_type(CarrierComponentType::Rhyme).is_empty());
    }

    #[test]
    fn test_carrier_serialize_roundtrip() {
        let carrier = Carrier::new()
            .with(CarrierComponentType::Rhyme, "r")
            .with(CarrierComponentType::Match, "m1")
            .with(CarrierComponentType::Match, "m2");
        let mut w = BinWriter::new(Vec::new());
        carrier.write_to(&mut w).unwrap();
        let bytes = w.into_inner();
        let decoded = Carrier::read_from(&mut BinReader::new(bytes.as_slice())).unwrap();
        assert_eq!(decoded, carrier);
    }

    #[test]
    fn test_carrier_unknown_component_is_error() {
        let mut w = BinWriter::new(Vec::new());
        w.write_i32(1).unwrap();
        w.write_u16(42).unwrap();
        w.write_i32(0).unwrap();
        let bytes = w.into_inner();
        let err = Carrier::read_from(&mut BinReader::new(bytes.as_slice())).unwrap_err();
        assert!(matches!(err, SerialError::UnknownCarrierComponent(42)));
    }

    #[test]
    fn test_state_anchor_is_first_write_wins() {
        let mut state = CarrierState::new();
        state.set_anchor(CarrierComponentType::Match, "x", EntryKey::new("noun", 1));
        state.set_anchor(CarrierComponentType::Match, "x", EntryKey::new("noun", 2));
        assert_eq!(
            state.anchor(CarrierComponentType::Match, "x"),
            Some(&EntryKey::new("noun", 1))
        );
    }

    #[test]
    fn test_state_remove_only_named_slot() {
        let mut state = CarrierState::new();
        state.mark_used(CarrierComponentType::Unique, "u", EntryKey::new("noun", 0));
        state.set_anchor(CarrierComponentType::Match, "u", EntryKey::new("noun", 0));
        assert!(state.remove(CarrierComponentType::Unique, "u"));
        assert!(!state.remove(CarrierComponentType::Unique, "u"));
        assert!(state.contains(CarrierComponentType::Match, "u"));
        assert_eq!(state.len(), 1);
    }
}
