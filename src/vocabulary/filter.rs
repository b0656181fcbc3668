//! Query filters
//!
//! Each filter serializes itself behind a numeric type tag so a reader can
//! dispatch on it. Readers that meet a tag they do not know skip the filter.

use std::io::{Read, Write};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::serial::codec::{BinReader, BinWriter};
use crate::serial::error::{SerialError, SerialResult};

/* ===================== Filter Tags ===================== */

pub const CLASS_FILTER_TAG: u16 = 1;
pub const REGEX_FILTER_TAG: u16 = 2;
pub const SYLLABLE_FILTER_TAG: u16 = 3;

/* ===================== Filter ===================== */

/// A predicate over vocabulary entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Filter {
    Class(ClassFilter),
    Regex(RegexFilter),
    Syllables(SyllableFilter),
}

impl Filter {
    pub fn tag(&self) -> u16 {
        match self {
            Filter::Class(_) => CLASS_FILTER_TAG,
            Filter::Regex(_) => REGEX_FILTER_TAG,
            Filter::Syllables(_) => SYLLABLE_FILTER_TAG,
        }
    }

    /// Test a term (for the queried subtype) and its entry's classes
    pub fn test(&self, term: &str, classes: &[String]) -> bool {
        match self {
            Filter::Class(f) => f.test(classes),
            Filter::Regex(f) => f.test(term),
            Filter::Syllables(f) => f.test(term),
        }
    }

    /// Write the type tag followed by the filter body
    pub fn write_to<W: Write>(&self, output: &mut BinWriter<W>) -> SerialResult<()> {
        output.write_u16(self.tag())?;
        match self {
            Filter::Class(f) => f.write_to(output),
            Filter::Regex(f) => f.write_to(output),
            Filter::Syllables(f) => f.write_to(output),
        }
    }

    /// Read the body of a filter whose tag has already been consumed
    ///
    /// Returns `Ok(None)` for tags this build does not know.
    pub fn read_from<R: Read>(tag: u16, input: &mut BinReader<R>) -> SerialResult<Option<Self>> {
        let filter = match tag {
            CLASS_FILTER_TAG => Filter::Class(ClassFilter::read_from(input)?),
            REGEX_FILTER_TAG => Filter::Regex(RegexFilter::read_from(input)?),
            SYLLABLE_FILTER_TAG => Filter::Syllables(SyllableFilter::read_from(input)?),
            _ => return Ok(None),
        };
        Ok(Some(filter))
    }
}

/* ===================== Class Filter ===================== */

/// One alternative inside a class rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRule {
    pub class: String,
    #[serde(default)]
    pub exclude: bool,
}

impl ClassRule {
    pub fn include(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            exclude: false,
        }
    }

    pub fn exclude(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            exclude: true,
        }
    }

    fn test(&self, classes: &[String]) -> bool {
        classes.contains(&self.class) != self.exclude
    }
}

/// Class constraints: every rule must have at least one satisfied alternative
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFilter {
    pub rules: Vec<Vec<ClassRule>>,
}

impl ClassFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule made of alternatives
    pub fn with_rule(mut self, alternatives: Vec<ClassRule>) -> Self {
        self.rules.push(alternatives);
        self
    }

    pub fn test(&self, classes: &[String]) -> bool {
        self.rules
            .iter()
            .all(|alts| alts.iter().any(|rule| rule.test(classes)))
    }

    /// Classes this filter requires positively
    pub fn included_classes(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .flatten()
            .filter(|rule| !rule.exclude)
            .map(|rule| rule.class.as_str())
    }

    fn write_to<W: Write>(&self, output: &mut BinWriter<W>) -> SerialResult<()> {
        output.write_len(self.rules.len())?;
        for alts in &self.rules {
            output.write_len(alts.len())?;
            for rule in alts {
                output.write_bool(rule.exclude)?;
                output.write_str(&rule.class)?;
            }
        }
        Ok(())
    }

    fn read_from<R: Read>(input: &mut BinReader<R>) -> SerialResult<Self> {
        let rule_count = input.read_len()?;
        let mut rules = Vec::with_capacity(rule_count.min(64));
        for _ in 0..rule_count {
            let alt_count = input.read_len()?;
            let mut alts = Vec::with_capacity(alt_count.min(64));
            for _ in 0..alt_count {
                let exclude = input.read_bool()?;
                let class = input.read_str()?;
                alts.push(ClassRule { class, exclude });
            }
            rules.push(alts);
        }
        Ok(Self { rules })
    }
}

/* ===================== Regex Filter ===================== */

/// Term must (or, with `outside`, must not) match a regular expression
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RegexFilterDef", into = "RegexFilterDef")]
pub struct RegexFilter {
    regex: Regex,
    outside: bool,
}

#[derive(Serialize, Deserialize)]
struct RegexFilterDef {
    pattern: String,
    #[serde(default)]
    outside: bool,
}

impl TryFrom<RegexFilterDef> for RegexFilter {
    type Error = regex::Error;

    fn try_from(def: RegexFilterDef) -> Result<Self, Self::Error> {
        RegexFilter::new(&def.pattern, def.outside)
    }
}

impl From<RegexFilter> for RegexFilterDef {
    fn from(f: RegexFilter) -> Self {
        RegexFilterDef {
            pattern: f.regex.as_str().to_owned(),
            outside: f.outside,
        }
    }
}

impl PartialEq for RegexFilter {
    fn eq(&self, other: &Self) -> bool {
        self.regex.as_str() == other.regex.as_str() && self.outside == other.outside
    }
}

impl RegexFilter {
    pub fn new(pattern: &str, outside: bool) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            outside,
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_outside(&self) -> bool {
        self.outside
    }

    pub fn test(&self, term: &str) -> bool {
        self.regex.is_match(term) != self.outside
    }

    fn write_to<W: Write>(&self, output: &mut BinWriter<W>) -> SerialResult<()> {
        output.write_str(self.regex.as_str())?;
        output.write_bool(self.outside)
    }

    fn read_from<R: Read>(input: &mut BinReader<R>) -> SerialResult<Self> {
        let pattern = input.read_str()?;
        let outside = input.read_bool()?;
        RegexFilter::new(&pattern, outside).map_err(|e| SerialError::InvalidFilter(e.to_string()))
    }
}

/* ===================== Syllable Filter ===================== */

/// Syllable count must fall within an inclusive range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllableFilter {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl SyllableFilter {
    pub fn between(min: u32, max: u32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn exactly(n: u32) -> Self {
        Self::between(n, n)
    }

    pub fn test(&self, term: &str) -> bool {
        let n = count_syllables(term);
        self.min.map_or(true, |min| n >= min) && self.max.map_or(true, |max| n <= max)
    }

    fn write_to<W: Write>(&self, output: &mut BinWriter<W>) -> SerialResult<()> {
        for bound in [self.min, self.max] {
            output.write_bool(bound.is_some())?;
            output.write_u32(bound.unwrap_or(0))?;
        }
        Ok(())
    }

    fn read_from<R: Read>(input: &mut BinReader<R>) -> SerialResult<Self> {
        let mut read_bound = || -> SerialResult<Option<u32>> {
            let present = input.read_bool()?;
            let value = input.read_u32()?;
            Ok(present.then_some(value))
        };
        let min = read_bound()?;
        let max = read_bound()?;
        Ok(Self { min, max })
    }
}

/// Count vowel groups; a trailing silent `e` does not count
pub fn count_syllables(term: &str) -> u32 {
    let lower = term.to_lowercase();
    let mut count = 0;
    let mut in_vowel = false;
    for c in lower.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !in_vowel {
            count += 1;
        }
        in_vowel = vowel;
    }
    if count > 1 && lower.ends_with('e') && !lower.ends_with("le") && !lower.ends_with("ee") {
        count -= 1;
    }
    count
}
