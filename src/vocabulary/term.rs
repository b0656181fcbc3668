//! Resolver results

/// A term returned by a vocabulary lookup
///
/// A split term divides at `split` (a char index), opening a seam where a
/// complement can be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    value: String,
    split: Option<usize>,
}

impl Term {
    pub fn whole(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            split: None,
        }
    }

    /// Create a split term. The index is clamped to the value's char length.
    pub fn split(value: impl Into<String>, index: usize) -> Self {
        let value = value.into();
        let index = index.min(value.chars().count());
        Self {
            value,
            split: Some(index),
        }
    }

    /// Parse a term with an optional `|` seam marker, e.g. `"look|up"`
    pub fn parse_marked(marked: &str) -> Self {
        match marked.split_once('|') {
            Some((left, right)) => Self::split(format!("{left}{right}"), left.chars().count()),
            None => Self::whole(marked),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }

    pub fn is_split(&self) -> bool {
        self.split.is_some()
    }

    pub fn split_index(&self) -> Option<usize> {
        self.split
    }

    /// Length of the value in chars
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Left and right halves around the seam (the whole value on the left if unsplit)
    pub fn halves(&self) -> (&str, &str) {
        let Some(index) = self.split else {
            return (&self.value, "");
        };
        let byte = self
            .value
            .char_indices()
            .nth(index)
            .map_or(self.value.len(), |(b, _)| b);
        self.value.split_at(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_halves_use_char_index() {
        let term = Term::split("éclair", 1);
        assert_eq!(term.halves(), ("é", "clair"));
        assert_eq!(Term::split("ab", 2).halves(), ("ab", ""));
        assert_eq!(Term::split("ab", 0).halves(), ("", "ab"));
    }

    #[test]
    fn test_split_index_is_clamped() {
        assert_eq!(Term::split("go", 10).split_index(), Some(2));
    }

    #[test]
    fn test_parse_marked() {
        let t = Term::parse_marked("look|up");
        assert_eq!(t.value(), "lookup");
        assert_eq!(t.split_index(), Some(4));
        assert!(!Term::parse_marked("dog").is_split());
    }
}
