//! Run output

/// Text produced by one run, kept as the sequence of emitted units
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    units: Vec<String>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(&mut self, text: &str) {
        self.units.push(text.to_owned());
    }

    pub fn print_char(&mut self, c: char) {
        self.units.push(c.to_string());
    }

    /// Every print, in emission order
    pub fn units(&self) -> &[String] {
        &self.units
    }

    pub fn is_empty(&self) -> bool {
        self.units.iter().all(String::is_empty)
    }

    pub fn as_string(&self) -> String {
        self.units.concat()
    }
}

impl std::fmt::Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.units.iter().try_for_each(|unit| f.write_str(unit))
    }
}
