use crate::parser::tab_parser::{StringLine, SEPARATOR};
use std::fmt;

/// The whole tab rendered as one continuous line per string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Staff {
    /// (label, body without bar lines) in order of first appearance
    pub strings: Vec<(String, String)>,
}

impl Staff {
    /// Join every line of the same string across sections.
    pub fn from_tab(text: &str) -> Self {
        let mut strings: Vec<(String, String)> = Vec::new();
        for string_line in text.lines().filter_map(StringLine::parse) {
            let body: String = string_line
                .body
                .chars()
                .filter(|c| *c != SEPARATOR)
                .collect();
            match strings
                .iter_mut()
                .find(|(label, _)| label == string_line.label)
            {
                Some((_, merged)) => merged.push_str(&body),
                None => strings.push((string_line.label.to_string(), body)),
            }
        }
        Self { strings }
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl fmt::Display for Staff {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (label, body) in &self.strings {
            writeln!(f, "{label}{SEPARATOR}{body}")?;
        }
        Ok(())
    }
}
