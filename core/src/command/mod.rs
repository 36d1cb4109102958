//! Tagged commands embedded in model replies

pub mod parser;

pub use parser::{extract, parse_reply, Extraction, SkippedTag};

use std::collections::HashMap;

/// A command parsed from one tagged block of a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Outer tag name
    pub name: String,

    /// Inner tag names mapped to their trimmed bodies
    pub parameters: HashMap<String, String>,
}

impl Command {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            parameters: HashMap::new(),
        }
    }

    /// Add a parameter, replacing any earlier value for the same key
    pub fn with_parameter<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }
}
