//! Index to name lookup tables for rule and token kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered, read-only table mapping a numeric kind to its declared name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameTable {
    names: Vec<String>,
}

impl NameTable {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Name for `index`, or `None` when it falls outside the table.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Index of `name`, if declared.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.clone()
    }
}

impl<S: Into<String>> FromIterator<S> for NameTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for NameTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_inside_and_outside_bounds() {
        let table = NameTable::new(["IDENT", "NUMBER"]);
        assert_eq!(table.get(0), Some("IDENT"));
        assert_eq!(table.get(1), Some("NUMBER"));
        assert_eq!(table.get(2), None);
        assert_eq!(table.position("NUMBER"), Some(1));
        assert_eq!(table.position("STRING"), None);
    }

    #[test]
    fn displays_as_comma_list() {
        let table: NameTable = ["start", "expr"].into_iter().collect();
        assert_eq!(table.to_string(), "start, expr");
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert!(NameTable::default().is_empty());
    }
}
