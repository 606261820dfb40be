use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Mapping from variable name to one of its feature labels.
///
/// A sample is a total assignment; query targets and evidence are partial ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    values: HashMap<String, String>,
}

impl Assignment {
    pub fn new() -> Self {
        Assignment {
            values: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Assignment {
            values: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// True when every pair of `filter` is present in this assignment with the same value.
    pub fn matches(&self, filter: &Assignment) -> bool {
        filter
            .values
            .iter()
            .all(|(name, value)| self.values.get(name) == Some(value))
    }

    /// First variable name that appears in both assignments
    pub fn shared_name<'a>(&'a self, other: &Assignment) -> Option<&'a str> {
        self.names().find(|name| other.contains(name))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Assignment {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl fmt::Display for Assignment {
    /// Renders as `{A=x, B=y}` with names sorted
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<(&str, &str)> = self.iter().collect();
        pairs.sort();
        write!(f, "{{")?;
        for (idx, (name, value)) in pairs.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, "}}")
    }
}
