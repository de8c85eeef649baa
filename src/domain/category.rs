use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalize a category name for storage and lookup.
pub fn normalize_category(name: &str) -> String {
    name.to_lowercase()
}

/// The categories an expense may be recorded against, in the order the user
/// entered them. Duplicates are kept as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category, lowercased.
    pub fn push(&mut self, name: &str) {
        self.names.push(normalize_category(name));
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = normalize_category(name);
        self.names.iter().any(|n| *n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Names with duplicates collapsed, first occurrence wins.
    pub fn distinct(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.names.len());
        for name in &self.names {
            if !seen.contains(&name.as_str()) {
                seen.push(name);
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for CategorySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = CategorySet::new();
        for name in iter {
            set.push(name.as_ref());
        }
        set
    }
}

/// Renders as `[food, travel]`.
impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names.join(", "))
    }
}
