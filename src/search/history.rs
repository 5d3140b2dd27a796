//! Ordered, duplicate-free list of previously searched terms.

/// Search terms in the order they were first searched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `term` unless it is empty or already present. Returns true if it was added.
    pub fn record(&mut self, term: &str) -> bool {
        if term.is_empty() || self.contains(term) {
            return false;
        }
        self.entries.push(term.to_string());
        true
    }

    /// Remove `term`, keeping the relative order of everything else. Returns true if removed.
    pub fn remove(&mut self, term: &str) -> bool {
        match self.entries.iter().position(|entry| entry == term) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.entries.iter().any(|entry| entry == term)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
