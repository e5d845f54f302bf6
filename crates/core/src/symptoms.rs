//! The user's working list of symptom terms.

use dx_types::NonEmptyText;

use crate::constants::SYMPTOM_TEXT_DELIMITER;

/// Ordered set of distinct free-text symptom terms.
///
/// Terms are trimmed on entry; blank terms and exact duplicates are ignored. The set is only
/// changed through [`SymptomSet::add`] and [`SymptomSet::remove`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomSet {
    terms: Vec<NonEmptyText>,
}

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a term. Returns `false` if it was blank or already present.
    pub fn add(&mut self, term: impl AsRef<str>) -> bool {
        let Ok(term) = NonEmptyText::new(term) else {
            return false;
        };
        if self.contains(term.as_str()) {
            return false;
        }
        tracing::debug!(term = %term, "symptom added");
        self.terms.push(term);
        true
    }

    /// Removes a term. Returns `false` if it was not present.
    pub fn remove(&mut self, term: &str) -> bool {
        let term = term.trim();
        let before = self.terms.len();
        self.terms.retain(|t| t.as_str() != term);
        before != self.terms.len()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t.as_str() == term.trim())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(NonEmptyText::as_str)
    }

    /// All terms joined into one free-text sentence for the parse capability.
    pub fn joined_text(&self) -> String {
        self.iter().collect::<Vec<_>>().join(SYMPTOM_TEXT_DELIMITER)
    }
}

impl<S: AsRef<str>> FromIterator<S> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SymptomSet::new();
        for term in iter {
            set.add(term);
        }
        set
    }
}
