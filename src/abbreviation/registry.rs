use std::collections::HashMap;

use super::Abbreviation;

/// Insertion-ordered, deduplicated collection of abbreviations keyed by short form.
///
/// The first registered value for a short form wins; later ones are dropped
/// even if they carry a long form the first one lacked. Entries are never removed.
#[derive(Debug, Clone, Default)]
pub struct AbbreviationRegistry {
    entries: Vec<Abbreviation>,
    index: HashMap<String, usize>,
}

impl AbbreviationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `abbreviation` unless its short form is already present.
    /// Returns `true` if it was inserted.
    pub fn register(&mut self, abbreviation: Abbreviation) -> bool {
        if self.index.contains_key(&abbreviation.short) {
            return false;
        }
        self.index
            .insert(abbreviation.short.clone(), self.entries.len());
        self.entries.push(abbreviation);
        true
    }

    pub fn contains(&self, short: &str) -> bool {
        self.index.contains_key(short)
    }

    /// Exact, case-sensitive lookup by short form
    pub fn lookup(&self, short: &str) -> Option<&Abbreviation> {
        self.index.get(short).map(|&i| &self.entries[i])
    }

    /// All entries in insertion order
    pub fn all(&self) -> &[Abbreviation] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Abbreviation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Abbreviation> {
        self.entries
    }
}

impl Extend<Abbreviation> for AbbreviationRegistry {
    fn extend<I: IntoIterator<Item = Abbreviation>>(&mut self, iter: I) {
        for abbreviation in iter {
            self.register(abbreviation);
        }
    }
}

impl FromIterator<Abbreviation> for AbbreviationRegistry {
    fn from_iter<I: IntoIterator<Item = Abbreviation>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

impl<'a> IntoIterator for &'a AbbreviationRegistry {
    type Item = &'a Abbreviation;
    type IntoIter = std::slice::Iter<'a, Abbreviation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
