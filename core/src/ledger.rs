use serde::Serialize;

/// Append-only, ordnet logg over fullførte hendelser i én økt.
/// Kun detektoren som eier ledgeren kan legge til poster.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ledger<T> {
    entries: Vec<T>,
}

impl<T> Ledger<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub(crate) fn append(&mut self, entry: T) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn last(&self) -> Option<&T> {
        self.entries.last()
    }
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Ledger<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
