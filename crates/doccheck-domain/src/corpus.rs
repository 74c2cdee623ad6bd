//! Per-request document corpus

/// Insertion-ordered mapping from filename to extracted text
///
/// Built fresh for every analysis request. Re-inserting a filename replaces
/// its text but keeps the position of the first insertion, so iteration
/// order (and therefore the prompt) only depends on the order in which
/// filenames first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentCorpus {
    entries: Vec<(String, String)>,
}

impl DocumentCorpus {
    /// Create an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the text for a filename
    ///
    /// Returns the previous text if the filename was already present.
    pub fn insert(&mut self, filename: impl Into<String>, text: impl Into<String>) -> Option<String> {
        let filename = filename.into();
        let text = text.into();

        match self.entries.iter_mut().find(|(name, _)| *name == filename) {
            Some((_, existing)) => Some(std::mem::replace(existing, text)),
            None => {
                self.entries.push((filename, text));
                None
            }
        }
    }

    /// Text for a filename, if present
    pub fn get(&self, filename: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == filename)
            .map(|(_, text)| text.as_str())
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the corpus has no documents
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(filename, text)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, text)| (name.as_str(), text.as_str()))
    }

    /// Filenames in insertion order
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Total extracted characters across all documents
    pub fn total_chars(&self) -> usize {
        self.entries.iter().map(|(_, text)| text.chars().count()).sum()
    }
}

impl<N, T> FromIterator<(N, T)> for DocumentCorpus
where
    N: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut corpus = DocumentCorpus::new();
        for (name, text) in iter {
            corpus.insert(name, text);
        }
        corpus
    }
}
