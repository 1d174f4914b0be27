//! Linking morphemes ("Fugenelemente") such as `s`, `es` or `n`.

use crate::dictionary::normalize_word;

/// An ordered collection of linking morphemes.
///
/// Order is preserved: splitters try morphemes in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkingMorphemes {
    morphemes: Vec<String>,
}

impl LinkingMorphemes {
    /// Create a collection from a list of morphemes.
    ///
    /// Empty entries and duplicates are dropped.
    pub fn new<I, S>(morphemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = LinkingMorphemes::default();
        for m in morphemes {
            result.add(m.as_ref());
        }
        result
    }

    /// Parse one morpheme per line. Lines starting with `#` are comments.
    pub fn from_lines(content: &str) -> Self {
        LinkingMorphemes::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Append a morpheme if it is not already present
    pub fn add(&mut self, morpheme: &str) {
        let m = normalize_word(morpheme.trim());
        if !m.is_empty() && !self.morphemes.contains(&m) {
            self.morphemes.push(m);
        }
    }

    /// All morphemes in insertion order
    pub fn all(&self) -> &[String] {
        &self.morphemes
    }

    /// Check if a string is a known linking morpheme
    pub fn contains(&self, morpheme: &str) -> bool {
        self.morphemes.iter().any(|m| m == morpheme)
    }

    /// Number of morphemes
    pub fn len(&self) -> usize {
        self.morphemes.len()
    }

    /// Check if no morphemes are configured
    pub fn is_empty(&self) -> bool {
        self.morphemes.is_empty()
    }
}
