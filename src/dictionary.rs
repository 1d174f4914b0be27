//! Dictionary of known word forms.
//!
//! Words are stored in a character trie so that a splitter can find every
//! known prefix of a word in one walk. Lookups are case-insensitive: entries
//! and queries are both run through [`normalize_word`].

use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

/// NFC-normalize and lowercase a word.
pub fn normalize_word(word: &str) -> String {
    word.nfc().collect::<String>().to_lowercase()
}

/// A node in the dictionary trie
#[derive(Debug, Clone, Default)]
pub struct DictNode {
    /// Children nodes, keyed by character
    pub children: HashMap<char, DictNode>,
    /// Whether this node marks the end of a known word
    pub is_leaf: bool,
    /// Corpus frequency of the word ending here, if known
    pub freq: Option<u64>,
}

impl DictNode {
    /// Create a new empty node
    pub fn new() -> Self {
        DictNode::default()
    }

    /// Check if this node has any children
    pub fn can_walk(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this node is a valid word ending
    pub fn is_match(&self) -> bool {
        self.is_leaf
    }
}

/// A set of known word forms with optional frequencies
#[derive(Debug, Default, Clone)]
pub struct Dictionary {
    root: DictNode,
    word_count: usize,
}

impl Dictionary {
    /// Create a new empty dictionary
    pub fn new() -> Self {
        Dictionary::default()
    }

    /// Build a dictionary from a list of words without frequencies
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Dictionary::new();
        for word in words {
            dict.add(word.as_ref(), None);
        }
        dict
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Check if the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Add a word. A later frequency overwrites an earlier one.
    pub fn add(&mut self, word: &str, freq: Option<u64>) {
        let word = normalize_word(word.trim());
        if word.is_empty() {
            return;
        }

        let mut current = &mut self.root;
        for c in word.chars() {
            current = current.children.entry(c).or_default();
        }

        if !current.is_leaf {
            self.word_count += 1;
        }
        current.is_leaf = true;

        if freq.is_some() {
            current.freq = freq;
        }
    }

    /// Walk the trie by one character, starting at the root when `current` is `None`
    pub fn walk<'a>(&'a self, c: char, current: Option<&'a DictNode>) -> Option<&'a DictNode> {
        let node = current.unwrap_or(&self.root);
        node.children.get(&c)
    }

    fn find(&self, normalized: &str) -> Option<&DictNode> {
        let mut current = &self.root;
        for c in normalized.chars() {
            current = current.children.get(&c)?;
        }
        Some(current)
    }

    /// Check if a word is known (case-insensitive)
    pub fn contains(&self, word: &str) -> bool {
        self.find(&normalize_word(word))
            .map_or(false, DictNode::is_match)
    }

    /// Frequency of a known word. Known words without a recorded frequency return `Some(0)`.
    pub fn frequency(&self, word: &str) -> Option<u64> {
        self.find(&normalize_word(word))
            .filter(|node| node.is_match())
            .map(|node| node.freq.unwrap_or(0))
    }

    /// Mark, for every character length `k` in `0..=len`, whether the first `k`
    /// characters of `chars` form a known word.
    ///
    /// `chars` must already be normalized.
    pub fn known_prefixes(&self, chars: &[char]) -> Vec<bool> {
        let mut known = vec![false; chars.len() + 1];
        let mut current: Option<&DictNode> = None;

        for (i, &c) in chars.iter().enumerate() {
            match self.walk(c, current) {
                Some(next) => {
                    known[i + 1] = next.is_match();
                    if !next.can_walk() {
                        break;
                    }
                    current = Some(next);
                }
                None => break,
            }
        }

        known
    }

    /// Remove a word, returning whether it was present
    pub fn remove(&mut self, word: &str) -> bool {
        let word = normalize_word(word);
        let mut current = &mut self.root;

        for c in word.chars() {
            match current.children.get_mut(&c) {
                Some(node) => current = node,
                None => return false,
            }
        }

        if current.is_leaf {
            current.is_leaf = false;
            current.freq = None;
            self.word_count -= 1;
            true
        } else {
            false
        }
    }
}

/// Builder for loading a [`Dictionary`] from TSV or plain word lists
#[derive(Debug, Default)]
pub struct DictionaryBuilder {
    dict: Dictionary,
}

impl DictionaryBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        DictionaryBuilder::default()
    }

    /// Load words from TSV content (format: `form[\tfrequency]`).
    ///
    /// Plain word lists (one word per line) are valid TSV with no frequency
    /// column. Lines starting with `#` are comments.
    pub fn load_tsv(&mut self, tsv_content: &str) -> &mut Self {
        for line in tsv_content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split('\t');
            let form = match parts.next() {
                Some(form) if !form.trim().is_empty() => form,
                _ => continue,
            };
            let freq = parts.next().and_then(|s| s.trim().parse::<u64>().ok());

            self.dict.add(form, freq);
        }
        self
    }

    /// Add a single word
    pub fn add_word(&mut self, word: &str, freq: Option<u64>) -> &mut Self {
        self.dict.add(word, freq);
        self
    }

    /// Number of words loaded so far
    pub fn len(&self) -> usize {
        self.dict.len()
    }

    /// Check if nothing has been loaded yet
    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    /// Build and return the dictionary
    pub fn build(self) -> Dictionary {
        self.dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_contains() {
        let dict = Dictionary::from_words(["auto", "bahn"]);

        assert!(dict.contains("auto"));
        assert!(dict.contains("Bahn"));
        assert!(!dict.contains("aut"));
        assert!(!dict.contains("autobahn"));
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_duplicate_words_counted_once() {
        let mut dict = Dictionary::new();
        dict.add("zug", None);
        dict.add("ZUG", Some(3));

        assert_eq!(dict.len(), 1);
        assert_eq!(dict.frequency("zug"), Some(3));
    }

    #[test]
    fn test_umlauts_are_normalized() {
        // "a" followed by a combining diaeresis
        let dict = Dictionary::from_words(["Ha\u{0308}user"]);
        assert!(dict.contains("häuser"));
        assert!(dict.contains("HÄUSER"));
    }

    #[test]
    fn test_known_prefixes() {
        let dict = Dictionary::from_words(["auto", "autobahn", "a"]);
        let chars: Vec<char> = "autobahnhof".chars().collect();
        let known = dict.known_prefixes(&chars);

        assert_eq!(known.len(), chars.len() + 1);
        assert!(known[1]);
        assert!(known[4]);
        assert!(known[8]);
        assert!(!known[0]);
        assert!(!known[5]);
        assert!(!known[11]);
    }

    #[test]
    fn test_walk() {
        let dict = Dictionary::from_words(["zug"]);

        let z = dict.walk('z', None);
        assert!(z.is_some());
        assert!(!z.unwrap().is_match());

        let g = dict.walk('u', z).and_then(|u| dict.walk('g', Some(u)));
        assert!(g.unwrap().is_match());
    }

    #[test]
    fn test_remove() {
        let mut dict = Dictionary::from_words(["auto", "autobahn"]);
        assert!(dict.remove("auto"));
        assert!(!dict.remove("auto"));
        assert!(!dict.contains("auto"));
        assert!(dict.contains("autobahn"));
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_builder_tsv() {
        let tsv = "# comment\nauto\t120\nbahn\n\nfahrer\tnot-a-number\n";

        let mut builder = DictionaryBuilder::new();
        builder.load_tsv(tsv);
        let dict = builder.build();

        assert_eq!(dict.len(), 3);
        assert_eq!(dict.frequency("auto"), Some(120));
        assert_eq!(dict.frequency("bahn"), Some(0));
        assert_eq!(dict.frequency("fahrer"), Some(0));
        assert_eq!(dict.frequency("zug"), None);
    }
}
