//! One complete segmentation hypothesis of a word.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::fragment::Fragment;

/// An ordered sequence of [`Fragment`]s covering the original word left to right.
///
/// The string form joins fragments with `+`, e.g. `auto(s)+bahn`.
/// Equality compares fragments only; `split_pos` is provenance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecompoundedWord {
    fragments: Vec<Fragment>,

    /// Character offset at which this hypothesis was last divided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_pos: Option<usize>,
}

impl DecompoundedWord {
    /// Create a hypothesis from fragments
    pub fn new(fragments: Vec<Fragment>) -> Self {
        DecompoundedWord {
            fragments,
            split_pos: None,
        }
    }

    /// The unsplit hypothesis: a single fragment holding the whole word
    pub fn unsplit(word: impl Into<String>) -> Self {
        DecompoundedWord::new(vec![Fragment::new(word)])
    }

    /// Parse `part1+part2(morph)+part3`. A trailing empty token after `+` is dropped.
    pub fn create_from_string(s: &str) -> Result<Self, ParseError> {
        s.parse()
    }

    /// All fragments, left to right
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Get a fragment by index
    pub fn fragment(&self, index: usize) -> Option<&Fragment> {
        self.fragments.get(index)
    }

    /// Number of fragments
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Check if there are no fragments
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Whether this hypothesis actually splits the word
    pub fn is_compound(&self) -> bool {
        self.fragments.len() > 1
    }

    /// Append a fragment at the right end
    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Replace fragment `index` with all fragments of `other`.
    ///
    /// Callers keep the parent hypothesis intact by cloning before calling this.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn replace_fragment(&mut self, index: usize, other: &DecompoundedWord) {
        self.fragments
            .splice(index..=index, other.fragments.iter().cloned());
    }

    /// Concatenation of all words and morphemes without markup
    pub fn surface(&self) -> String {
        self.fragments.iter().map(Fragment::surface).collect()
    }

    /// The fragment words, without morphemes
    pub fn words(&self) -> Vec<&str> {
        self.fragments.iter().map(|f| f.word.as_str()).collect()
    }

    /// Check if any fragment carries a linking morpheme
    pub fn has_morphemes(&self) -> bool {
        self.fragments.iter().any(Fragment::has_morpheme)
    }
}

impl PartialEq for DecompoundedWord {
    fn eq(&self, other: &Self) -> bool {
        self.fragments == other.fragments
    }
}

impl Eq for DecompoundedWord {}

impl std::hash::Hash for DecompoundedWord {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.fragments.hash(state);
    }
}

impl From<Vec<Fragment>> for DecompoundedWord {
    fn from(fragments: Vec<Fragment>) -> Self {
        DecompoundedWord::new(fragments)
    }
}

impl fmt::Display for DecompoundedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fragment) in self.fragments.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{}", fragment)?;
        }
        Ok(())
    }
}

impl FromStr for DecompoundedWord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_suffix('+').unwrap_or(s);
        if s.is_empty() {
            return Err(ParseError::Empty);
        }

        let fragments = s
            .split('+')
            .map(|token| {
                if token.is_empty() {
                    Err(ParseError::MalformedFragment(token.to_string()))
                } else {
                    token.parse()
                }
            })
            .collect::<Result<Vec<Fragment>, _>>()?;

        Ok(DecompoundedWord::new(fragments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let d = DecompoundedWord::create_from_string("auto(s)+bahn+hof").unwrap();
        assert_eq!(d.len(), 3);
        assert_eq!(d.fragments()[0], Fragment::with_morpheme("auto", "s"));
        assert_eq!(d.to_string(), "auto(s)+bahn+hof");
        assert_eq!(d.surface(), "autosbahnhof");
        assert_eq!(d.words(), vec!["auto", "bahn", "hof"]);
    }

    #[test]
    fn test_trailing_plus_dropped() {
        let d: DecompoundedWord = "auto+bahn+".parse().unwrap();
        assert_eq!(d.to_string(), "auto+bahn");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<DecompoundedWord>(), Err(ParseError::Empty));
        assert_eq!("+".parse::<DecompoundedWord>(), Err(ParseError::Empty));
        assert!("auto++bahn".parse::<DecompoundedWord>().is_err());
        assert!("+bahn".parse::<DecompoundedWord>().is_err());
    }

    #[test]
    fn test_replace_fragment() {
        let parent: DecompoundedWord = "auto+bahnfahrer".parse().unwrap();
        let refinement: DecompoundedWord = "bahn+fahrer".parse().unwrap();

        let mut child = parent.clone();
        child.replace_fragment(1, &refinement);

        assert_eq!(child.to_string(), "auto+bahn+fahrer");
        assert_eq!(parent.to_string(), "auto+bahnfahrer");
    }

    #[test]
    fn test_equality_ignores_split_pos() {
        let mut a: DecompoundedWord = "auto+bahn".parse().unwrap();
        let b: DecompoundedWord = "auto+bahn".parse().unwrap();
        a.split_pos = Some(4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_is_compound() {
        assert!(!DecompoundedWord::unsplit("katze").is_compound());
        assert!("auto+bahn".parse::<DecompoundedWord>().unwrap().is_compound());
    }
}
