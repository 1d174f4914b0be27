//! Splitting strategies.
//!
//! Every strategy turns a word into a [`DecompoundingTree`]; callers pick a
//! segmentation from the tree without caring which heuristic produced it.

pub mod asv;
pub mod left_to_right;

use serde::{Deserialize, Serialize};

use crate::dictionary::normalize_word;
use crate::error::{ParseError, Result};
use crate::fragment::MARKUP_CHARS;
use crate::tree::DecompoundingTree;

pub use asv::{AsvSplitter, AsvSplitterBuilder};
pub use left_to_right::{LeftToRightSplitter, LeftToRightSplitterBuilder};

/// A decompounding strategy
pub trait SplitterAlgorithm {
    /// Split one word into a tree of candidate segmentations.
    ///
    /// A root-only tree means no split was found.
    fn split(&self, word: &str) -> Result<DecompoundingTree>;

    /// Short name of the strategy
    fn name(&self) -> &'static str;
}

/// Normalize a word for splitting.
///
/// Empty input is [`ParseError::Empty`]. Words containing `+`, `(` or `)`
/// could not be written back in split notation and are
/// [`ParseError::MalformedFragment`].
pub(crate) fn prepare_word(word: &str) -> Result<String> {
    let word = normalize_word(word.trim());
    if word.is_empty() {
        return Err(ParseError::Empty.into());
    }
    if word.contains(MARKUP_CHARS) {
        return Err(ParseError::MalformedFragment(word).into());
    }
    Ok(word)
}

/// Which strategy to run
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    /// Exhaustive dictionary search
    #[default]
    LeftToRight,
    /// Suffix-classifier driven splitting
    Asv,
}

/// The closed set of available splitters
#[derive(Debug, Clone)]
pub enum Splitter {
    LeftToRight(LeftToRightSplitter),
    Asv(AsvSplitter),
}

impl Splitter {
    /// Which strategy this splitter runs
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Splitter::LeftToRight(_) => AlgorithmKind::LeftToRight,
            Splitter::Asv(_) => AlgorithmKind::Asv,
        }
    }

    /// Split many words. A failure for one word does not stop the others.
    pub fn split_all<'a, I>(&self, words: I) -> Vec<(&'a str, Result<DecompoundingTree>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        words
            .into_iter()
            .map(|word| (word, self.split(word)))
            .collect()
    }
}

impl SplitterAlgorithm for Splitter {
    fn split(&self, word: &str) -> Result<DecompoundingTree> {
        match self {
            Splitter::LeftToRight(s) => s.split(word),
            Splitter::Asv(s) => s.split(word),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Splitter::LeftToRight(s) => s.name(),
            Splitter::Asv(s) => s.name(),
        }
    }
}

impl From<LeftToRightSplitter> for Splitter {
    fn from(s: LeftToRightSplitter) -> Self {
        Splitter::LeftToRight(s)
    }
}

impl From<AsvSplitter> for Splitter {
    fn from(s: AsvSplitter) -> Self {
        Splitter::Asv(s)
    }
}
