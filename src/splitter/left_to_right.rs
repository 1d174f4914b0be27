//! Exhaustive dictionary-driven splitting, left to right.
//!
//! The word is cut into a dictionary-known left part (optionally followed by
//! a linking morpheme) and a remainder; the remainder is then split again,
//! recursively, building a [`DecompoundingTree`] of every reachable
//! segmentation.

use std::sync::Arc;

use crate::decompounded::DecompoundedWord;
use crate::dictionary::Dictionary;
use crate::error::{DecompoundingError, Result};
use crate::fragment::Fragment;
use crate::morphemes::LinkingMorphemes;
use crate::splitter::{prepare_word, SplitterAlgorithm};
use crate::tree::{DecompoundingTree, NodeId};

pub const DEFAULT_MIN_WORD_LENGTH: usize = 1;
pub const DEFAULT_MIN_REST_LENGTH: usize = 2;

/// Dictionary-driven splitter producing the full tree of candidate splits
#[derive(Debug, Clone)]
pub struct LeftToRightSplitter {
    dict: Arc<Dictionary>,
    morphemes: Arc<LinkingMorphemes>,
    max_tree_depth: Option<usize>,
    min_word_length: usize,
    min_rest_length: usize,
}

impl LeftToRightSplitter {
    /// Create a splitter with default parameters
    pub fn new(dict: Dictionary, morphemes: LinkingMorphemes) -> Self {
        Self::with_arc(Arc::new(dict), Arc::new(morphemes))
    }

    /// Create a splitter sharing already-loaded resources
    pub fn with_arc(dict: Arc<Dictionary>, morphemes: Arc<LinkingMorphemes>) -> Self {
        LeftToRightSplitter {
            dict,
            morphemes,
            max_tree_depth: None,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            min_rest_length: DEFAULT_MIN_REST_LENGTH,
        }
    }

    /// Start a builder; resources must be set before `build`
    pub fn builder() -> LeftToRightSplitterBuilder {
        LeftToRightSplitterBuilder::default()
    }

    /// The dictionary of known words
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// The linking morphemes, in the order they are tried
    pub fn morphemes(&self) -> &LinkingMorphemes {
        &self.morphemes
    }

    /// Maximum tree depth; `None` means unbounded
    pub fn max_tree_depth(&self) -> Option<usize> {
        self.max_tree_depth
    }

    /// Set the maximum tree depth. `Some(0)` disables splitting.
    pub fn set_max_tree_depth(&mut self, depth: Option<usize>) {
        self.max_tree_depth = depth;
    }

    /// Minimum length of a dictionary part
    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }

    /// Set the minimum length of a dictionary part
    pub fn set_min_word_length(&mut self, len: usize) {
        self.min_word_length = len;
    }

    /// Remainders of this length or shorter are not split off
    pub fn min_rest_length(&self) -> usize {
        self.min_rest_length
    }

    /// Set the length at or below which a remainder is not split off
    pub fn set_min_rest_length(&mut self, len: usize) {
        self.min_rest_length = len;
    }

    /// Every valid two-way split of `word`, in cut order.
    ///
    /// For each cut the plain candidate comes first, then one candidate per
    /// matching linking morpheme. A candidate whose remainder is empty has a
    /// single fragment. `word` must already be normalized.
    pub fn make_split(&self, word: &str) -> Vec<DecompoundedWord> {
        let chars: Vec<char> = word.chars().collect();
        let known = self.dict.known_prefixes(&chars);
        let mut result = Vec::new();

        for left_len in 1..=chars.len() {
            let rest_len = chars.len() - left_len;
            if rest_len != 0 && rest_len <= self.min_rest_length {
                continue;
            }

            if known[left_len] && left_len >= self.min_word_length {
                let left: String = chars[..left_len].iter().collect();
                result.push(self.candidate(Fragment::new(left), &chars[left_len..], left_len));
            }

            for morpheme in self.morphemes.all() {
                let m_len = morpheme.chars().count();
                if m_len >= left_len {
                    continue;
                }
                let stem_len = left_len - m_len;
                if !chars[stem_len..left_len].iter().copied().eq(morpheme.chars()) {
                    continue;
                }
                if known[stem_len] && stem_len >= self.min_word_length {
                    let stem: String = chars[..stem_len].iter().collect();
                    result.push(self.candidate(
                        Fragment::with_morpheme(stem, morpheme.as_str()),
                        &chars[left_len..],
                        left_len,
                    ));
                }
            }
        }

        tracing::trace!(word, candidates = result.len(), "make_split");
        result
    }

    fn candidate(&self, left: Fragment, rest: &[char], split_pos: usize) -> DecompoundedWord {
        let mut candidate = DecompoundedWord::new(vec![left]);
        if !rest.is_empty() {
            candidate.push(Fragment::new(rest.iter().collect::<String>()));
        }
        candidate.split_pos = Some(split_pos);
        candidate
    }

    fn expand(&self, tree: &mut DecompoundingTree, id: NodeId, depth: usize) {
        if self.max_tree_depth.map_or(false, |max| depth > max) {
            return;
        }

        let parent = tree.value(id).clone();
        let eligible: Vec<usize> = (0..parent.len())
            .filter(|&i| tree.node(id).should_split_again(i))
            .collect();

        for i in eligible {
            let offset: usize = parent.fragments()[..i].iter().map(Fragment::char_len).sum();
            let word = parent.fragments()[i].word.clone();

            for candidate in self.make_split(&word) {
                let mut child = parent.clone();
                child.replace_fragment(i, &candidate);
                child.split_pos = candidate.split_pos.map(|pos| offset + pos);

                if candidate.len() > 1 {
                    let mut flags = vec![false; child.len()];
                    flags[i + 1] = true;
                    let child_id = tree.add_child(id, child, flags);
                    self.expand(tree, child_id, depth + 1);
                } else if child != parent {
                    let flags = vec![false; child.len()];
                    tree.add_child(id, child, flags);
                }
            }
        }
    }
}

impl SplitterAlgorithm for LeftToRightSplitter {
    fn split(&self, word: &str) -> Result<DecompoundingTree> {
        let word = prepare_word(word)?;

        let span = tracing::debug_span!("left_to_right", word = %word);
        let _enter = span.enter();

        let mut tree = DecompoundingTree::new(DecompoundedWord::unsplit(word));
        let root = tree.root();
        self.expand(&mut tree, root, 1);

        tracing::debug!(nodes = tree.len(), depth = tree.depth(), "split finished");
        Ok(tree)
    }

    fn name(&self) -> &'static str {
        "left-to-right"
    }
}

/// Builder for [`LeftToRightSplitter`]; fails when a resource is missing
#[derive(Debug, Default)]
pub struct LeftToRightSplitterBuilder {
    dict: Option<Arc<Dictionary>>,
    morphemes: Option<Arc<LinkingMorphemes>>,
    max_tree_depth: Option<usize>,
    min_word_length: Option<usize>,
    min_rest_length: Option<usize>,
}

impl LeftToRightSplitterBuilder {
    /// Set the dictionary (required)
    pub fn dictionary(mut self, dict: Arc<Dictionary>) -> Self {
        self.dict = Some(dict);
        self
    }

    /// Set the linking morphemes (required, may be empty)
    pub fn morphemes(mut self, morphemes: Arc<LinkingMorphemes>) -> Self {
        self.morphemes = Some(morphemes);
        self
    }

    /// Set the maximum tree depth
    pub fn max_tree_depth(mut self, depth: Option<usize>) -> Self {
        self.max_tree_depth = depth;
        self
    }

    /// Set the minimum dictionary part length
    pub fn min_word_length(mut self, len: usize) -> Self {
        self.min_word_length = Some(len);
        self
    }

    /// Set the minimum remainder length
    pub fn min_rest_length(mut self, len: usize) -> Self {
        self.min_rest_length = Some(len);
        self
    }

    /// Build the splitter, failing with `InvalidConfiguration` when a resource is missing
    pub fn build(self) -> Result<LeftToRightSplitter> {
        let dict = self.dict.ok_or_else(|| {
            DecompoundingError::InvalidConfiguration("no dictionary configured".to_string())
        })?;
        let morphemes = self.morphemes.ok_or_else(|| {
            DecompoundingError::InvalidConfiguration("no linking morphemes configured".to_string())
        })?;

        let mut splitter = LeftToRightSplitter::with_arc(dict, morphemes);
        splitter.max_tree_depth = self.max_tree_depth;
        splitter.min_word_length = self.min_word_length.unwrap_or(DEFAULT_MIN_WORD_LENGTH);
        splitter.min_rest_length = self.min_rest_length.unwrap_or(DEFAULT_MIN_REST_LENGTH);
        Ok(splitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    fn make_splitter() -> LeftToRightSplitter {
        LeftToRightSplitter::new(
            Dictionary::from_words(["auto", "bahn", "fahrer", "zug"]),
            LinkingMorphemes::new(["s"]),
        )
    }

    fn child_strings(tree: &DecompoundingTree, id: NodeId) -> Vec<String> {
        tree.children(id)
            .iter()
            .map(|&c| tree.value(c).to_string())
            .collect()
    }

    #[test]
    fn test_make_split_plain() {
        let splitter = make_splitter();
        let splits: Vec<String> = splitter
            .make_split("autobahn")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(splits, vec!["auto+bahn"]);
    }

    #[test]
    fn test_make_split_morpheme() {
        let splitter = make_splitter();
        let splits = splitter.make_split("autosbahn");
        // cut after "auto" first, then after "autos" with the morpheme
        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].to_string(), "auto+sbahn");
        assert_eq!(splits[1].fragments()[0], Fragment::with_morpheme("auto", "s"));
        assert_eq!(splits[1].fragments()[1], Fragment::new("bahn"));
        assert_eq!(splits[1].split_pos, Some(5));
    }

    #[test]
    fn test_make_split_whole_word() {
        let splitter = make_splitter();
        let splits: Vec<String> = splitter
            .make_split("autos")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(splits, vec!["auto(s)"]);

        let splits = splitter.make_split("bahn");
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].len(), 1);
    }

    #[test]
    fn test_rest_too_short() {
        let splitter = make_splitter();
        // "zugen": rest "en" has length 2 <= min_rest_length
        assert!(splitter.make_split("zugen").is_empty());
        // "zugend": rest "end" is long enough
        assert_eq!(splitter.make_split("zugend").len(), 1);
    }

    #[test]
    fn test_split_autobahn() {
        let splitter = make_splitter();
        let tree = splitter.split("Autobahn").unwrap();

        assert_eq!(tree.root_value().to_string(), "autobahn");
        assert_eq!(child_strings(&tree, tree.root()), vec!["auto+bahn"]);
    }

    #[test]
    fn test_split_recurses_into_remainder() {
        let splitter = make_splitter();
        let tree = splitter.split("autobahnfahrer").unwrap();

        assert_eq!(child_strings(&tree, tree.root()), vec!["auto+bahnfahrer"]);
        let first = tree.children(tree.root())[0];
        assert_eq!(child_strings(&tree, first), vec!["auto+bahn+fahrer"]);
        assert_eq!(tree.best_split().to_string(), "auto+bahn+fahrer");
        assert_eq!(tree.best_split().split_pos, Some(8));
    }

    #[test]
    fn test_unsplittable() {
        let splitter = make_splitter();
        let tree = splitter.split("katze").unwrap();
        assert!(tree.is_unsplit());
    }

    #[test]
    fn test_max_depth_zero() {
        let mut splitter = make_splitter();
        splitter.set_max_tree_depth(Some(0));
        let tree = splitter.split("autobahnfahrer").unwrap();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_min_word_length() {
        let mut splitter = LeftToRightSplitter::new(
            Dictionary::from_words(["a", "bahnhof"]),
            LinkingMorphemes::default(),
        );
        assert_eq!(splitter.make_split("abahnhof").len(), 1);

        splitter.set_min_word_length(2);
        assert!(splitter.make_split("abahnhof").is_empty());
    }

    #[test]
    fn test_empty_word() {
        let splitter = make_splitter();
        assert!(matches!(
            splitter.split("  "),
            Err(DecompoundingError::Parse(ParseError::Empty))
        ));
    }

    #[test]
    fn test_markup_characters_rejected() {
        let splitter = LeftToRightSplitter::new(
            Dictionary::from_words(["auto"]),
            LinkingMorphemes::default(),
        );
        for word in ["auto+bahn", "auto(s)bahn", "autobahn)"] {
            assert!(matches!(
                splitter.split(word),
                Err(DecompoundingError::Parse(ParseError::MalformedFragment(_)))
            ));
        }
    }

    #[test]
    fn test_builder_requires_resources() {
        let err = LeftToRightSplitter::builder().build().unwrap_err();
        assert!(matches!(err, DecompoundingError::InvalidConfiguration(_)));

        let err = LeftToRightSplitter::builder()
            .dictionary(Arc::new(Dictionary::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, DecompoundingError::InvalidConfiguration(_)));

        let splitter = LeftToRightSplitter::builder()
            .dictionary(Arc::new(Dictionary::new()))
            .morphemes(Arc::new(LinkingMorphemes::default()))
            .max_tree_depth(Some(2))
            .min_rest_length(3)
            .build()
            .unwrap();
        assert_eq!(splitter.max_tree_depth(), Some(2));
        assert_eq!(splitter.min_rest_length(), 3);
        assert_eq!(splitter.min_word_length(), DEFAULT_MIN_WORD_LENGTH);
    }
}
