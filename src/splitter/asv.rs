//! Classifier-driven splitting in the style of the ASV Toolbox.
//!
//! Three pre-trained suffix classifiers drive the split: one reduces the
//! word to its base form ("grundform"), one proposes a cut reading the base
//! form forwards and one reading it backwards. The two proposals are
//! reconciled, mapped back onto the surface form of the word and every
//! resulting part is split again.
//!
//! All offsets below are character offsets. Offsets into the reduced form and
//! offsets into the original word are never mixed: pieces are carried as
//! text and located in the original by [`AsvSplitter::remap`].

use std::sync::Arc;

use crate::classifier::{Instruction, SuffixClassifier};
use crate::decompounded::DecompoundedWord;
use crate::error::{DecompoundingError, Result};
use crate::fragment::Fragment;
use crate::splitter::{prepare_word, SplitterAlgorithm};
use crate::tree::DecompoundingTree;

/// Pieces shorter than this are not real constituents
pub const MIN_PIECE_LEN: usize = 4;

/// Two cut points whose left parts differ by fewer characters count as the same cut
const CUT_TOLERANCE: usize = 3;

/// Characters that may be absorbed as a linking morpheme while remapping
const MAX_ABSORBED: usize = 3;

/// A cut of the reduced word: `left_end..right_start` is the linking morpheme, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cut {
    left_end: usize,
    right_start: usize,
}

impl Cut {
    fn right_len(&self, len: usize) -> usize {
        len - self.right_start
    }

    fn is_usable(&self, len: usize) -> bool {
        self.left_end >= MIN_PIECE_LEN && self.right_start <= len && self.right_len(len) >= MIN_PIECE_LEN
    }
}

/// A part of the reduced word followed by the morpheme the classifier saw after it
#[derive(Debug, Clone, PartialEq, Eq)]
struct Piece {
    text: String,
    morpheme: String,
}

/// Statistical splitter driven by three suffix classifiers
#[derive(Clone)]
pub struct AsvSplitter {
    forward: Arc<dyn SuffixClassifier>,
    reverse: Arc<dyn SuffixClassifier>,
    grundform: Arc<dyn SuffixClassifier>,
}

impl std::fmt::Debug for AsvSplitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsvSplitter").finish_non_exhaustive()
    }
}

impl AsvSplitter {
    /// Create a splitter from the forward, reverse and grundform classifiers
    pub fn new(
        forward: Arc<dyn SuffixClassifier>,
        reverse: Arc<dyn SuffixClassifier>,
        grundform: Arc<dyn SuffixClassifier>,
    ) -> Self {
        AsvSplitter {
            forward,
            reverse,
            grundform,
        }
    }

    /// Start a builder; all three classifiers are required
    pub fn builder() -> AsvSplitterBuilder {
        AsvSplitterBuilder::default()
    }

    /// Reduce the word's suffix to its base form.
    ///
    /// The grundform classifier sees the reversed word and answers
    /// `<count><suffix>`: strip `count` trailing characters (at most the whole
    /// word) and append `suffix`. Of `;`-separated alternatives only the first
    /// is kept; an empty result falls back to the word itself.
    pub fn grundform_reduction(&self, word: &str) -> String {
        let reversed: String = word.chars().rev().collect();
        let instruction = match Instruction::parse(&self.grundform.classify(&reversed)) {
            Some(instruction) => instruction,
            None => return word.to_string(),
        };

        let chars: Vec<char> = word.chars().collect();
        let count = instruction.count.min(chars.len());
        let mut reduced: String = chars[..chars.len() - count].iter().collect();
        reduced.push_str(&instruction.suffix);

        match reduced.split(';').next() {
            Some(first) if !first.is_empty() => first.to_string(),
            _ => word.to_string(),
        }
    }

    /// Split a normalized word into parts, splitting every part again.
    ///
    /// Returns the word unsplit when no classifier proposes a usable cut.
    pub fn decompose(&self, word: &str) -> Result<DecompoundedWord> {
        let original: Vec<char> = word.chars().collect();
        if original.len() < MIN_PIECE_LEN {
            return Ok(DecompoundedWord::unsplit(word));
        }

        let reduced: Vec<char> = self.grundform_reduction(word).chars().collect();
        let forward = self.forward_cut(&reduced).filter(|c| c.is_usable(reduced.len()));
        let reverse = self.reverse_cut(&reduced).filter(|c| c.is_usable(reduced.len()));

        let cuts = reconcile(&reduced, forward, reverse);
        if cuts.is_empty() {
            return Ok(DecompoundedWord::unsplit(word));
        }

        let pieces = make_pieces(&reduced, &cuts);
        tracing::debug!(word, ?pieces, "classifier cut");

        let fragments = self.remap(word, &original, &pieces)?;

        let mut result = DecompoundedWord::default();
        for fragment in fragments {
            if fragment.word.chars().count() < MIN_PIECE_LEN || fragment.word == word {
                result.push(fragment);
                continue;
            }

            let mut sub = match self.decompose(&fragment.word) {
                Ok(sub) => sub,
                Err(err) => {
                    tracing::warn!(word = %fragment.word, error = %err, "keeping part unsplit");
                    DecompoundedWord::unsplit(fragment.word.as_str())
                }
            };
            if let Some(morpheme) = fragment.morpheme {
                let last = sub.len() - 1;
                let last_word = sub.fragments()[last].word.clone();
                sub.replace_fragment(
                    last,
                    &DecompoundedWord::new(vec![Fragment::with_morpheme(last_word, morpheme)]),
                );
            }
            for f in sub.fragments() {
                result.push(f.clone());
            }
        }

        Ok(result)
    }

    /// Split and render as `word1+word2(s)+word3`
    pub fn split_to_string(&self, word: &str) -> Result<String> {
        let tree = self.split(word)?;
        Ok(tree.best_split().to_string())
    }

    /// Forward cut: the answer's count is the length of the left part, its
    /// suffix the literal characters directly after the cut.
    fn forward_cut(&self, reduced: &[char]) -> Option<Cut> {
        let input: String = reduced.iter().collect();
        let instruction = Instruction::parse(&self.forward.classify(&input))?;
        validate(reduced, instruction.count, &instruction)
    }

    /// Reverse cut: the classifier reads the reduced word backwards and the
    /// left part ends one character after the answer's count.
    fn reverse_cut(&self, reduced: &[char]) -> Option<Cut> {
        let input: String = reduced.iter().rev().collect();
        let instruction = Instruction::parse(&self.reverse.classify(&input))?;
        if instruction.count >= reduced.len() {
            return None;
        }
        validate(reduced, instruction.count + 1, &instruction)
    }

    /// Locate each piece of the reduced word in the surface form.
    ///
    /// For every piece the shortest surface span is taken that matches, in
    /// order of precedence: equal to the piece (directly or after grundform
    /// reduction), reducing to something that starts with the piece, or (for
    /// the final remainder only) reducing to a prefix of the piece. Up to
    /// [`MAX_ABSORBED`] unmatched characters before a piece are attached to
    /// the previous fragment as a linking morpheme.
    fn remap(&self, word: &str, original: &[char], pieces: &[Piece]) -> Result<Vec<Fragment>> {
        let failure = || {
            let attempted: Vec<String> = pieces.iter().map(|p| p.text.clone()).collect();
            tracing::warn!(word, ?attempted, "cannot map split onto surface form");
            DecompoundingError::Remapping {
                word: word.to_string(),
                attempted,
            }
        };

        let n = original.len();
        let mut fragments: Vec<Fragment> = Vec::with_capacity(pieces.len());
        let mut start = 0;

        for (k, piece) in pieces.iter().enumerate() {
            let is_last = k + 1 == pieces.len();
            let max_gap = if k == 0 { 0 } else { MAX_ABSORBED };

            let mut found = None;
            for gap in 0..=max_gap {
                let piece_start = start + gap;
                if piece_start >= n {
                    break;
                }
                let end = if is_last {
                    let rest: String = original[piece_start..].iter().collect();
                    self.remainder_matches(&rest, &piece.text).then_some(n)
                } else {
                    (piece_start + 1..n).find(|&end| {
                        let candidate: String = original[piece_start..end].iter().collect();
                        self.span_matches(&candidate, &piece.text)
                    })
                };
                if let Some(end) = end {
                    found = Some((piece_start, end));
                    break;
                }
            }

            let (piece_start, end) = found.ok_or_else(failure)?;

            if piece_start > start {
                let absorbed: String = original[start..piece_start].iter().collect();
                if let Some(previous) = fragments.last_mut() {
                    let morpheme = previous.morpheme.take().unwrap_or_default() + &absorbed;
                    *previous = Fragment::with_morpheme(previous.word.as_str(), morpheme);
                }
            }

            let surface: String = original[piece_start..end].iter().collect();
            start = end;

            let morpheme_len = piece.morpheme.chars().count();
            let has_morpheme = !is_last
                && morpheme_len > 0
                && original[start..].iter().copied().take(morpheme_len).eq(piece.morpheme.chars());
            if has_morpheme {
                start += morpheme_len;
                fragments.push(Fragment::with_morpheme(surface, piece.morpheme.as_str()));
            } else {
                fragments.push(Fragment::new(surface));
            }
        }

        if start != n {
            return Err(failure());
        }
        Ok(fragments)
    }

    fn span_matches(&self, candidate: &str, target: &str) -> bool {
        if candidate == target {
            return true;
        }
        let reduced = self.grundform_reduction(candidate);
        reduced == target || reduced.starts_with(target)
    }

    fn remainder_matches(&self, rest: &str, target: &str) -> bool {
        if rest == target {
            return true;
        }
        let reduced = self.grundform_reduction(rest);
        reduced == target || reduced.starts_with(target) || target.starts_with(reduced.as_str())
    }
}

/// Check that the instruction's literal suffix follows `left_end` in the reduced word.
fn validate(reduced: &[char], left_end: usize, instruction: &Instruction) -> Option<Cut> {
    if instruction.count >= reduced.len() {
        return None;
    }
    let suffix_len = instruction.suffix.chars().count();
    let right_start = left_end + suffix_len;
    if right_start > reduced.len() {
        return None;
    }
    if !reduced[left_end..right_start]
        .iter()
        .copied()
        .eq(instruction.suffix.chars())
    {
        return None;
    }
    Some(Cut {
        left_end,
        right_start,
    })
}

/// Combine the forward and reverse proposals into zero, one or two cuts, in order.
fn reconcile(reduced: &[char], forward: Option<Cut>, reverse: Option<Cut>) -> Vec<Cut> {
    let len = reduced.len();
    match (forward, reverse) {
        (Some(f), Some(r)) => {
            if f.left_end == r.left_end {
                // same left part; keep the longer right part
                if r.right_len(len) > f.right_len(len) {
                    vec![r]
                } else {
                    vec![f]
                }
            } else if f.left_end.abs_diff(r.left_end) < CUT_TOLERANCE {
                vec![f]
            } else {
                let (first, second) = if f.left_end < r.left_end { (f, r) } else { (r, f) };
                let middle_len = second.left_end.saturating_sub(first.right_start);
                if middle_len < MIN_PIECE_LEN {
                    vec![f]
                } else {
                    vec![first, second]
                }
            }
        }
        (Some(f), None) => vec![f],
        (None, Some(r)) => vec![r],
        (None, None) => Vec::new(),
    }
}

fn make_pieces(reduced: &[char], cuts: &[Cut]) -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        pieces.push(Piece {
            text: reduced[start..cut.left_end].iter().collect(),
            morpheme: reduced[cut.left_end..cut.right_start].iter().collect(),
        });
        start = cut.right_start;
    }
    pieces.push(Piece {
        text: reduced[start..].iter().collect(),
        morpheme: String::new(),
    });
    pieces
}

/// Tree for `split`, or the unsplit word when `split` does not spell `word`
fn checked_tree(word: &str, split: DecompoundedWord) -> DecompoundingTree {
    if split.surface() != word {
        tracing::error!(word, split = %split, "split does not reconstruct the word");
        return DecompoundingTree::new(DecompoundedWord::unsplit(word));
    }
    DecompoundingTree::from_split(word, split)
}

impl SplitterAlgorithm for AsvSplitter {
    fn split(&self, word: &str) -> Result<DecompoundingTree> {
        let word = prepare_word(word)?;

        let span = tracing::debug_span!("asv", word = %word);
        let _enter = span.enter();

        let split = self.decompose(&word)?;
        Ok(checked_tree(&word, split))
    }

    fn name(&self) -> &'static str {
        "asv"
    }
}

/// Builder for [`AsvSplitter`]; fails when a classifier is missing
#[derive(Default)]
pub struct AsvSplitterBuilder {
    forward: Option<Arc<dyn SuffixClassifier>>,
    reverse: Option<Arc<dyn SuffixClassifier>>,
    grundform: Option<Arc<dyn SuffixClassifier>>,
}

impl AsvSplitterBuilder {
    /// Set the forward compound classifier
    pub fn forward(mut self, classifier: Arc<dyn SuffixClassifier>) -> Self {
        self.forward = Some(classifier);
        self
    }

    /// Set the reverse compound classifier
    pub fn reverse(mut self, classifier: Arc<dyn SuffixClassifier>) -> Self {
        self.reverse = Some(classifier);
        self
    }

    /// Set the base-form reduction classifier
    pub fn grundform(mut self, classifier: Arc<dyn SuffixClassifier>) -> Self {
        self.grundform = Some(classifier);
        self
    }

    /// Build the splitter, failing with `InvalidConfiguration` when a classifier is missing
    pub fn build(self) -> Result<AsvSplitter> {
        let missing = |name: &str| {
            DecompoundingError::InvalidConfiguration(format!("no {} classifier configured", name))
        };
        Ok(AsvSplitter::new(
            self.forward.ok_or_else(|| missing("forward"))?,
            self.reverse.ok_or_else(|| missing("reverse"))?,
            self.grundform.ok_or_else(|| missing("grundform"))?,
        ))
    }
}
