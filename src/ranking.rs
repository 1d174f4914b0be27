//! Choosing a segmentation from a decompounding tree.

use std::sync::Arc;

use serde::Serialize;

use crate::decompounded::DecompoundedWord;
use crate::dictionary::Dictionary;
use crate::tree::DecompoundingTree;

/// A segmentation with its score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSplit {
    pub split: DecompoundedWord,
    pub score: f64,
}

/// Scores the distinct segmentations of a tree
pub trait Ranker {
    /// Every distinct split, best first. Equal scores keep tree order.
    fn rank(&self, tree: &DecompoundingTree) -> Vec<RankedSplit>;

    /// The best split, if the tree has any
    fn highest_rank(&self, tree: &DecompoundingTree) -> Option<DecompoundedWord> {
        self.rank(tree).into_iter().next().map(|r| r.split)
    }
}

fn sort_by_score(mut ranked: Vec<RankedSplit>) -> Vec<RankedSplit> {
    // stable sort keeps depth-first order among ties
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Prefers the split with the most fragments
#[derive(Debug, Clone, Copy, Default)]
pub struct MostFragmentsRanker;

impl Ranker for MostFragmentsRanker {
    fn rank(&self, tree: &DecompoundingTree) -> Vec<RankedSplit> {
        sort_by_score(
            tree.all_splits()
                .into_iter()
                .map(|split| RankedSplit {
                    score: split.len() as f64,
                    split,
                })
                .collect(),
        )
    }
}

/// Scores a split by the geometric mean of its fragments' dictionary frequencies.
///
/// Unknown fragments count as frequency 0, so a split containing one scores 0.
#[derive(Debug, Clone)]
pub struct FrequencyGeometricMeanRanker {
    dict: Arc<Dictionary>,
}

impl FrequencyGeometricMeanRanker {
    /// Create a ranker scoring against `dict`
    pub fn new(dict: Arc<Dictionary>) -> Self {
        FrequencyGeometricMeanRanker { dict }
    }

    /// Geometric mean of the fragment frequencies
    pub fn score(&self, split: &DecompoundedWord) -> f64 {
        if split.is_empty() {
            return 0.0;
        }

        let mut log_sum = 0.0;
        for fragment in split.fragments() {
            let freq = self.dict.frequency(&fragment.word).unwrap_or(0);
            if freq == 0 {
                return 0.0;
            }
            log_sum += (freq as f64).ln();
        }

        (log_sum / split.len() as f64).exp()
    }
}

impl Ranker for FrequencyGeometricMeanRanker {
    fn rank(&self, tree: &DecompoundingTree) -> Vec<RankedSplit> {
        sort_by_score(
            tree.all_splits()
                .into_iter()
                .map(|split| RankedSplit {
                    score: self.score(&split),
                    split,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::DictionaryBuilder;
    use crate::morphemes::LinkingMorphemes;
    use crate::splitter::{LeftToRightSplitter, SplitterAlgorithm};

    fn make_dict() -> Arc<Dictionary> {
        let mut builder = DictionaryBuilder::new();
        builder.load_tsv("auto\t100\nbahn\t100\nautobahn\t50\nfahrer\t400\nbahnfahrer\t1\n");
        Arc::new(builder.build())
    }

    fn make_tree(dict: Arc<Dictionary>) -> DecompoundingTree {
        LeftToRightSplitter::with_arc(dict, Arc::new(LinkingMorphemes::default()))
            .split("autobahnfahrer")
            .unwrap()
    }

    #[test]
    fn test_most_fragments() {
        let tree = make_tree(make_dict());
        let best = MostFragmentsRanker.highest_rank(&tree).unwrap();
        assert_eq!(best.to_string(), "auto+bahn+fahrer");
    }

    #[test]
    fn test_geometric_mean() {
        let dict = make_dict();
        let ranker = FrequencyGeometricMeanRanker::new(Arc::clone(&dict));

        let split: DecompoundedWord = "auto+bahn".parse().unwrap();
        assert!((ranker.score(&split) - 100.0).abs() < 1e-9);

        let split: DecompoundedWord = "auto+katze".parse().unwrap();
        assert_eq!(ranker.score(&split), 0.0);

        // cbrt(100 * 100 * 400) ~ 158.7 > sqrt(50 * 400) ~ 141.4 > sqrt(100 * 1)
        let tree = make_tree(dict);
        let ranked = ranker.rank(&tree);
        assert_eq!(ranked[0].split.to_string(), "auto+bahn+fahrer");
        assert_eq!(ranked[1].split.to_string(), "autobahn+fahrer");
        assert_eq!(ranked.last().unwrap().score, 0.0);
    }
}
