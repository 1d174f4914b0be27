//! # decompound-rs
//!
//! Splits compound words (German "Autobahnfahrer", Dutch "fietsenmaker")
//! into their parts.
//!
//! Two strategies are available behind one [`SplitterAlgorithm`] interface:
//!
//! - [`LeftToRightSplitter`] searches a dictionary exhaustively and returns a
//!   tree of every segmentation it can reach, optionally using linking
//!   morphemes such as the German "s" in "Arbeit-s-zimmer".
//! - [`AsvSplitter`] uses three pre-trained suffix classifiers instead of a
//!   dictionary and returns a single best decomposition.
//!
//! ## Quick Start
//!
//! ```rust
//! use decompound_rs::{Dictionary, LeftToRightSplitter, LinkingMorphemes, SplitterAlgorithm};
//!
//! let dict = Dictionary::from_words(["auto", "bahn", "fahrer"]);
//! let morphemes = LinkingMorphemes::new(["s"]);
//!
//! let splitter = LeftToRightSplitter::new(dict, morphemes);
//! let tree = splitter.split("Autobahnfahrer").unwrap();
//!
//! assert_eq!(tree.best_split().to_string(), "auto+bahn+fahrer");
//! ```
//!
//! ## Split notation
//!
//! Segmentations are written `part+part(morpheme)+part` and parse back with
//! [`DecompoundedWord::create_from_string`]:
//!
//! ```rust
//! use decompound_rs::DecompoundedWord;
//!
//! let split = DecompoundedWord::create_from_string("arbeit(s)+zimmer").unwrap();
//! assert_eq!(split.surface(), "arbeitszimmer");
//! ```
//!
//! ## Python Bindings
//!
//! This library can be compiled as a Python extension module with the
//! `python` feature.

pub mod classifier;
pub mod config;
pub mod decompounded;
pub mod dictionary;
pub mod error;
pub mod fragment;
pub mod morphemes;
pub mod ranking;
pub mod resources;
pub mod splitter;
pub mod tree;

// Python bindings (only compiled when the "python" feature is enabled)
#[cfg(feature = "python")]
pub mod python;

// Re-export main types for convenience
pub use classifier::{Instruction, SuffixClassifier, SuffixTable, UNDECIDED};
pub use config::SplitterConfig;
pub use decompounded::DecompoundedWord;
pub use dictionary::{normalize_word, Dictionary, DictionaryBuilder};
pub use error::{DecompoundingError, ParseError, ResourceError, Result};
pub use fragment::Fragment;
pub use morphemes::LinkingMorphemes;
pub use ranking::{FrequencyGeometricMeanRanker, MostFragmentsRanker, RankedSplit, Ranker};
pub use resources::ResourcePack;
pub use splitter::{AlgorithmKind, AsvSplitter, LeftToRightSplitter, Splitter, SplitterAlgorithm};
pub use tree::{DecompoundingTree, NodeId};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let mut builder = DictionaryBuilder::new();
        builder.load_tsv("arbeit\t500\nzimmer\t300\ntür\t200\n");
        let dict = builder.build();

        let splitter: Splitter =
            LeftToRightSplitter::new(dict, LinkingMorphemes::new(["s"])).into();
        let tree = splitter.split("Arbeitszimmertür").unwrap();

        let best = MostFragmentsRanker.highest_rank(&tree).unwrap();
        assert_eq!(best.to_string(), "arbeit(s)+zimmer+tür");
        assert_eq!(best.surface(), "arbeitszimmertür");
    }
}
