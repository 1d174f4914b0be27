//! Splitter configuration.
//!
//! A configuration names the algorithm, where its resources live and the
//! tuning parameters. It can be read from JSON:
//!
//! ```json
//! {
//!   "algorithm": "left-to-right",
//!   "resources": "packs/german",
//!   "max_tree_depth": 3,
//!   "min_rest_length": 2
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::classifier::SuffixClassifier;
use crate::error::{ResourceError, Result};
use crate::resources::{self, ResourcePack};
use crate::splitter::left_to_right::{DEFAULT_MIN_REST_LENGTH, DEFAULT_MIN_WORD_LENGTH};
use crate::splitter::{AlgorithmKind, AsvSplitter, LeftToRightSplitter, Splitter};

/// Everything needed to build a [`Splitter`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitterConfig {
    pub algorithm: AlgorithmKind,

    /// Resource pack directory
    pub resources: Option<PathBuf>,

    /// Dictionary file or directory, overriding the pack
    pub dictionary: Option<PathBuf>,
    /// Linking morpheme list, overriding the pack
    pub morphemes: Option<PathBuf>,
    pub forward_classifier: Option<PathBuf>,
    pub reverse_classifier: Option<PathBuf>,
    pub grundform_classifier: Option<PathBuf>,

    /// Maximum tree depth; unbounded when absent
    pub max_tree_depth: Option<usize>,
    pub min_word_length: usize,
    pub min_rest_length: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        SplitterConfig {
            algorithm: AlgorithmKind::default(),
            resources: None,
            dictionary: None,
            morphemes: None,
            forward_classifier: None,
            reverse_classifier: None,
            grundform_classifier: None,
            max_tree_depth: None,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            min_rest_length: DEFAULT_MIN_REST_LENGTH,
        }
    }
}

impl SplitterConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ResourceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self, ResourceError> {
        let content = std::fs::read_to_string(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Load the configured resources and build the splitter.
    ///
    /// Explicit file paths win over the resource pack. A missing required
    /// resource (the dictionary and morpheme list, or the three classifiers) is an
    /// [`InvalidConfiguration`](crate::error::DecompoundingError::InvalidConfiguration).
    pub fn build_splitter(&self) -> Result<Splitter> {
        let mut pack = match self.resources {
            Some(ref path) => ResourcePack::open(path)?,
            None => ResourcePack::default(),
        };

        if let Some(ref path) = self.dictionary {
            pack.dictionary = Some(Arc::new(resources::load_dictionary(path)?));
        }
        if let Some(ref path) = self.morphemes {
            pack.morphemes = Some(Arc::new(resources::load_morphemes(path)?));
        }
        if let Some(ref path) = self.forward_classifier {
            pack.forward = Some(Arc::new(resources::load_classifier(path)?));
        }
        if let Some(ref path) = self.reverse_classifier {
            pack.reverse = Some(Arc::new(resources::load_classifier(path)?));
        }
        if let Some(ref path) = self.grundform_classifier {
            pack.grundform = Some(Arc::new(resources::load_classifier(path)?));
        }

        let splitter = match self.algorithm {
            AlgorithmKind::LeftToRight => {
                let mut builder = LeftToRightSplitter::builder()
                    .max_tree_depth(self.max_tree_depth)
                    .min_word_length(self.min_word_length)
                    .min_rest_length(self.min_rest_length);
                if let Some(dict) = pack.dictionary {
                    builder = builder.dictionary(dict);
                }
                // an empty morpheme file means "no linking morphemes"; a missing one is an error
                if let Some(morphemes) = pack.morphemes {
                    builder = builder.morphemes(morphemes);
                }
                builder.build().map(Splitter::LeftToRight)
            }
            AlgorithmKind::Asv => {
                let mut builder = AsvSplitter::builder();
                if let Some(c) = pack.forward {
                    builder = builder.forward(c as Arc<dyn SuffixClassifier>);
                }
                if let Some(c) = pack.reverse {
                    builder = builder.reverse(c as Arc<dyn SuffixClassifier>);
                }
                if let Some(c) = pack.grundform {
                    builder = builder.grundform(c as Arc<dyn SuffixClassifier>);
                }
                builder.build().map(Splitter::Asv)
            }
        };

        splitter.map_err(|err| {
            tracing::error!(error = %err, "cannot build splitter");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecompoundingError;
    use crate::splitter::SplitterAlgorithm;

    #[test]
    fn test_defaults() {
        let config = SplitterConfig::from_json("{}").unwrap();
        assert_eq!(config, SplitterConfig::default());
        assert_eq!(config.min_word_length, 1);
        assert_eq!(config.min_rest_length, 2);
        assert_eq!(config.max_tree_depth, None);
    }

    #[test]
    fn test_parse() {
        let config = SplitterConfig::from_json(
            r#"{"algorithm": "asv", "resources": "packs/de", "max_tree_depth": 2}"#,
        )
        .unwrap();
        assert_eq!(config.algorithm, AlgorithmKind::Asv);
        assert_eq!(config.resources, Some(PathBuf::from("packs/de")));
        assert_eq!(config.max_tree_depth, Some(2));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            SplitterConfig::from_json(r#"{"depth": 2}"#),
            Err(ResourceError::Json(_))
        ));
    }

    #[test]
    fn test_missing_dictionary_is_invalid_configuration() {
        let err = SplitterConfig::default().build_splitter().unwrap_err();
        assert!(matches!(err, DecompoundingError::InvalidConfiguration(_)));

        let config = SplitterConfig {
            algorithm: AlgorithmKind::Asv,
            ..Default::default()
        };
        assert!(matches!(
            config.build_splitter(),
            Err(DecompoundingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_build_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let dict = dir.path().join("words.tsv");
        let morphemes = dir.path().join("morphemes.txt");
        std::fs::write(&dict, "auto\nbahn\n").unwrap();
        std::fs::write(&morphemes, "# none\n").unwrap();

        let config = SplitterConfig {
            dictionary: Some(dict),
            morphemes: Some(morphemes),
            ..Default::default()
        };
        let splitter = config.build_splitter().unwrap();
        let tree = splitter.split("autobahn").unwrap();
        assert_eq!(tree.best_split().to_string(), "auto+bahn");
    }

    #[test]
    fn test_missing_morphemes_is_invalid_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let dict = dir.path().join("words.tsv");
        std::fs::write(&dict, "auto\nbahn\n").unwrap();

        let config = SplitterConfig {
            dictionary: Some(dict),
            ..Default::default()
        };
        assert!(matches!(
            config.build_splitter(),
            Err(DecompoundingError::InvalidConfiguration(_))
        ));
    }
}
