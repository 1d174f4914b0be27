//! Error types shared by the decompounding core.
//!
//! "No split found" is not an error: it is a tree with only a root node.
//! Only setup problems and per-word remapping failures surface here.

use std::path::PathBuf;

/// Result type defaulting to [`DecompoundingError`].
pub type Result<T, E = DecompoundingError> = std::result::Result<T, E>;

/// Errors returned by the splitters and their builders
#[derive(Debug, thiserror::Error)]
pub enum DecompoundingError {
    /// A required collaborator (dictionary, morphemes, classifier) was not configured.
    ///
    /// This is a caller setup bug and should abort processing.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The statistical cut could not be located in the surface form of the word.
    ///
    /// Only affects this one word; batch callers should continue with the next.
    #[error("cannot map split {attempted:?} back onto '{word}'")]
    Remapping {
        /// The word being split
        word: String,
        /// The pieces that could not be placed
        attempted: Vec<String>,
    },

    /// Malformed split string or classifier instruction
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Resource loading failed
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl DecompoundingError {
    /// Whether the error only concerns a single word and processing may continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DecompoundingError::Remapping { .. })
    }
}

/// Errors produced while parsing the `word(morpheme)+word` notation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Nothing to parse
    #[error("empty input")]
    Empty,

    /// A token is not of the form `word` or `word(morpheme)`
    #[error("malformed fragment '{0}'")]
    MalformedFragment(String),

    /// A classifier answer is not of the form `<digits><suffix>`
    #[error("malformed classifier instruction '{0}'")]
    MalformedInstruction(String),
}

/// Errors produced while loading dictionaries, morphemes and classifier tables
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// I/O failure on a specific file
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid JSON configuration
    #[error("invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),

    /// A resource file or directory does not exist
    #[error("resource not found: {}", .0.display())]
    NotFound(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remapping_is_recoverable() {
        let err = DecompoundingError::Remapping {
            word: "hausbau".to_string(),
            attempted: vec!["haus".to_string(), "bau".to_string()],
        };
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("hausbau"));

        let err = DecompoundingError::InvalidConfiguration("no dictionary".to_string());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_parse_error_display() {
        let err: DecompoundingError = ParseError::MalformedFragment("a(b".to_string()).into();
        assert_eq!(err.to_string(), "malformed fragment 'a(b'");
    }
}
