//! A single segment of a decomposition.
//!
//! A Fragment is a word plus an optional trailing linking morpheme. Its
//! string form is `word` or `word(morpheme)`.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Characters reserved by the `word(morpheme)+word` notation
pub const MARKUP_CHARS: [char; 3] = ['+', '(', ')'];

static FRAGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^()+]+)(?:\(([^()+]+)\))?$").expect("Invalid regex"));

/// One segment of a decompounded word
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Fragment {
    /// The word part
    pub word: String,

    /// Linking morpheme following the word, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morpheme: Option<String>,
}

impl Fragment {
    /// Create a fragment without a morpheme
    pub fn new(word: impl Into<String>) -> Self {
        Fragment {
            word: word.into(),
            morpheme: None,
        }
    }

    /// Create a fragment with a linking morpheme. An empty morpheme is dropped.
    pub fn with_morpheme(word: impl Into<String>, morpheme: impl Into<String>) -> Self {
        let morpheme = morpheme.into();
        Fragment {
            word: word.into(),
            morpheme: if morpheme.is_empty() { None } else { Some(morpheme) },
        }
    }

    /// Check if a linking morpheme is attached
    pub fn has_morpheme(&self) -> bool {
        self.morpheme.is_some()
    }

    /// Word followed by its morpheme, without markup
    pub fn surface(&self) -> String {
        match self.morpheme {
            Some(ref m) => format!("{}{}", self.word, m),
            None => self.word.clone(),
        }
    }

    /// Length of [`Fragment::surface`] in characters
    pub fn char_len(&self) -> usize {
        self.word.chars().count() + self.morpheme.as_ref().map_or(0, |m| m.chars().count())
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word)?;
        if let Some(ref m) = self.morpheme {
            write!(f, "({})", m)?;
        }
        Ok(())
    }
}

impl FromStr for Fragment {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::Empty);
        }

        let caps = FRAGMENT_RE
            .captures(s)
            .ok_or_else(|| ParseError::MalformedFragment(s.to_string()))?;

        Ok(Fragment {
            word: caps[1].to_string(),
            morpheme: caps.get(2).map(|m| m.as_str().to_string()),
        })
    }
}
