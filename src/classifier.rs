//! Suffix classifiers used by the statistical splitter.
//!
//! A classifier maps an input string to an instruction string of the form
//! `<digits><suffix>`, or to [`UNDECIDED`] when no rule applies. How the
//! classifier was trained is not this crate's concern; [`SuffixTable`] is a
//! simple longest-match table that can be loaded from TSV.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;

/// Sentinel answer for "no applicable rule"
pub const UNDECIDED: &str = "undecided";

static INSTRUCTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)(.*)$").expect("Invalid regex"));

/// Anything that can classify a string into an instruction
pub trait SuffixClassifier: Send + Sync {
    /// Classify `input`, returning an instruction or [`UNDECIDED`]
    fn classify(&self, input: &str) -> String;
}

impl<F> SuffixClassifier for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn classify(&self, input: &str) -> String {
        self(input)
    }
}

/// A parsed classifier answer: a character count and a literal suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Number of characters (meaning depends on the classifier)
    pub count: usize,
    /// Literal characters attached to the instruction
    pub suffix: String,
}

impl Instruction {
    /// Parse a classifier answer, returning `None` for [`UNDECIDED`] and malformed answers
    pub fn parse(class: &str) -> Option<Instruction> {
        if class == UNDECIDED {
            return None;
        }
        match class.parse() {
            Ok(instruction) => Some(instruction),
            Err(err) => {
                tracing::debug!(class, error = %err, "ignoring classifier answer");
                None
            }
        }
    }
}

impl FromStr for Instruction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = INSTRUCTION_RE
            .captures(s)
            .ok_or_else(|| ParseError::MalformedInstruction(s.to_string()))?;
        let count = caps[1]
            .parse::<usize>()
            .map_err(|_| ParseError::MalformedInstruction(s.to_string()))?;

        Ok(Instruction {
            count,
            suffix: caps[2].to_string(),
        })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.suffix)
    }
}

#[derive(Debug, Clone, Default)]
struct TableNode {
    children: HashMap<char, TableNode>,
    class: Option<String>,
}

/// Longest-match classification table.
///
/// Patterns are matched against the beginning of the input; callers that
/// want suffix semantics pass the reversed word. The empty pattern sets a
/// default class.
#[derive(Debug, Clone, Default)]
pub struct SuffixTable {
    root: TableNode,
    len: usize,
}

impl SuffixTable {
    /// Create an empty table
    pub fn new() -> Self {
        SuffixTable::default()
    }

    /// Load `pattern\tclass` lines. Lines starting with `#` and lines without a tab are skipped.
    pub fn from_tsv(content: &str) -> Self {
        let mut table = SuffixTable::new();
        for line in content.lines() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((pattern, class)) = line.split_once('\t') {
                let class = class.trim();
                if !class.is_empty() {
                    table.insert(pattern.trim(), class);
                }
            }
        }
        table
    }

    /// Add or replace a pattern
    pub fn insert(&mut self, pattern: &str, class: &str) {
        let mut current = &mut self.root;
        for c in pattern.chars() {
            current = current.children.entry(c).or_default();
        }
        if current.class.is_none() {
            self.len += 1;
        }
        current.class = Some(class.to_string());
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the table has no patterns
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl SuffixClassifier for SuffixTable {
    fn classify(&self, input: &str) -> String {
        let mut current = &self.root;
        let mut last_match = current.class.as_deref();

        for c in input.chars() {
            match current.children.get(&c) {
                Some(next) => {
                    current = next;
                    if let Some(ref class) = current.class {
                        last_match = Some(class);
                    }
                }
                None => break,
            }
        }

        last_match.unwrap_or(UNDECIDED).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_parse() {
        assert_eq!(
            Instruction::parse("2en"),
            Some(Instruction {
                count: 2,
                suffix: "en".to_string()
            })
        );
        assert_eq!(
            Instruction::parse("13"),
            Some(Instruction {
                count: 13,
                suffix: String::new()
            })
        );
        assert_eq!(Instruction::parse(UNDECIDED), None);
        assert_eq!(Instruction::parse("en"), None);
        assert_eq!(Instruction::parse(""), None);
    }

    #[test]
    fn test_instruction_display() {
        let instruction: Instruction = "4s".parse().unwrap();
        assert_eq!(instruction.to_string(), "4s");
        assert!(matches!(
            "x4".parse::<Instruction>(),
            Err(ParseError::MalformedInstruction(_))
        ));
    }

    #[test]
    fn test_table_longest_match() {
        let mut table = SuffixTable::new();
        table.insert("ne", "1");
        table.insert("neg", "2e");

        assert_eq!(table.classify("negnuw"), "2e");
        assert_eq!(table.classify("nehcs"), "1");
        assert_eq!(table.classify("sua"), UNDECIDED);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_table_default_class() {
        let table = SuffixTable::from_tsv("\t0\nre\t2\n");
        assert_eq!(table.classify("xyz"), "0");
        assert_eq!(table.classify("rehcuab"), "2");
    }

    #[test]
    fn test_table_from_tsv() {
        let table = SuffixTable::from_tsv("# grundform\nne\t1\nbroken line\nse\t\n");
        assert_eq!(table.len(), 1);
        assert_eq!(table.classify("nesuah"), "1");
    }

    #[test]
    fn test_closure_classifier() {
        let classifier = |input: &str| {
            if input.starts_with("haus") {
                "4".to_string()
            } else {
                UNDECIDED.to_string()
            }
        };
        assert_eq!(classifier.classify("hausboot"), "4");
        assert_eq!(classifier.classify("boot"), UNDECIDED);
    }
}
