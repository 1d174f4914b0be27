//! Python bindings for decompound-rs using PyO3
//!
//! This module provides Python-compatible wrappers around the splitters.

use std::path::Path;
use std::sync::Arc;

use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::decompounded::DecompoundedWord;
use crate::dictionary::{Dictionary, DictionaryBuilder};
use crate::error::DecompoundingError;
use crate::morphemes::LinkingMorphemes;
use crate::splitter::{LeftToRightSplitter, Splitter, SplitterAlgorithm};
use crate::config::SplitterConfig;

fn to_py_err(err: DecompoundingError) -> PyErr {
    match err {
        DecompoundingError::Resource(e) => PyIOError::new_err(e.to_string()),
        DecompoundingError::Parse(e) => PyValueError::new_err(e.to_string()),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

/// Decompounder - splits compound words
///
/// Example:
///     >>> from decompound_rs import Decompounder
///     >>> d = Decompounder(["auto", "bahn", "fahrer"], ["s"])
///     >>> d.best("Autobahnfahrer")
///     'auto+bahn+fahrer'
#[pyclass(name = "Decompounder")]
pub struct PyDecompounder {
    splitter: Arc<Splitter>,
}

#[pymethods]
impl PyDecompounder {
    /// Create a dictionary-based decompounder.
    ///
    /// Args:
    ///     words: Known word forms
    ///     morphemes: Linking morphemes, tried in order (default: none)
    ///     max_tree_depth: Maximum depth of the split tree (default: unbounded)
    #[new]
    #[pyo3(signature = (words, morphemes=None, max_tree_depth=None))]
    fn new(words: Vec<String>, morphemes: Option<Vec<String>>, max_tree_depth: Option<usize>) -> Self {
        let dict = Dictionary::from_words(&words);
        let morphemes = LinkingMorphemes::new(morphemes.unwrap_or_default());
        let mut splitter = LeftToRightSplitter::new(dict, morphemes);
        splitter.set_max_tree_depth(max_tree_depth);
        PyDecompounder {
            splitter: Arc::new(splitter.into()),
        }
    }

    /// Create a decompounder from a dictionary TSV file
    #[staticmethod]
    #[pyo3(signature = (path, morphemes=None))]
    fn from_tsv_file(path: &str, morphemes: Option<Vec<String>>) -> PyResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| PyIOError::new_err(e.to_string()))?;
        let mut builder = DictionaryBuilder::new();
        builder.load_tsv(&content);
        let splitter =
            LeftToRightSplitter::new(builder.build(), LinkingMorphemes::new(morphemes.unwrap_or_default()));
        Ok(PyDecompounder {
            splitter: Arc::new(splitter.into()),
        })
    }

    /// Create a decompounder from a JSON configuration file
    #[staticmethod]
    fn from_config(path: &str) -> PyResult<Self> {
        let config = SplitterConfig::from_file(Path::new(path))
            .map_err(|e| PyIOError::new_err(e.to_string()))?;
        let splitter = config.build_splitter().map_err(to_py_err)?;
        Ok(PyDecompounder {
            splitter: Arc::new(splitter),
        })
    }

    /// The best split of a word, as `part+part(morpheme)+part`
    fn best(&self, word: &str) -> PyResult<String> {
        let tree = self.splitter.split(word).map_err(to_py_err)?;
        Ok(tree.best_split().to_string())
    }

    /// Every distinct split of a word, the unsplit word first
    fn splits(&self, word: &str) -> PyResult<Vec<String>> {
        let tree = self.splitter.split(word).map_err(to_py_err)?;
        Ok(tree.all_splits().iter().map(ToString::to_string).collect())
    }

    /// The best split of a word as a list of (word, morpheme) tuples
    fn split(&self, word: &str) -> PyResult<Vec<(String, Option<String>)>> {
        let tree = self.splitter.split(word).map_err(to_py_err)?;
        Ok(tree
            .best_split()
            .fragments()
            .iter()
            .map(|f| (f.word.clone(), f.morpheme.clone()))
            .collect())
    }

    fn __repr__(&self) -> String {
        format!("Decompounder(algorithm='{}')", self.splitter.name())
    }
}

/// Parse `part+part(morpheme)+part` into a list of (word, morpheme) tuples
#[pyfunction]
fn parse_split(s: &str) -> PyResult<Vec<(String, Option<String>)>> {
    let split = DecompoundedWord::create_from_string(s)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(split
        .fragments()
        .iter()
        .map(|f| (f.word.clone(), f.morpheme.clone()))
        .collect())
}

/// Create the Python module
#[pymodule]
fn decompound_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDecompounder>()?;
    m.add_function(wrap_pyfunction!(parse_split, m)?)?;

    // Add version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
