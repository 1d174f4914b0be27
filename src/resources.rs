//! Resource pack loading.
//!
//! A resource pack is a local directory holding everything a splitter needs:
//!
//! ```text
//! <pack>/dictionary/**/*.tsv        form[\tfrequency]
//! <pack>/morphemes.txt              one linking morpheme per line
//! <pack>/classifiers/forward.tsv    pattern\tinstruction
//! <pack>/classifiers/reverse.tsv
//! <pack>/classifiers/grundform.tsv
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::classifier::SuffixTable;
use crate::dictionary::{Dictionary, DictionaryBuilder};
use crate::error::ResourceError;
use crate::morphemes::LinkingMorphemes;

pub const DICTIONARY_DIR: &str = "dictionary";
pub const MORPHEMES_FILE: &str = "morphemes.txt";
pub const CLASSIFIERS_DIR: &str = "classifiers";
pub const FORWARD_CLASSIFIER: &str = "forward.tsv";
pub const REVERSE_CLASSIFIER: &str = "reverse.tsv";
pub const GRUNDFORM_CLASSIFIER: &str = "grundform.tsv";

/// Check if a directory looks like a resource pack
pub fn pack_exists(pack_path: &Path) -> bool {
    pack_path.is_dir()
        && (pack_path.join(DICTIONARY_DIR).is_dir() || pack_path.join(CLASSIFIERS_DIR).is_dir())
}

fn read(path: &Path) -> Result<String, ResourceError> {
    if !path.exists() {
        return Err(ResourceError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| ResourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// List all TSV files below a pack's dictionary directory, sorted
pub fn list_dictionary_files(pack_path: &Path) -> Result<Vec<PathBuf>, ResourceError> {
    let dict_path = pack_path.join(DICTIONARY_DIR);
    if !dict_path.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    collect_tsv_files(&dict_path, &mut files).map_err(|source| ResourceError::Io {
        path: dict_path.clone(),
        source,
    })?;
    files.sort();
    Ok(files)
}

fn collect_tsv_files(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    if dir.is_dir() {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                collect_tsv_files(&path, files)?;
            } else if path.extension().map_or(false, |ext| ext == "tsv") {
                files.push(path);
            }
        }
    }
    Ok(())
}

/// Load a dictionary from a single TSV file or from every TSV file below a directory
pub fn load_dictionary(path: &Path) -> Result<Dictionary, ResourceError> {
    let files = if path.is_dir() {
        let mut files = Vec::new();
        collect_tsv_files(path, &mut files).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        files.sort();
        files
    } else {
        vec![path.to_path_buf()]
    };

    let mut builder = DictionaryBuilder::new();
    for file in &files {
        builder.load_tsv(&read(file)?);
    }
    tracing::debug!(path = %path.display(), files = files.len(), words = builder.len(), "loaded dictionary");
    Ok(builder.build())
}

/// Load a linking morpheme list, one morpheme per line
pub fn load_morphemes(path: &Path) -> Result<LinkingMorphemes, ResourceError> {
    Ok(LinkingMorphemes::from_lines(&read(path)?))
}

/// Load a `pattern\tinstruction` classifier table
pub fn load_classifier(path: &Path) -> Result<SuffixTable, ResourceError> {
    let table = SuffixTable::from_tsv(&read(path)?);
    tracing::debug!(path = %path.display(), patterns = table.len(), "loaded classifier");
    Ok(table)
}

/// Everything found in a resource pack; absent parts are `None`
#[derive(Debug, Default, Clone)]
pub struct ResourcePack {
    pub dictionary: Option<Arc<Dictionary>>,
    pub morphemes: Option<Arc<LinkingMorphemes>>,
    pub forward: Option<Arc<SuffixTable>>,
    pub reverse: Option<Arc<SuffixTable>>,
    pub grundform: Option<Arc<SuffixTable>>,
}

impl ResourcePack {
    /// Load every resource present in `pack_path`
    pub fn open(pack_path: &Path) -> Result<Self, ResourceError> {
        if !pack_path.is_dir() {
            return Err(ResourceError::NotFound(pack_path.to_path_buf()));
        }

        let mut pack = ResourcePack::default();

        let dict_files = list_dictionary_files(pack_path)?;
        if !dict_files.is_empty() {
            pack.dictionary = Some(Arc::new(load_dictionary(&pack_path.join(DICTIONARY_DIR))?));
        }

        let morphemes_path = pack_path.join(MORPHEMES_FILE);
        if morphemes_path.is_file() {
            pack.morphemes = Some(Arc::new(load_morphemes(&morphemes_path)?));
        }

        let classifiers = pack_path.join(CLASSIFIERS_DIR);
        let load_optional = |name: &str| -> Result<Option<Arc<SuffixTable>>, ResourceError> {
            let path = classifiers.join(name);
            if path.is_file() {
                Ok(Some(Arc::new(load_classifier(&path)?)))
            } else {
                Ok(None)
            }
        };
        pack.forward = load_optional(FORWARD_CLASSIFIER)?;
        pack.reverse = load_optional(REVERSE_CLASSIFIER)?;
        pack.grundform = load_optional(GRUNDFORM_CLASSIFIER)?;

        Ok(pack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::SuffixClassifier;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_open_pack() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("dictionary/nouns.tsv"), "auto\t10\nbahn\n");
        write(&root.join("dictionary/more/verbs.tsv"), "fahren\n");
        write(&root.join("dictionary/readme.txt"), "ignored\n");
        write(&root.join("morphemes.txt"), "s\nes\n");
        write(&root.join("classifiers/forward.tsv"), "haus\t4\n");

        assert!(pack_exists(root));
        assert_eq!(list_dictionary_files(root).unwrap().len(), 2);

        let pack = ResourcePack::open(root).unwrap();
        let dict = pack.dictionary.unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.frequency("auto"), Some(10));
        assert_eq!(pack.morphemes.unwrap().all().len(), 2);
        assert_eq!(pack.forward.unwrap().classify("hausboot"), "4");
        assert!(pack.reverse.is_none());
        assert!(pack.grundform.is_none());
    }

    #[test]
    fn test_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!pack_exists(dir.path()));
        assert!(list_dictionary_files(dir.path()).unwrap().is_empty());
        assert!(matches!(
            load_morphemes(&dir.path().join("nope.txt")),
            Err(ResourceError::NotFound(_))
        ));
        assert!(matches!(
            ResourcePack::open(&dir.path().join("missing")),
            Err(ResourceError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_dictionary_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.tsv");
        write(&path, "# words\nZug\n");
        let dict = load_dictionary(&path).unwrap();
        assert!(dict.contains("zug"));
    }
}
